//! A question bank rooted at a base directory.
//!
//! The [`Bank`] pairs the base path with its [`Config`]. It holds no
//! question data: every scan and every generation call reads the filesystem
//! afresh.

use std::path::{Path, PathBuf};

use crate::{domain::Config, storage::Catalog};

/// Directory below the base path holding tool metadata.
pub const METADATA_DIR: &str = ".vti";

/// File name of the configuration inside [`METADATA_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// A question bank on disk.
#[derive(Debug, Clone)]
pub struct Bank {
    root: PathBuf,
    config: Config,
}

impl Bank {
    /// Opens the bank at `root`, loading `.vti/config.toml` when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be read or
    /// parsed. A missing configuration file is not an error; the defaults are
    /// used instead.
    pub fn open(root: PathBuf) -> Result<Self, OpenError> {
        let config = load_config(&root)?;
        Ok(Self { root, config })
    }

    /// Creates a bank with an explicit configuration.
    #[must_use]
    pub const fn with_config(root: PathBuf, config: Config) -> Self {
        Self { root, config }
    }

    /// The base directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Discovers the question files currently on disk.
    #[must_use]
    pub fn scan(&self) -> Catalog {
        Catalog::scan(&self.root, &self.config)
    }
}

/// Path of the configuration file for a bank rooted at `root`.
#[must_use]
pub fn config_path(root: &Path) -> PathBuf {
    root.join(METADATA_DIR).join(CONFIG_FILE)
}

fn load_config(root: &Path) -> Result<Config, OpenError> {
    let path = config_path(root);
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    Config::load(&path).map_err(OpenError::Config)
}

/// Errors that can occur when opening a bank.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// The configuration file exists but is unusable.
    #[error("{0}")]
    Config(String),
}
