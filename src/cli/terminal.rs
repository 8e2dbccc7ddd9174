//! Styling of command output

use std::fmt::Display;

use owo_colors::{colors::css, OwoColorize};

/// Whether stdout accepts colors.
fn color_enabled() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Whether the terminal is narrower than 60 columns.
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < 60)
}

/// The role a piece of output plays.
#[derive(Debug, Clone, Copy)]
enum Tone {
    /// A file was written (green)
    Success,
    /// Nothing happened, or something was left out (amber)
    Warning,
    /// Subject headings (blue, bold)
    Heading,
    /// Secondary details such as counts (dimmed)
    Muted,
}

fn paint(text: &(impl Display + ?Sized), tone: Tone) -> String {
    if !color_enabled() {
        return text.to_string();
    }
    match tone {
        Tone::Success => text.fg::<css::Green>().to_string(),
        Tone::Warning => text.fg::<css::Orange>().to_string(),
        Tone::Heading => text.fg::<css::LightBlue>().bold().to_string(),
        Tone::Muted => text.dimmed().to_string(),
    }
}

/// Extension trait for styling output
pub trait Styled: Display {
    /// Style as success
    fn success(&self) -> String {
        paint(self, Tone::Success)
    }

    /// Style as warning
    fn warning(&self) -> String {
        paint(self, Tone::Warning)
    }

    /// Style as a heading
    fn heading(&self) -> String {
        paint(self, Tone::Heading)
    }

    /// Style as secondary detail
    fn muted(&self) -> String {
        paint(self, Tone::Muted)
    }
}

impl<T: Display + ?Sized> Styled for T {}
