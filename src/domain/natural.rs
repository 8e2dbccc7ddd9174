use std::cmp::Ordering;

/// A run of characters within a string, as seen by natural ordering.
#[derive(Debug, PartialEq, Eq)]
enum Run<'a> {
    Text(String),
    /// Digits with leading zeros removed.
    Number(&'a str),
}

impl Ord for Run<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // Without leading zeros, a longer digit run is always the larger
            // number, so arbitrarily long runs compare without overflow.
            (Self::Number(a), Self::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Text(_), Self::Number(_)) => Ordering::Less,
            (Self::Number(_), Self::Text(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Run<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Splits `s` into alternating text and digit runs.
///
/// The sequence always starts with a (possibly empty) text run, so two keys
/// line up run-for-run: even positions are text, odd positions are numbers.
fn runs(s: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut rest = s;

    loop {
        let text_end = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        runs.push(Run::Text(rest[..text_end].to_lowercase()));
        rest = &rest[text_end..];

        if rest.is_empty() {
            return runs;
        }

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let digits = &rest[..digits_end];
        let trimmed = digits.trim_start_matches('0');
        runs.push(Run::Number(if trimmed.is_empty() { "0" } else { trimmed }));
        rest = &rest[digits_end..];
    }
}

/// Compares two strings in natural order.
///
/// Embedded digit runs compare by numeric value and everything else compares
/// case-insensitively, so `"Question 2"` sorts before `"Question 10"`. Strings
/// that are equal under those rules fall back to a byte-wise comparison, which
/// keeps the ordering total and deterministic.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    runs(a).cmp(&runs(b)).then_with(|| a.cmp(b))
}

/// Sorts a slice of strings in natural order.
pub fn natural_sort<S: AsRef<str>>(items: &mut [S]) {
    items.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}
