//! Jekyll frontmatter: an insertion-ordered metadata mapping.
//!
//! The rendered block lists keys in the order the caller set them, so the
//! driver's seed keys (`layout`, then optionally `title`) come out in a
//! stable, human-expected order, with any auto-detected title appended last.
//! A `BTreeMap` would reorder keys alphabetically; a Vec of pairs keeps the
//! mapping honest for the handful of keys a page ever carries.

/// Metadata prepended to every compiled page.
///
/// Values are written verbatim into the rendered block with no escaping or
/// quoting, matching what Jekyll expects for plain scalar values.
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    entries: Vec<(String, String)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, overwriting the value in place if the key already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render the delimited frontmatter block, one `key: value` line per
    /// entry:
    ///
    /// ```text
    /// ---
    /// layout: documentation
    /// title: Getting Started
    /// ---
    /// ```
    ///
    /// An empty value renders as `key: ` with the trailing space intact —
    /// Jekyll treats that as an explicitly blank scalar, which the homepage
    /// seed relies on to suppress title detection.
    pub fn render(&self) -> String {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect();
        format!("---\n{}\n---\n", lines.join("\n"))
    }
}
