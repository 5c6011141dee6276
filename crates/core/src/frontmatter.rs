//! Frontmatter flattening.
//!
//! Consense has no frontmatter block. The `key: value` lines between the
//! opening and closing `---` are written out as plain lines followed by a
//! `----` terminator.

/// Line written after the flattened entries.
pub const FRONTMATTER_TERMINATOR: &str = "----";

/// Result of splitting one frontmatter line on its first `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterEntry {
    /// Trimmed key.
    pub key: String,
    /// Trimmed value, absent when empty.
    pub value: Option<String>,
}

impl FrontmatterEntry {
    /// Parse a line; returns `None` when the key is empty.
    pub fn parse(line: &str) -> Option<Self> {
        let (key, value) = match line.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (line.trim(), ""),
        };
        if key.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            value: (!value.is_empty()).then(|| value.to_string()),
        })
    }
}

impl std::fmt::Display for FrontmatterEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {}", self.key, value),
            None => write!(f, "{}", self.key),
        }
    }
}

/// Flatten buffered frontmatter lines.
///
/// The terminator is written whenever at least one line was buffered, even if
/// every buffered line was blank.
pub fn flatten_frontmatter<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    if lines.is_empty() {
        return Vec::new();
    }
    let mut out: Vec<String> = lines
        .iter()
        .filter_map(|line| FrontmatterEntry::parse(line.as_ref()))
        .map(|entry| entry.to_string())
        .collect();
    out.push(FRONTMATTER_TERMINATOR.to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_colon() {
        let entry = FrontmatterEntry::parse("url: https://example.com").unwrap();
        assert_eq!(entry.key, "url");
        assert_eq!(entry.value.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn bare_key_has_no_value() {
        let entry = FrontmatterEntry::parse("tags:").unwrap();
        assert_eq!(entry.to_string(), "tags");
        assert_eq!(FrontmatterEntry::parse("draft").unwrap().to_string(), "draft");
    }

    #[test]
    fn empty_key_is_dropped() {
        assert_eq!(FrontmatterEntry::parse("   "), None);
        assert_eq!(FrontmatterEntry::parse(": orphan"), None);
    }

    #[test]
    fn flattens_with_terminator() {
        let out = flatten_frontmatter(&["title:  Hello ", "", "aliases:"]);
        assert_eq!(out, vec!["title: Hello", "aliases", "----"]);
    }

    #[test]
    fn nothing_buffered_emits_nothing() {
        let empty: [&str; 0] = [];
        assert!(flatten_frontmatter(&empty).is_empty());
    }
}
