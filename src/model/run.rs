//! Inline run types.

use serde::{Deserialize, Serialize};

/// A styled inline fragment of a paragraph, heading or table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Run {
    /// Plain text
    Text {
        /// The text content
        content: String,
    },

    /// A hyperlink
    Link {
        /// Visible link text
        label: String,
        /// Link target
        url: String,
    },
}

impl Run {
    /// Create a plain text run.
    pub fn text(content: impl Into<String>) -> Self {
        Run::Text {
            content: content.into(),
        }
    }

    /// Create a link run.
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Run::Link {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Human-readable text of the run (the label for links).
    pub fn visible_text(&self) -> &str {
        match self {
            Run::Text { content } => content,
            Run::Link { label, .. } => label,
        }
    }

    /// Link target, if this is a link run.
    pub fn url(&self) -> Option<&str> {
        match self {
            Run::Link { url, .. } => Some(url),
            Run::Text { .. } => None,
        }
    }

    /// Check if this is a link run.
    pub fn is_link(&self) -> bool {
        matches!(self, Run::Link { .. })
    }

    /// Check if the run carries no visible text.
    pub fn is_empty(&self) -> bool {
        self.visible_text().is_empty()
    }
}

/// Concatenate the visible text of a run sequence.
pub fn plain_text(runs: &[Run]) -> String {
    runs.iter().map(Run::visible_text).collect()
}

/// Count the link runs in a sequence.
pub fn link_count(runs: &[Run]) -> usize {
    runs.iter().filter(|r| r.is_link()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_ignores_link_syntax() {
        let runs = vec![
            Run::text("See "),
            Run::link("the docs", "https://docs.test"),
            Run::text("."),
        ];
        assert_eq!(plain_text(&runs), "See the docs.");
        assert_eq!(link_count(&runs), 1);
    }

    #[test]
    fn test_run_accessors() {
        let link = Run::link("A", "http://x");
        assert!(link.is_link());
        assert_eq!(link.url(), Some("http://x"));
        assert_eq!(link.visible_text(), "A");

        let text = Run::text("");
        assert!(!text.is_link());
        assert!(text.is_empty());
        assert_eq!(text.url(), None);
    }

    #[test]
    fn test_run_serializes_tagged() {
        let json = serde_json::to_string(&Run::link("A", "http://x")).unwrap();
        assert_eq!(json, r#"{"type":"link","label":"A","url":"http://x"}"#);
    }
}
