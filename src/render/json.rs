//! JSON dump of the classified block stream.

use crate::error::{Error, Result};
use crate::model::Block;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert blocks to JSON.
pub fn to_json(blocks: &[Block], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(blocks),
        JsonFormat::Compact => serde_json::to_string(blocks),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markdown;

    #[test]
    fn test_to_json_pretty() {
        let blocks = parse_markdown("# Title\n[Buy](http://shop.test/x)");
        let json = to_json(&blocks, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"heading\""));
        assert!(json.contains("http://shop.test/x"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let blocks = parse_markdown("| A |\n| 1 |");
        let json = to_json(&blocks, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with(r#"[{"type":"table","header":"#));
    }

    #[test]
    fn test_empty_document() {
        let json = to_json(&[], JsonFormat::Compact).unwrap();
        assert_eq!(json, "[]");
    }
}
