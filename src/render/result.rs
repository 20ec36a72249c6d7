//! Export result with statistics.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// A finished document artifact.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Serialized document
    pub bytes: Vec<u8>,

    /// Export statistics
    pub stats: ExportStats,

    /// MIME type of the artifact
    pub mime_type: &'static str,
}

impl ExportResult {
    /// Create a new export result.
    pub fn new(bytes: Vec<u8>, stats: ExportStats, mime_type: &'static str) -> Self {
        Self {
            bytes,
            stats,
            mime_type,
        }
    }

    /// Artifact size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the artifact is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the artifact to `path` in a single write.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Counts collected while exporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of table body rows
    pub table_row_count: u32,

    /// Number of hyperlinks (inline and whole-cell)
    pub link_count: u32,

    /// Pages produced (paginated output only)
    pub page_count: u32,
}

impl ExportStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Count a table and its body rows.
    pub fn add_table(&mut self, body_rows: usize) {
        self.table_count += 1;
        self.table_row_count += body_rows as u32;
    }

    /// Add to the link count.
    pub fn add_links(&mut self, links: usize) {
        self.link_count += links as u32;
    }

    /// Total blocks counted.
    pub fn block_count(&self) -> u32 {
        self.heading_count + self.paragraph_count + self.table_count
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExportStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.table_count += other.table_count;
        self.table_row_count += other.table_row_count;
        self.link_count += other.link_count;
        self.page_count += other.page_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_merge() {
        let mut a = ExportStats::new();
        a.add_heading();
        a.add_table(3);

        let b = ExportStats {
            paragraph_count: 2,
            link_count: 4,
            page_count: 1,
            ..Default::default()
        };
        a.merge(&b);

        assert_eq!(a.block_count(), 4);
        assert_eq!(a.table_row_count, 3);
        assert_eq!(a.link_count, 4);
        assert_eq!(a.page_count, 1);
    }

    #[test]
    fn test_result_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let result = ExportResult::new(vec![1, 2, 3], ExportStats::new(), "application/pdf");
        result.save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
        assert_eq!(result.len(), 3);
    }
}
