//! Note documents

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::helpers::prune;

/// A parsed markdown note, immutable once loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Stable unique identifier
    pub id: String,

    pub title: String,

    /// Display-formatted date
    pub date: String,

    /// The front-matter date verbatim, used for comparisons
    pub raw_date: Option<String>,

    /// Routing key
    pub path: String,

    /// Path derived from the source location
    pub slug: String,

    pub draft: bool,

    pub description: Option<String>,

    /// Plain text the excerpt is cut from
    pub plain_text: String,

    /// Rendered HTML body
    pub html: String,

    /// Estimated reading time in minutes
    pub time_to_read: usize,

    /// Source file path relative to the source directory
    pub source: String,

    /// Custom front-matter fields
    #[serde(default)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Document {
    /// Create a document with the minimal fields set
    pub fn new(id: impl Into<String>, title: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: id.into(),
            title: title.into(),
            date: String::new(),
            raw_date: None,
            slug: path.clone(),
            path,
            draft: false,
            description: None,
            plain_text: String::new(),
            html: String::new(),
            time_to_read: 1,
            source: String::new(),
            extra: HashMap::new(),
        }
    }

    /// Plain-text summary pruned to `prune_length` characters
    pub fn excerpt(&self, prune_length: usize) -> String {
        prune(&self.plain_text, prune_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_lengths_differ_by_context() {
        let mut doc = Document::new("1", "Long", "/long");
        doc.plain_text = "word ".repeat(100).trim_end().to_string();

        let listing = doc.excerpt(300);
        let detail = doc.excerpt(160);
        assert!(listing.chars().count() <= 300);
        assert!(detail.chars().count() <= 160);
        assert!(listing.len() > detail.len());
        assert!(detail.ends_with('…'));
    }

    #[test]
    fn test_excerpt_of_short_note() {
        let mut doc = Document::new("1", "Short", "/short");
        doc.plain_text = "Just a line.".to_string();
        assert_eq!(doc.excerpt(160), "Just a line.");
    }
}
