//! In-memory content store and the query boundary the pipelines read from

use chrono_tz::Tz;
use std::collections::HashSet;
use thiserror::Error;

use super::Document;
use crate::helpers::parse_date_in;

/// Errors raised by content queries
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no document found for path {path:?}")]
    NotFound { path: String },
}

/// Read access to the documents of one build
pub trait ContentQuery {
    /// Every document, drafts included, in store order
    fn all(&self) -> &[Document];

    /// Non-draft documents, newest first
    fn published(&self) -> Vec<&Document>;

    /// Every document routed at `path`, drafts included, in store order
    fn all_at_path(&self, path: &str) -> Vec<&Document>;

    /// The first document routed at `path`
    fn find_by_path(&self, path: &str) -> Result<&Document, StoreError> {
        self.all_at_path(path)
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound {
                path: path.to_string(),
            })
    }
}

/// Documents of a build, sorted by date descending
#[derive(Debug, Default)]
pub struct ContentStore {
    documents: Vec<Document>,
}

impl ContentStore {
    /// Build a store, reading naive dates as UTC
    pub fn new(documents: Vec<Document>) -> Self {
        Self::with_timezone(documents, Tz::UTC)
    }

    /// Build a store, sorting newest first.
    ///
    /// Dates are compared as instants, naive ones read in `tz`; documents
    /// with missing or unparsable dates sort after all dated ones. Ties keep
    /// load order.
    pub fn with_timezone(mut documents: Vec<Document>, tz: Tz) -> Self {
        documents.sort_by_cached_key(|doc| {
            let instant = doc
                .raw_date
                .as_deref()
                .and_then(|raw| parse_date_in(raw, &tz));
            std::cmp::Reverse(instant)
        });

        let mut seen = HashSet::new();
        for doc in &documents {
            if !seen.insert(normalize_path(&doc.path)) {
                tracing::warn!("Duplicate path {:?} (from {})", doc.path, doc.source);
            }
        }

        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl ContentQuery for ContentStore {
    fn all(&self) -> &[Document] {
        &self.documents
    }

    fn published(&self) -> Vec<&Document> {
        self.documents.iter().filter(|doc| !doc.draft).collect()
    }

    fn all_at_path(&self, path: &str) -> Vec<&Document> {
        let wanted = normalize_path(path);
        self.documents
            .iter()
            .filter(|doc| normalize_path(&doc.path) == wanted)
            .collect()
    }
}

/// `/notes/a`, `notes/a/` and `/notes/a/` name the same route
fn normalize_path(path: &str) -> &str {
    path.trim_matches('/')
}
