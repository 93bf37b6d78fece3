//! Single note page

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use super::publish::{is_not_draft, is_past_dated};
use crate::content::{ContentQuery, Document, StoreError};
use crate::helpers::first_non_empty;

/// Everything the note template needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPage {
    pub title: String,
    pub path: String,
    pub date: String,
    pub time_to_read: usize,
    /// Rendered body, inserted without escaping
    pub html: String,
    /// Meta description: the front-matter description, else the excerpt
    pub description: String,
}

impl PostPage {
    pub fn new(doc: &Document, excerpt_length: usize) -> Self {
        let excerpt = doc.excerpt(excerpt_length);
        let description = first_non_empty([doc.description.as_deref(), Some(excerpt.as_str())])
            .unwrap_or_default()
            .to_string();

        Self {
            title: doc.title.clone(),
            path: doc.path.clone(),
            date: doc.date.clone(),
            time_to_read: doc.time_to_read,
            html: doc.html.clone(),
            description,
        }
    }
}

/// Resolve the note routed at `path`.
///
/// Drafts never resolve. Notes not yet dated in the past resolve only when
/// `future` is set, so a scheduled note stays unreachable by default. When
/// several notes share the path, the first one in store order that passes
/// wins; the others are shadowed.
pub fn lookup<'a, Q, Tz>(
    store: &'a Q,
    path: &str,
    now: &DateTime<Tz>,
    future: bool,
) -> Result<&'a Document, StoreError>
where
    Q: ContentQuery + ?Sized,
    Tz: TimeZone,
{
    store
        .all_at_path(path)
        .into_iter()
        .find(|doc| is_not_draft(doc) && (future || is_past_dated(doc, now)))
        .ok_or_else(|| {
            tracing::debug!("No published note at {:?}", path);
            StoreError::NotFound {
                path: path.to_string(),
            }
        })
}
