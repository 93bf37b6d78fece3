//! Notes index listing

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use super::publish::is_publishable;
use crate::content::{ContentQuery, Document};

/// One teaser on the notes index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub id: String,
    pub path: String,
    pub title: String,
    pub date: String,
    pub time_to_read: usize,
    pub excerpt: String,
}

impl ListingEntry {
    pub fn from_document(doc: &Document, excerpt_length: usize) -> Self {
        Self {
            id: doc.id.clone(),
            path: doc.path.clone(),
            title: doc.title.clone(),
            date: doc.date.clone(),
            time_to_read: doc.time_to_read,
            excerpt: doc.excerpt(excerpt_length),
        }
    }
}

/// Project already-sorted, draft-filtered documents into listing entries.
///
/// Documents dated at or after `now` (or without a usable date) are dropped;
/// everything else keeps its input order. The iterator is lazy and consumes
/// `docs`.
pub fn listing<'a, I, Tz>(
    docs: I,
    now: &'a DateTime<Tz>,
    excerpt_length: usize,
) -> impl Iterator<Item = ListingEntry> + 'a
where
    I: IntoIterator<Item = &'a Document>,
    I::IntoIter: 'a,
    Tz: TimeZone + 'a,
{
    docs.into_iter()
        .filter(move |doc| is_publishable(doc, now))
        .map(move |doc| ListingEntry::from_document(doc, excerpt_length))
}

/// The notes index for a store: its published query run through [`listing`]
pub fn notes_listing<'a, Q, Tz>(
    store: &'a Q,
    now: &'a DateTime<Tz>,
    excerpt_length: usize,
) -> impl Iterator<Item = ListingEntry> + 'a
where
    Q: ContentQuery + ?Sized,
    Tz: TimeZone + 'a,
{
    listing(store.published(), now, excerpt_length)
}
