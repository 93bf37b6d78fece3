//! Publish predicates

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt;

use crate::content::Document;
use crate::helpers::parse_date_in;

/// Publication state of a document at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Published,
    Draft,
    /// Not a draft, but dated at or after `now`
    Scheduled,
    /// Not a draft, date missing or unparsable
    Undated,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Published => "published",
            Status::Draft => "draft",
            Status::Scheduled => "scheduled",
            Status::Undated => "undated",
        };
        f.pad(label)
    }
}

/// The document is not marked as a draft
pub fn is_not_draft(doc: &Document) -> bool {
    !doc.draft
}

/// The document's date lies strictly before `now`.
///
/// Naive dates are read in `now`'s timezone. A missing or unparsable date
/// never passes.
pub fn is_past_dated<Tz: TimeZone>(doc: &Document, now: &DateTime<Tz>) -> bool {
    doc.raw_date
        .as_deref()
        .and_then(|raw| parse_date_in(raw, &now.timezone()))
        .map(|date| date < *now)
        .unwrap_or(false)
}

/// Both gates pass: not a draft and dated in the past
pub fn is_publishable<Tz: TimeZone>(doc: &Document, now: &DateTime<Tz>) -> bool {
    is_not_draft(doc) && is_past_dated(doc, now)
}

/// Classify a document for reporting
pub fn status<Tz: TimeZone>(doc: &Document, now: &DateTime<Tz>) -> Status {
    if !is_not_draft(doc) {
        return Status::Draft;
    }

    let parsed = doc
        .raw_date
        .as_deref()
        .and_then(|raw| parse_date_in(raw, &now.timezone()));

    match parsed {
        None => Status::Undated,
        Some(date) if date < *now => Status::Published,
        Some(_) => Status::Scheduled,
    }
}
