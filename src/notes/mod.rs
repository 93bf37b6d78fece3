//! Notes pipelines: what gets listed, what gets a page, and the navigation
//! shared by every page.
//!
//! Every function here is pure over its inputs. The current time is always a
//! parameter so builds are reproducible in tests.

pub mod header;
pub mod listing;
pub mod post;
pub mod publish;

pub use header::{Header, NavLink};
pub use listing::{listing, notes_listing, ListingEntry};
pub use post::{lookup, PostPage};
pub use publish::{is_not_draft, is_past_dated, is_publishable, status, Status};
