//! Content module - markdown notes and the store they are queried from

mod document;
mod frontmatter;
pub mod loader;
mod markdown;
mod store;

pub use document::Document;
pub use frontmatter::FrontMatter;
pub use markdown::{MarkdownRenderer, EXCERPT_MARKER};
pub use store::{ContentQuery, ContentStore, StoreError};
