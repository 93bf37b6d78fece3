//! Helper functions shared by the content layer, the pipelines and the
//! templates

mod date;
mod text;
mod url;

pub use date::*;
pub use text::*;
pub use url::*;
