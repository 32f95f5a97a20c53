//! Service layer
//!
//! Pure transformations applied to documents on their way back to callers.

pub mod tag_formatter;

pub use tag_formatter::{format_tags, namespace_for_query, normalize};
