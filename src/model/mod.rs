//! Data model for outline extraction.
//!
//! [`TextBlock`] is the unit the whole pipeline operates on: created once by
//! the span ingestor, read by every downstream stage, never mutated.
//! [`DocumentOutline`] is the output record serialized to JSON.

mod block;
mod outline;

pub use block::{BoundingBox, TextBlock};
pub use outline::{
    flatten_outline, to_json, DocumentOutline, HeadingLevel, JsonFormat, OutlineEntry,
};
