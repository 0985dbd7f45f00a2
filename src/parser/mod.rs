//! Document access and span ingestion.

mod backend;
mod ingest;

pub use backend::{Fragment, LopdfBackend, PageSource, FLAG_BOLD, FLAG_ITALIC};
pub use ingest::{normalize_text, SpanIngestor};
