//! # pdftoc
//!
//! Heuristic PDF outline extraction for Rust.
//!
//! pdftoc infers document structure (a title plus an ordered list of
//! H1/H2/H3 headings with page numbers) from the positioned text of PDF
//! pages. It targets heterogeneous real-world documents (reports, forms,
//! RFPs, syllabi) with no reliable embedded structure metadata, so structure
//! is inferred from text content, typography, and geometry.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdftoc::{extract_file, model};
//!
//! fn main() -> pdftoc::Result<()> {
//!     let outline = extract_file("document.pdf")?;
//!
//!     println!("Title: {}", outline.title);
//!     for entry in &outline.outline {
//!         println!("{} {} (p. {})", entry.level, entry.text, entry.page);
//!     }
//!
//!     let json = model::to_json(&outline, model::JsonFormat::Pretty)?;
//!     std::fs::write("document.json", json)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Span ingestion**: raw positioned fragments are normalized, filtered,
//!   and continuation-merged into reading-order blocks
//! - **Document statistics**: per-document font and margin baselines, so
//!   thresholds adapt to each document
//! - **Title extraction** and **outline building** run as independent
//!   consumers of the same blocks and baselines
//! - **Batch mode**: one worker task per file, failures caught per file
//! - **Evaluation**: set-based precision/recall against reference JSON

pub mod analysis;
pub mod batch;
pub mod detect;
pub mod error;
pub mod eval;
pub mod model;
pub mod parser;

// Re-export commonly used types
pub use analysis::{
    extract_title, DocumentStats, HeadingClassifier, LevelAssigner, OutlineBuilder, UNTITLED,
};
pub use batch::{discover_pdfs, process_directory, BatchOptions, BatchSummary, FileReport};
pub use error::{Error, Result};
pub use eval::{evaluate_directory, evaluate_file, score_outlines, OutlineScores};
pub use model::{
    flatten_outline, BoundingBox, DocumentOutline, HeadingLevel, JsonFormat, OutlineEntry,
    TextBlock,
};
pub use parser::{Fragment, LopdfBackend, PageSource, SpanIngestor};

use std::path::Path;

/// Extract the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdftoc::extract_file;
///
/// let outline = extract_file("report.pdf").unwrap();
/// println!("{} headings", outline.heading_count());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    let backend = LopdfBackend::open(path)?;
    extract_from_source(&backend)
}

/// Extract the outline of a PDF held in memory.
pub fn extract_bytes(data: &[u8]) -> Result<DocumentOutline> {
    let backend = LopdfBackend::from_bytes(data)?;
    extract_from_source(&backend)
}

/// Run the full pipeline against any fragment source.
///
/// Ingestion, statistics, title extraction, and the outline scan are
/// strictly sequential within one document; the statistics are computed once
/// and shared read-only by the downstream stages.
pub fn extract_from_source(source: &dyn PageSource) -> Result<DocumentOutline> {
    let blocks = SpanIngestor::new().ingest(source)?;
    let stats = DocumentStats::from_blocks(&blocks);

    let title = extract_title(&blocks);
    let outline = OutlineBuilder::new().build(&blocks, &stats);

    Ok(DocumentOutline::new(title, flatten_outline(outline)))
}
