//! PDF detection helpers for discovery and validation.

use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Check whether a path carries the `.pdf` extension (case-insensitive).
///
/// Batch discovery is by extension only; the file content is validated later
/// when the document is opened.
pub fn has_pdf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Check whether a byte slice starts with the PDF magic header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.len() >= PDF_MAGIC.len() && &data[..PDF_MAGIC.len()] == PDF_MAGIC
}
