//! Outline output types and JSON rendering.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Heading hierarchy depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Mid-level heading
    H2,
    /// Low-level heading
    H3,
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeadingLevel::H1 => write!(f, "H1"),
            HeadingLevel::H2 => write!(f, "H2"),
            HeadingLevel::H3 => write!(f, "H3"),
        }
    }
}

/// One heading record in the extracted outline.
///
/// Entries are created during the outline scan and never revised afterward.
/// The `children` field exists for upstream tooling that produces nested
/// entries; it is never serialized and [`flatten_outline`] discards it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Hierarchy level
    pub level: HeadingLevel,

    /// Heading text, copied from the source block
    pub text: String,

    /// 1-based page number
    pub page: u32,

    /// Nested child entries, if an upstream producer nests
    #[serde(skip)]
    pub children: Vec<OutlineEntry>,
}

impl OutlineEntry {
    /// Create a new flat outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
            children: Vec::new(),
        }
    }
}

/// The structured result for one document: title plus ordered outline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title, or `"Untitled"` if no candidate qualified
    #[serde(default)]
    pub title: String,

    /// Ordered heading entries; empty outline serializes as `[]`
    #[serde(default)]
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// Create a new document outline.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Number of headings in the outline.
    pub fn heading_count(&self) -> usize {
        self.outline.len()
    }
}

/// Flatten nested entries into document order via pre-order traversal.
///
/// Each parent is emitted before its children and the nesting field is
/// discarded. On already-flat input this is an identity transform.
pub fn flatten_outline(entries: Vec<OutlineEntry>) -> Vec<OutlineEntry> {
    let mut flat = Vec::with_capacity(entries.len());
    for mut entry in entries {
        let children = std::mem::take(&mut entry.children);
        flat.push(entry);
        flat.extend(flatten_outline(children));
    }
    flat
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with 4-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    match format {
        JsonFormat::Pretty => {
            let mut buf = Vec::new();
            let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
            outline
                .serialize(&mut ser)
                .map_err(|e| Error::Json(e.to_string()))?;
            String::from_utf8(buf).map_err(|e| Error::Json(e.to_string()))
        }
        JsonFormat::Compact => {
            serde_json::to_string(outline).map_err(|e| Error::Json(e.to_string()))
        }
    }
}
