//! Text block and geometry types.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in top-down page coordinates.
///
/// `top` is the distance from the top edge of the page, so a block near the
/// page head has a small `top` and a footer block has a large one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge X coordinate
    pub left: f32,

    /// Top edge Y coordinate (top of page = 0)
    pub top: f32,

    /// Right edge X coordinate
    pub right: f32,

    /// Bottom edge Y coordinate
    pub bottom: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// A normalized unit of text with position, size, and page.
///
/// Blocks are produced once by the span ingestor, in reading order, and are
/// never reordered or mutated by later stages. A block may be the result of
/// merging several raw fragments; once merged it is one immutable unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    /// Normalized text content
    pub text: String,

    /// Font size in points
    pub font_size: f32,

    /// Opaque style bits carried through from the source fragment
    pub flags: u32,

    /// Position on the page
    pub bbox: BoundingBox,

    /// 1-based page number
    pub page: u32,
}

impl TextBlock {
    /// Create a new text block.
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        flags: u32,
        bbox: BoundingBox,
        page: u32,
    ) -> Self {
        Self {
            text: text.into(),
            font_size,
            flags,
            bbox,
            page,
        }
    }

    /// Number of whitespace-delimited words in the text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// First whitespace-delimited token, or `""` for empty text.
    pub fn first_token(&self) -> &str {
        self.text.split_whitespace().next().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_dimensions() {
        let bbox = BoundingBox::new(50.0, 100.0, 250.0, 120.0);
        assert_eq!(bbox.width(), 200.0);
        assert_eq!(bbox.height(), 20.0);
    }

    #[test]
    fn test_word_count() {
        let block = TextBlock::new("One two  three", 12.0, 0, BoundingBox::default(), 1);
        assert_eq!(block.word_count(), 3);
    }

    #[test]
    fn test_first_token() {
        let block = TextBlock::new("2.1.3 Scope of Work", 12.0, 0, BoundingBox::default(), 1);
        assert_eq!(block.first_token(), "2.1.3");

        let empty = TextBlock::new("", 12.0, 0, BoundingBox::default(), 1);
        assert_eq!(empty.first_token(), "");
    }
}
