//! Per-document statistical baselines.

use crate::model::TextBlock;

/// Font size assumed when a document yields no measurable sizes.
const FALLBACK_FONT_SIZE: f32 = 10.0;

/// Baselines derived once per document and shared read-only by every
/// downstream heuristic, so thresholds adapt to each document instead of
/// using fixed absolute sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentStats {
    /// Mean font size over blocks with a positive size
    pub avg_font_size: f32,

    /// Sample standard deviation of font size (0 below two samples)
    pub font_size_std: f32,

    /// Mean left-edge X coordinate over all blocks
    pub avg_x: f32,
}

impl DocumentStats {
    /// Compute baselines from the full block sequence.
    pub fn from_blocks(blocks: &[TextBlock]) -> Self {
        let sizes: Vec<f32> = blocks
            .iter()
            .map(|b| b.font_size)
            .filter(|s| *s > 0.0)
            .collect();

        let avg_font_size = if sizes.is_empty() {
            FALLBACK_FONT_SIZE
        } else {
            sizes.iter().sum::<f32>() / sizes.len() as f32
        };

        let font_size_std = if sizes.len() < 2 {
            0.0
        } else {
            let variance = sizes
                .iter()
                .map(|s| (s - avg_font_size).powi(2))
                .sum::<f32>()
                / (sizes.len() - 1) as f32;
            variance.sqrt()
        };

        let avg_x = if blocks.is_empty() {
            0.0
        } else {
            blocks.iter().map(|b| b.bbox.left).sum::<f32>() / blocks.len() as f32
        };

        Self {
            avg_font_size,
            font_size_std,
            avg_x,
        }
    }
}
