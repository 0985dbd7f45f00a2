//! Outline assembly: the single forward scan.

use super::classifier::HeadingClassifier;
use super::level::LevelAssigner;
use super::stats::DocumentStats;
use crate::model::{HeadingLevel, OutlineEntry, TextBlock};

/// Drives one sequential pass over the block sequence, invoking the
/// classifier and level assigner and accumulating the ordered outline.
///
/// Two pieces of running state thread through the scan: the previous block
/// (updated for every block, heading or not) and the previously assigned
/// level (updated only when a heading is emitted, starting at H1). Entries
/// are immutable once appended and the pass never re-sorts.
pub struct OutlineBuilder {
    classifier: HeadingClassifier,
    assigner: LevelAssigner,
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self {
            classifier: HeadingClassifier::new(),
            assigner: LevelAssigner::new(),
        }
    }

    /// Scan `blocks` in reading order and build the outline.
    pub fn build(&self, blocks: &[TextBlock], stats: &DocumentStats) -> Vec<OutlineEntry> {
        let mut outline = Vec::new();
        let mut prev_block: Option<&TextBlock> = None;
        let mut prev_level = HeadingLevel::H1;

        for (index, block) in blocks.iter().enumerate() {
            if self
                .classifier
                .is_heading(block, stats, prev_block, blocks, index)
            {
                let level = self.assigner.assign(block, stats, prev_level);
                outline.push(OutlineEntry::new(level, block.text.trim(), block.page));
                prev_level = level;
            }
            prev_block = Some(block);
        }

        outline
    }
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;

    fn block(text: &str, font_size: f32, top: f32, page: u32) -> TextBlock {
        TextBlock::new(
            text,
            font_size,
            0,
            BoundingBox::new(50.0, top, 350.0, top + font_size),
            page,
        )
    }

    fn body(top: f32, page: u32) -> TextBlock {
        block(
            "Plain paragraph content with a good number of words in it.",
            10.0,
            top,
            page,
        )
    }

    #[test]
    fn test_single_heading_document() {
        let blocks = vec![
            block("1. Introduction to the Program", 14.0, 100.0, 1),
            body(130.0, 1),
        ];
        let stats = DocumentStats::from_blocks(&blocks);
        let outline = OutlineBuilder::new().build(&blocks, &stats);
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].text, "1. Introduction to the Program");
        assert_eq!(outline[0].page, 1);
    }

    #[test]
    fn test_no_headings_yields_empty_outline() {
        let blocks = vec![body(100.0, 1), body(140.0, 1), body(180.0, 1)];
        let stats = DocumentStats::from_blocks(&blocks);
        let outline = OutlineBuilder::new().build(&blocks, &stats);
        assert!(outline.is_empty());
    }

    #[test]
    fn test_levels_thread_through_the_scan() {
        let blocks = vec![
            block("Introduction and Program Scope", 16.0, 80.0, 1),
            body(110.0, 1),
            block("1.1 Background of the Work", 12.0, 200.0, 1),
            body(230.0, 1),
            block("Particulars of previous funding", 10.0, 320.0, 1),
            body(350.0, 1),
        ];
        let stats = DocumentStats::from_blocks(&blocks);
        let outline = OutlineBuilder::new().build(&blocks, &stats);

        let levels: Vec<HeadingLevel> = outline.iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            vec![HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H2]
        );
    }

    #[test]
    fn test_entries_preserve_document_order() {
        let blocks = vec![
            block("Summary of the First Phase", 12.0, 100.0, 1),
            body(130.0, 1),
            block("Background and Prior Work", 12.0, 100.0, 2),
            body(130.0, 2),
        ];
        let stats = DocumentStats::from_blocks(&blocks);
        let outline = OutlineBuilder::new().build(&blocks, &stats);
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0].page, 1);
        assert_eq!(outline[1].page, 2);
    }
}
