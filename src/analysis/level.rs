//! Hierarchy level assignment.
//!
//! Assignment is deterministic but context-dependent: the previously
//! assigned level is one input, threaded through the outline scan as
//! explicit state. The rules are ordered: the H1 conjunction is evaluated
//! first, and the previous-level-was-H1 rule is only the final disjunct of
//! the H2 test, so it never preempts an independent H1 qualification.

use super::lexicon::LevelLexicon;
use super::stats::DocumentStats;
use crate::model::{HeadingLevel, TextBlock};

/// Maximum indentation (vs the document's mean left edge) for an H1.
const H1_MAX_INDENT: f32 = 5.0;
/// Font-size ratio over the document average that qualifies an H1.
const H1_FONT_RATIO: f32 = 1.15;
/// Open indentation interval that qualifies an H2.
const H2_INDENT_MIN: f32 = 5.0;
const H2_INDENT_MAX: f32 = 25.0;

/// Maps an accepted heading to H1/H2/H3.
pub struct LevelAssigner {
    lexicon: LevelLexicon,
}

impl LevelAssigner {
    pub fn new() -> Self {
        Self {
            lexicon: LevelLexicon::new(),
        }
    }

    /// Assign a level given the running previous-level state.
    pub fn assign(
        &self,
        block: &TextBlock,
        stats: &DocumentStats,
        prev_level: HeadingLevel,
    ) -> HeadingLevel {
        let depth = numbering_depth(block.first_token());
        let indent = block.bbox.left - stats.avg_x;

        if depth == 0
            && indent < H1_MAX_INDENT
            && (block.font_size > stats.avg_font_size * H1_FONT_RATIO
                || self.lexicon.is_top_level(&block.text))
        {
            return HeadingLevel::H1;
        }

        if depth == 1
            || (indent > H2_INDENT_MIN && indent < H2_INDENT_MAX)
            || self.lexicon.is_second_level(&block.text)
            || prev_level == HeadingLevel::H1
        {
            return HeadingLevel::H2;
        }

        HeadingLevel::H3
    }
}

impl Default for LevelAssigner {
    fn default() -> Self {
        Self::new()
    }
}

/// Numbering depth: the count of `.` characters in the first
/// whitespace-delimited token ("2.1.3" → 2, "1." → 1, "Overview" → 0).
fn numbering_depth(first_token: &str) -> usize {
    first_token.matches('.').count()
}
