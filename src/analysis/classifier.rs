//! Heading classification.
//!
//! Two mandatory gates short-circuit to reject: a heading must introduce
//! subsequent substantive content, and its text must match the closed
//! pattern set. Only then does the weighted score run. A single pattern
//! match contributes 9 points against a threshold of 8, so the secondary
//! signals cannot flip the decision on their own; that dominance is a pinned
//! property of the scoring, not an accident.

use super::lexicon::HeadingLexicon;
use super::stats::DocumentStats;
use crate::model::TextBlock;

/// Minimum words in the block immediately after a heading.
const MIN_FOLLOWING_WORDS: usize = 4;
/// Accepted word-count range for a heading itself.
const MIN_WORDS: usize = 3;
const MAX_WORDS: usize = 30;

/// Weak font-size bonus.
const FONT_SCORE: i32 = 1;
/// Score mass per matched gate pattern.
const PATTERN_SCORE: i32 = 9;
/// Uppercase-ratio bonus.
const CAPS_SCORE: i32 = 2;
/// Upper-page position bonus.
const POSITION_SCORE: i32 = 3;
/// Bonus for vertical separation from the previous block.
const SPACING_SCORE: i32 = 4;
/// Acceptance threshold.
const ACCEPT_THRESHOLD: i32 = 8;

/// Uppercase ratio above which the caps bonus applies.
const CAPS_RATIO_THRESHOLD: f32 = 0.01;
/// Top-y coordinate below which the position bonus applies.
const UPPER_PAGE_Y: f32 = 600.0;
/// Vertical gap above which the spacing bonus applies.
const SPACING_GAP: f32 = 3.0;

/// Decides, per block, whether it is a heading.
pub struct HeadingClassifier {
    lexicon: HeadingLexicon,
}

impl HeadingClassifier {
    pub fn new() -> Self {
        Self {
            lexicon: HeadingLexicon::new(),
        }
    }

    /// Classify one block in context.
    ///
    /// `prev` is the immediately preceding block in reading order (heading
    /// or not), `index` the block's position within `blocks`.
    pub fn is_heading(
        &self,
        block: &TextBlock,
        stats: &DocumentStats,
        prev: Option<&TextBlock>,
        blocks: &[TextBlock],
        index: usize,
    ) -> bool {
        // A heading must be followed by substantive content; the final
        // block can never be one.
        match blocks.get(index + 1) {
            Some(next) if next.word_count() >= MIN_FOLLOWING_WORDS => {}
            _ => return false,
        }

        let mut score = 0;

        if block.font_size > stats.avg_font_size + stats.font_size_std * 0.05 {
            score += FONT_SCORE;
        }

        let matches = self.lexicon.match_count(&block.text);
        score += matches as i32 * PATTERN_SCORE;
        if matches == 0 {
            return false;
        }

        let words = block.word_count();
        if !(MIN_WORDS..=MAX_WORDS).contains(&words) {
            return false;
        }

        if caps_ratio(&block.text) > CAPS_RATIO_THRESHOLD {
            score += CAPS_SCORE;
        }

        if block.bbox.top < UPPER_PAGE_Y {
            score += POSITION_SCORE;
        }

        if let Some(prev) = prev {
            if block.bbox.top - prev.bbox.bottom > SPACING_GAP {
                score += SPACING_SCORE;
            }
        }

        log::debug!(
            "classify p{} '{}': {} pattern match(es), score {}",
            block.page,
            block.text,
            matches,
            score
        );

        score >= ACCEPT_THRESHOLD
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Ratio of uppercase characters to all characters.
fn caps_ratio(text: &str) -> f32 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f32 / total as f32
}
