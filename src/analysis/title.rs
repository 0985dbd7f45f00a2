//! Title extraction from early-page blocks.

use super::lexicon::TitleLexicon;
use crate::model::TextBlock;

/// Sentinel returned when no candidate qualifies.
pub const UNTITLED: &str = "Untitled";

/// Candidates must sit on the first two pages, above this y.
const CANDIDATE_MAX_TOP: f32 = 250.0;
/// Candidates (and the fallback block) need more words than this.
const MIN_TITLE_WORDS: usize = 4;
/// Vertical window below the first candidate whose members are joined.
const TITLE_Y_WINDOW: f32 = 80.0;
/// Fallback: first page-1 block above this y.
const FALLBACK_MAX_TOP: f32 = 350.0;

/// Select and assemble a document title from the block sequence.
///
/// Qualifying candidates are sorted by (page, top, left) and every
/// candidate within the y-window of the first is concatenated, which stitches
/// multi-line titles back together. Without candidates, the first prominent
/// page-1 block is used; failing that, the sentinel `"Untitled"`.
pub fn extract_title(blocks: &[TextBlock]) -> String {
    let lexicon = TitleLexicon::new();

    let mut candidates: Vec<&TextBlock> = blocks
        .iter()
        .filter(|b| {
            b.page <= 2
                && b.bbox.top < CANDIDATE_MAX_TOP
                && b.word_count() > MIN_TITLE_WORDS
                && lexicon.contains_term(&b.text)
        })
        .collect();

    if !candidates.is_empty() {
        candidates.sort_by(|a, b| {
            a.page
                .cmp(&b.page)
                .then(a.bbox.top.total_cmp(&b.bbox.top))
                .then(a.bbox.left.total_cmp(&b.bbox.left))
        });

        let first_top = candidates[0].bbox.top;
        let joined = candidates
            .iter()
            .filter(|c| (c.bbox.top - first_top).abs() < TITLE_Y_WINDOW)
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        return collapse_spaces(joined.trim());
    }

    // Fallback: first prominent text near the top of page 1.
    for b in blocks {
        if b.page == 1 && b.bbox.top < FALLBACK_MAX_TOP && b.word_count() > MIN_TITLE_WORDS {
            return b.text.clone();
        }
    }

    UNTITLED.to_string()
}

/// Collapse runs of spaces into one.
fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = false;
    for c in text.chars() {
        if c == ' ' {
            if !last_was_space {
                out.push(c);
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;

    fn block_on(text: &str, page: u32, top: f32, left: f32) -> TextBlock {
        TextBlock::new(
            text,
            12.0,
            0,
            BoundingBox::new(left, top, left + 300.0, top + 12.0),
            page,
        )
    }

    #[test]
    fn test_multi_line_title_is_stitched() {
        let blocks = vec![
            block_on("Request for Proposal: Digital Library Initiative", 1, 100.0, 50.0),
            block_on("Prepared by the Ontario Library Foundation", 1, 140.0, 50.0),
            block_on("This document describes the initiative in detail.", 1, 300.0, 50.0),
        ];
        assert_eq!(
            extract_title(&blocks),
            "Request for Proposal: Digital Library Initiative \
             Prepared by the Ontario Library Foundation"
        );
    }

    #[test]
    fn test_candidates_outside_window_are_excluded() {
        let blocks = vec![
            block_on("Request for Proposal: Digital Library Initiative", 1, 100.0, 50.0),
            block_on("Background notes about the library system", 1, 230.0, 50.0),
        ];
        // 130 units apart: only the first joins the title.
        assert_eq!(
            extract_title(&blocks),
            "Request for Proposal: Digital Library Initiative"
        );
    }

    #[test]
    fn test_fallback_to_first_prominent_block() {
        let blocks = vec![
            block_on("An Unrelated Heading With Many Plain Words", 1, 120.0, 50.0),
            block_on("More ordinary text follows below here", 1, 400.0, 50.0),
        ];
        // No vocabulary term anywhere: the first page-1 block above 350
        // with enough words wins.
        assert_eq!(
            extract_title(&blocks),
            "An Unrelated Heading With Many Plain Words"
        );
    }

    #[test]
    fn test_untitled_sentinel() {
        let blocks = vec![block_on("Short text", 1, 500.0, 50.0)];
        assert_eq!(extract_title(&blocks), UNTITLED);
    }

    #[test]
    fn test_sorts_by_page_then_position() {
        let blocks = vec![
            block_on("Overview of the grant application process", 2, 90.0, 50.0),
            block_on("Provincial Library Grant Application Form", 1, 110.0, 50.0),
        ];
        // The page-1 candidate sorts first; the page-2 one is 20 units away
        // in y, inside the window, and follows it.
        let title = extract_title(&blocks);
        assert!(title.starts_with("Provincial Library Grant Application Form"));
        assert!(title.ends_with("Overview of the grant application process"));
    }
}
