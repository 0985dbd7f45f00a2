//! Span ingestion: raw fragments to normalized blocks.
//!
//! The ingestor walks every page's fragments in emission order, normalizes
//! and filters them, and merges continuation fragments into the previously
//! accepted block. The resulting sequence is the document's reading order;
//! nothing downstream reorders it.

use unicode_normalization::UnicodeNormalization;

use crate::analysis::BoilerplateLexicon;
use crate::error::Result;
use crate::model::TextBlock;
use crate::parser::backend::{Fragment, PageSource};

/// Minimum words for a fragment to survive ingestion.
const MIN_FRAGMENT_WORDS: usize = 3;
/// Fragments below this share of the page height are footer noise.
const FOOTER_BAND: f32 = 0.85;
/// Continuation-merge adjacency tolerances.
const MERGE_MAX_VERTICAL_GAP: f32 = 10.0;
const MERGE_MAX_LEFT_DELTA: f32 = 35.0;
const MERGE_MAX_FONT_DELTA: f32 = 1.5;

/// Leading/trailing characters stripped during normalization.
const STRIPPED_PUNCT: &[char] = &['.', ',', ':', ';', '(', ')'];

/// Builds the ordered block sequence from a fragment source.
pub struct SpanIngestor {
    boilerplate: BoilerplateLexicon,
}

impl SpanIngestor {
    pub fn new() -> Self {
        Self {
            boilerplate: BoilerplateLexicon::new(),
        }
    }

    /// Ingest every page of `source` into reading-order blocks.
    pub fn ingest(&self, source: &dyn PageSource) -> Result<Vec<TextBlock>> {
        let mut blocks: Vec<TextBlock> = Vec::new();

        for page_no in 1..=source.page_count() {
            let page_height = source.page_height(page_no)?;
            let footer_y = page_height * FOOTER_BAND;

            for fragment in source.page_fragments(page_no)? {
                let text = normalize_text(&fragment.text);

                if text.is_empty()
                    || text.split_whitespace().count() < MIN_FRAGMENT_WORDS
                    || self.boilerplate.is_boilerplate(&text)
                    || fragment.bbox.top >= footer_y
                {
                    continue;
                }

                let merged = match blocks.last_mut() {
                    Some(prev) if can_merge(prev, &fragment, &text) => {
                        // The first block's box anchors the geometry while
                        // the text grows.
                        prev.text.push(' ');
                        prev.text.push_str(&text);
                        prev.font_size = prev.font_size.max(fragment.font_size);
                        prev.flags = fragment.flags;
                        prev.page = page_no;
                        true
                    }
                    _ => false,
                };

                if !merged {
                    blocks.push(TextBlock::new(
                        text,
                        fragment.font_size,
                        fragment.flags,
                        fragment.bbox,
                        page_no,
                    ));
                }
            }
        }

        log::debug!("ingested {} blocks", blocks.len());
        Ok(blocks)
    }
}

impl Default for SpanIngestor {
    fn default() -> Self {
        Self::new()
    }
}

/// Continuation test against the previously accepted block. Pure
/// alphabetic-and-whitespace candidates are excluded so ordinary body-text
/// continuations are not absorbed into a heading fragment.
fn can_merge(prev: &TextBlock, fragment: &Fragment, text: &str) -> bool {
    (fragment.bbox.top - prev.bbox.bottom).abs() < MERGE_MAX_VERTICAL_GAP
        && (fragment.bbox.left - prev.bbox.left).abs() < MERGE_MAX_LEFT_DELTA
        && (fragment.font_size - prev.font_size).abs() < MERGE_MAX_FONT_DELTA
        && !is_alpha_and_space(text)
}

fn is_alpha_and_space(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

/// Normalize fragment text: NFKC composition, interior space runs collapsed,
/// surrounding whitespace and punctuation stripped. Idempotent.
pub fn normalize_text(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    let collapsed = collapse_spaces(&composed);
    collapsed
        .trim_matches(|c: char| c.is_whitespace() || STRIPPED_PUNCT.contains(&c))
        .to_string()
}

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
