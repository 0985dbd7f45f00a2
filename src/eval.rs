//! Evaluation of produced outlines against reference outlines.
//!
//! Comparison is set-based over heading text only: levels and pages are
//! ignored and duplicate texts collapse. Missing or malformed files are
//! warnings, never fatal to a batch of evaluations.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::DocumentOutline;

/// Precision/recall for one produced-vs-reference pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineScores {
    /// |produced ∩ reference| / |produced|, 0 when produced is empty
    pub precision: f64,

    /// |produced ∩ reference| / |reference|, 0 when reference is empty
    pub recall: f64,
}

/// Score a produced outline against a reference outline.
pub fn score_outlines(produced: &DocumentOutline, reference: &DocumentOutline) -> OutlineScores {
    let produced_set: HashSet<&str> = produced.outline.iter().map(|e| e.text.as_str()).collect();
    let reference_set: HashSet<&str> = reference.outline.iter().map(|e| e.text.as_str()).collect();

    let true_pos = produced_set.intersection(&reference_set).count();

    let precision = if produced_set.is_empty() {
        0.0
    } else {
        true_pos as f64 / produced_set.len() as f64
    };
    let recall = if reference_set.is_empty() {
        0.0
    } else {
        true_pos as f64 / reference_set.len() as f64
    };

    OutlineScores { precision, recall }
}

/// Evaluate one produced file against its reference file.
///
/// Returns `None` (with a warning) when either file is missing or fails to
/// parse as outline JSON.
pub fn evaluate_file<P: AsRef<Path>, Q: AsRef<Path>>(
    produced_path: P,
    reference_path: Q,
) -> Option<OutlineScores> {
    let produced = read_outline(produced_path.as_ref(), "output")?;
    let reference = read_outline(reference_path.as_ref(), "reference")?;
    Some(score_outlines(&produced, &reference))
}

fn read_outline(path: &Path, role: &str) -> Option<DocumentOutline> {
    if !path.exists() {
        log::warn!("{} file not found, skipping: {}", role, path.display());
        return None;
    }
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("failed to read {} file {}: {}", role, path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&data) {
        Ok(outline) => Some(outline),
        Err(e) => {
            log::warn!(
                "failed to parse {} file {} as JSON, skipping: {}",
                role,
                path.display(),
                e
            );
            None
        }
    }
}

/// Evaluate every reference `*.json` in `reference_dir` against the file of
/// the same name in `output_dir`. Returns `(file name, scores)` pairs in
/// name order; unscorable pairs carry `None`.
pub fn evaluate_directory<P: AsRef<Path>, Q: AsRef<Path>>(
    output_dir: P,
    reference_dir: Q,
) -> Result<Vec<(String, Option<OutlineScores>)>> {
    let output_dir = output_dir.as_ref();

    let mut names: Vec<String> = fs::read_dir(reference_dir.as_ref())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("json"))
                    .unwrap_or(false)
        })
        .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| {
            let scores = evaluate_file(
                output_dir.join(&name),
                reference_dir.as_ref().join(&name),
            );
            (name, scores)
        })
        .collect())
}
