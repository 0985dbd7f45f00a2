//! Batch processing of a directory of PDF files.
//!
//! One task per file runs the whole pipeline on a fixed-size worker pool.
//! Documents share no mutable state, so a failure is caught at its own
//! file's boundary and recorded; every sibling still completes and writes
//! its output. Result gathering preserves submission order regardless of
//! completion order.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::model::{to_json, JsonFormat};

/// Outcome for one input file: heading count on success, a descriptive
/// message on a caught failure.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Input file name (no directory)
    pub file_name: String,

    /// Heading count, or the failure message
    pub outcome: std::result::Result<usize, String>,
}

impl FileReport {
    /// Whether the file was processed and written.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// One log line in the original batch format.
    pub fn log_line(&self) -> String {
        match &self.outcome {
            Ok(count) => format!("Processed {} (Headings found: {})", self.file_name, count),
            Err(msg) => format!("Error processing {}: {} (Skipping invalid PDF)", self.file_name, msg),
        }
    }
}

/// Aggregate result of one batch run, reports in submission order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Per-file reports, in submission order
    pub reports: Vec<FileReport>,

    /// Total headings across successful files
    pub total_headings: usize,

    /// Wall-clock duration of the batch
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Number of files that failed.
    pub fn failure_count(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_success()).count()
    }
}

/// Options for a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Worker count override; defaults to half the available parallel units
    pub workers: Option<usize>,
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the worker-pool size.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers.max(1));
        self
    }
}

/// Default worker count: half the available parallel units, minimum 1.
pub fn default_worker_count() -> usize {
    let parallelism = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (parallelism / 2).max(1)
}

/// Discover PDF files (by extension) in a directory, in name order.
pub fn discover_pdfs<P: AsRef<Path>>(input_dir: P) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_pdf_extension(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Process every PDF in `input_dir`, writing one JSON file per document
/// into `output_dir`.
pub fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
) -> Result<BatchSummary> {
    let started = Instant::now();
    let output_dir = output_dir.as_ref();

    let files = discover_pdfs(input_dir)?;
    if files.is_empty() {
        log::warn!("no PDF documents found, nothing to do");
        return Ok(BatchSummary::default());
    }

    fs::create_dir_all(output_dir)?;

    let workers = options.workers.unwrap_or_else(default_worker_count);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| Error::Other(format!("failed to build worker pool: {e}")))?;

    log::info!("processing {} file(s) on {} worker(s)", files.len(), workers);

    // Ordered collect is the gather barrier: results come back in
    // submission order whatever the completion order was.
    let reports: Vec<FileReport> = pool.install(|| {
        files
            .par_iter()
            .map(|path| process_single_file(path, output_dir))
            .collect()
    });

    let total_headings = reports
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok())
        .sum();

    Ok(BatchSummary {
        reports,
        total_headings,
        elapsed: started.elapsed(),
    })
}

/// Run the pipeline for one file and write its JSON output. Any error is
/// converted into the report's failure message, never propagated.
fn process_single_file(path: &Path, output_dir: &Path) -> FileReport {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let outcome = extract_and_write(path, output_dir);
    if let Err(msg) = &outcome {
        log::warn!("{file_name}: {msg}");
    }

    FileReport { file_name, outcome }
}

fn extract_and_write(path: &Path, output_dir: &Path) -> std::result::Result<usize, String> {
    let outline = crate::extract_file(path).map_err(|e| e.to_string())?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let json = to_json(&outline, JsonFormat::Pretty).map_err(|e| e.to_string())?;
    fs::write(output_dir.join(format!("{stem}.json")), json).map_err(|e| e.to_string())?;

    Ok(outline.heading_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_worker_count_is_at_least_one() {
        assert!(default_worker_count() >= 1);
    }

    #[test]
    fn test_batch_options_floor() {
        let options = BatchOptions::new().with_workers(0);
        assert_eq!(options.workers, Some(1));
    }

    #[test]
    fn test_log_line_formats() {
        let ok = FileReport {
            file_name: "a.pdf".into(),
            outcome: Ok(3),
        };
        assert_eq!(ok.log_line(), "Processed a.pdf (Headings found: 3)");

        let err = FileReport {
            file_name: "b.pdf".into(),
            outcome: Err("PDF parsing error: bad xref".into()),
        };
        assert!(err.log_line().starts_with("Error processing b.pdf"));
        assert!(!ok.log_line().contains("Error"));
    }
}
