//! Integration tests for batch processing and evaluation.

use std::fs;
use std::path::Path;

use pdftoc::{evaluate_directory, evaluate_file, process_directory, BatchOptions};

/// Build a minimal single-page PDF with a heading line and a body line,
/// with a correct cross-reference table.
fn minimal_pdf(heading: &str, body: &str) -> Vec<u8> {
    let stream = format!(
        "BT /F1 14 Tf 72 700 Td ({heading}) Tj 0 -40 Td /F1 10 Tf ({body}) Tj ET"
    );
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    for (i, obj) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, obj));
    }

    let xref_offset = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    pdf.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        pdf.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF",
        objects.len() + 1,
        xref_offset
    ));

    pdf.into_bytes()
}

fn write_corpus(input_dir: &Path) {
    for i in 1..=5 {
        let pdf = minimal_pdf(
            &format!("{i}. Introduction to Part {i}"),
            "This paragraph has more than four words in it for sure",
        );
        fs::write(input_dir.join(format!("file{i:02}.pdf")), pdf).unwrap();
    }
    // One corrupt document among the valid ones.
    fs::write(input_dir.join("file99.pdf"), b"not a pdf at all").unwrap();
}

#[test]
fn test_corrupt_file_does_not_abort_batch() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    fs::create_dir(&input).unwrap();
    write_corpus(&input);

    let summary = process_directory(&input, &output, &BatchOptions::new()).unwrap();

    assert_eq!(summary.reports.len(), 6);
    assert_eq!(summary.failure_count(), 1);

    // Submission order is name order; the corrupt file sorts last.
    let last = summary.reports.last().unwrap();
    assert_eq!(last.file_name, "file99.pdf");
    assert!(!last.is_success());
    assert!(last.log_line().starts_with("Error processing file99.pdf"));

    // Every valid document wrote its own output.
    for i in 1..=5 {
        let path = output.join(format!("file{i:02}.json"));
        assert!(path.exists(), "missing {}", path.display());

        let parsed: pdftoc::DocumentOutline =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.heading_count(), 1);
        assert_eq!(parsed.outline[0].page, 1);
    }
    assert!(!output.join("file99.json").exists());
    assert_eq!(summary.total_headings, 5);
}

#[test]
fn test_empty_input_directory_is_a_notice_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    fs::create_dir(&input).unwrap();

    let summary = process_directory(&input, &output, &BatchOptions::new()).unwrap();

    assert!(summary.reports.is_empty());
    assert_eq!(summary.total_headings, 0);
    // Nothing to write, so the output directory is never created.
    assert!(!output.exists());
}

#[test]
fn test_discovery_is_by_extension_only() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    fs::create_dir(&input).unwrap();

    fs::write(
        input.join("doc.pdf"),
        minimal_pdf(
            "1. Introduction to the Program",
            "This paragraph has more than four words in it for sure",
        ),
    )
    .unwrap();
    fs::write(input.join("notes.txt"), b"plain text, not discovered").unwrap();
    fs::write(input.join("UPPER.PDF"), b"discovered but invalid").unwrap();

    let summary = process_directory(&input, &output, &BatchOptions::new()).unwrap();

    let names: Vec<&str> = summary
        .reports
        .iter()
        .map(|r| r.file_name.as_str())
        .collect();
    assert_eq!(names, vec!["UPPER.PDF", "doc.pdf"]);
}

#[test]
fn test_evaluation_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    let reference = dir.path().join("reference");
    fs::create_dir(&input).unwrap();
    fs::create_dir(&reference).unwrap();

    for i in 1..=2 {
        let pdf = minimal_pdf(
            &format!("{i}. Introduction to Part {i}"),
            "This paragraph has more than four words in it for sure",
        );
        fs::write(input.join(format!("file{i:02}.pdf")), pdf).unwrap();
    }
    process_directory(&input, &output, &BatchOptions::new().with_workers(1)).unwrap();

    // References: one exact copy, one disjoint, one malformed.
    fs::copy(output.join("file01.json"), reference.join("file01.json")).unwrap();
    fs::write(
        reference.join("file02.json"),
        r#"{"title": "Other", "outline": [{"level": "H1", "text": "Nothing shared", "page": 1}]}"#,
    )
    .unwrap();
    fs::write(reference.join("file03.json"), "{ not json").unwrap();

    let results = evaluate_directory(&output, &reference).unwrap();
    assert_eq!(results.len(), 3);

    let (name, scores) = &results[0];
    assert_eq!(name, "file01.json");
    let scores = scores.unwrap();
    assert_eq!(scores.precision, 1.0);
    assert_eq!(scores.recall, 1.0);

    let (_, scores) = &results[1];
    let scores = scores.unwrap();
    assert_eq!(scores.precision, 0.0);
    assert_eq!(scores.recall, 0.0);

    // Malformed reference (and no produced file03.json): skipped, not fatal.
    assert!(results[2].1.is_none());
}

#[test]
fn test_evaluate_file_missing_produced_output() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("ref.json");
    fs::write(&reference, r#"{"title": "T", "outline": []}"#).unwrap();

    let scores = evaluate_file(dir.path().join("missing.json"), &reference);
    assert!(scores.is_none());
}
