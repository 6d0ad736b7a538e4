//! Integration tests for directory batch processing.

mod common;

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{build_pdf, line, sample_report};
use pdfoutline::{
    run_batch, run_batch_with_progress, BatchOptions, HeadingLevel, JsonFormat, OutlineResult,
    Outliner,
};

fn setup_input(dir: &std::path::Path) {
    fs::write(dir.join("report.pdf"), sample_report()).unwrap();
    fs::write(
        dir.join("memo.PDF"),
        build_pdf(&[vec![
            line("Memo", 20, true, 740),
            line("short message for the whole team", 12, false, 700),
        ]]),
    )
    .unwrap();
    fs::write(dir.join("notes.txt"), "not a pdf").unwrap();
}

#[test]
fn test_batch_writes_one_json_per_pdf() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    setup_input(input.path());

    let out_dir = output.path().join("nested/out");
    let report = run_batch(&BatchOptions::new(input.path(), &out_dir)).unwrap();

    assert_eq!(report.items.len(), 2);
    assert!(report.all_succeeded());

    let json = fs::read_to_string(out_dir.join("report.json")).unwrap();
    let result: OutlineResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result.title, "Annual Report");
    assert_eq!(result.entries_at(HeadingLevel::H2).count(), 2);

    let memo: OutlineResult =
        serde_json::from_str(&fs::read_to_string(out_dir.join("memo.json")).unwrap()).unwrap();
    assert_eq!(memo.title, "Memo");

    assert!(!out_dir.join("notes.json").exists());
}

#[test]
fn test_batch_reports_failures_and_continues() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    setup_input(input.path());
    fs::write(input.path().join("broken.pdf"), "plain text with a pdf name").unwrap();

    let options = BatchOptions::new(input.path(), output.path()).sequential();
    let report = run_batch(&options).unwrap();

    // Items are in file name order: broken, memo, report
    assert_eq!(report.items.len(), 3);
    assert_eq!(report.succeeded(), 2);
    assert!(!report.all_succeeded());

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].input.ends_with("broken.pdf"));
    assert!(!output.path().join("broken.json").exists());

    let written: Vec<usize> = report.successes().map(|(_, out)| out.entries).collect();
    assert_eq!(written, vec![1, 4]);
}

#[test]
fn test_batch_progress_callback() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    setup_input(input.path());

    let calls = AtomicUsize::new(0);
    let report = run_batch_with_progress(&BatchOptions::new(input.path(), output.path()), |_| {
        calls.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), report.items.len());
}

#[test]
fn test_batch_compact_format() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    setup_input(input.path());

    let report = Outliner::new()
        .sequential()
        .run_batch(input.path(), output.path(), JsonFormat::Compact)
        .unwrap();
    assert!(report.all_succeeded());

    let json = fs::read_to_string(output.path().join("memo.json")).unwrap();
    assert!(!json.contains('\n'));
    assert!(json.starts_with(r#"{"title":"Memo","#));
}

#[test]
fn test_batch_empty_directory() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let report = run_batch(&BatchOptions::new(input.path(), output.path())).unwrap();
    assert!(report.items.is_empty());
    assert!(report.all_succeeded());
}

#[test]
fn test_empty_batch_still_creates_output_dir() {
    let input = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let output = root.path().join("nested").join("out");

    let options = BatchOptions::new(input.path(), output.clone());
    assert!(pdfoutline::batch::prepare(&options).unwrap().is_empty());
    assert!(output.is_dir());

    let report = run_batch(&BatchOptions::new(input.path(), root.path().join("other"))).unwrap();
    assert!(report.items.is_empty());
    assert!(root.path().join("other").is_dir());
}
