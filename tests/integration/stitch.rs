//! Integration tests for stitch-then-annotate.

use std::path::{Path, PathBuf};

use pdfnum::ops::stitch_and_process;
use pdfnum::stitch::concat_documents;

use rstest::rstest;
use tempfile::tempdir;

use crate::common::{create_test_pdf, create_test_pdf_with_size, page_count, page_labels, rect_x_per_page};

/// Files in `dir` named `stitched_<ts>-n.pdf`.
fn stitched_outputs(dir: &Path) -> Vec<PathBuf> {
    stitched_files(dir, true)
}

/// Intermediate files in `dir` named `stitched_<ts>.pdf`.
fn stitched_intermediates(dir: &Path) -> Vec<PathBuf> {
    stitched_files(dir, false)
}

fn stitched_files(dir: &Path, annotated: bool) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                return false;
            };
            name.starts_with("stitched_") && name.ends_with("-n.pdf") == annotated
        })
        .collect()
}

#[test]
fn stitches_all_pdfs_into_one_numbered_output() {
    let dir = tempdir().unwrap();
    create_test_pdf(&dir.path().join("a.pdf"), 1);
    create_test_pdf(&dir.path().join("b.pdf"), 1);

    stitch_and_process(dir.path()).unwrap();

    let outputs = stitched_outputs(dir.path());
    assert_eq!(outputs.len(), 1, "expected exactly one stitched output");
    assert_eq!(page_count(&outputs[0]), 2);
    assert_eq!(
        page_labels(&outputs[0]),
        vec![vec!["1".to_string()], vec!["2".to_string()]]
    );
}

#[test]
fn intermediate_stitched_file_is_removed() {
    let dir = tempdir().unwrap();
    create_test_pdf(&dir.path().join("a.pdf"), 1);
    create_test_pdf(&dir.path().join("b.pdf"), 2);

    stitch_and_process(dir.path()).unwrap();

    assert!(stitched_intermediates(dir.path()).is_empty());
}

#[rstest]
#[case(vec![2, 3, 1], 6)]
#[case(vec![4], 4)]
#[case(vec![1, 1, 1, 1], 4)]
fn stitched_page_count_is_the_sum(#[case] per_file: Vec<u32>, #[case] expected: usize) {
    let dir = tempdir().unwrap();
    let paths: Vec<PathBuf> = per_file
        .iter()
        .enumerate()
        .map(|(i, pages)| {
            let path = dir.path().join(format!("doc_{i}.pdf"));
            create_test_pdf(&path, *pages);
            path
        })
        .collect();

    let merged = concat_documents(&paths).unwrap();
    assert_eq!(merged.get_pages().len(), expected);
}

#[test]
fn stitch_order_is_lexicographic_by_file_name() {
    let dir = tempdir().unwrap();
    // Created out of order; discovery must sort them.
    create_test_pdf(&dir.path().join("b.pdf"), 1);
    create_test_pdf_with_size(&dir.path().join("a.pdf"), 1, 200.0, 400.0);

    stitch_and_process(dir.path()).unwrap();

    let outputs = stitched_outputs(dir.path());
    assert_eq!(outputs.len(), 1);
    // a.pdf's narrow page must come first: its rect sits at 200 - 70.
    let xs = rect_x_per_page(&outputs[0]);
    assert_eq!(xs.len(), 2);
    assert!((xs[0] - 130.0).abs() < 1e-3, "first page rect x was {}", xs[0]);
    assert!((xs[1] - 542.0).abs() < 1e-3, "second page rect x was {}", xs[1]);
}

#[test]
fn pages_keep_their_own_dimensions() {
    let dir = tempdir().unwrap();
    create_test_pdf_with_size(&dir.path().join("a.pdf"), 1, 612.0, 792.0);
    create_test_pdf_with_size(&dir.path().join("b.pdf"), 1, 300.0, 500.0);

    stitch_and_process(dir.path()).unwrap();

    let outputs = stitched_outputs(dir.path());
    let xs = rect_x_per_page(&outputs[0]);
    assert!((xs[0] - 542.0).abs() < 1e-3);
    assert!((xs[1] - 230.0).abs() < 1e-3);
}

#[test]
fn empty_directory_reports_and_creates_nothing() {
    let dir = tempdir().unwrap();

    stitch_and_process(dir.path()).unwrap();

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn previous_outputs_are_not_stitched_again() {
    let dir = tempdir().unwrap();
    create_test_pdf(&dir.path().join("a.pdf"), 1);

    stitch_and_process(dir.path()).unwrap();

    // Rerunning must ignore the first run's stitched_*-n.pdf output. The
    // timestamp names only have second precision, so the rerun may
    // overwrite rather than add; what matters is the page count stays 1.
    stitch_and_process(dir.path()).unwrap();
    for output in stitched_outputs(dir.path()) {
        assert_eq!(page_count(&output), 1);
    }
}
