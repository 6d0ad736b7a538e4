//! Integration tests for fragment extraction from real PDF documents.

mod common;

use common::{build_pdf, build_pdf_with, line, line_at, sample_report, MediaBoxOn};
use pdfoutline::{Error, ExtractOptions, FragmentSource, PageSelection, PdfExtractor};

#[test]
fn test_extract_lines_as_fragments() {
    let extractor = PdfExtractor::from_bytes(&sample_report()).unwrap();
    assert_eq!(extractor.page_count(), 2);

    let fragments = extractor.extract().unwrap();
    let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(texts[0], "Annual Report");
    assert_eq!(texts[1], "Goals");
    assert_eq!(fragments.len(), 10);

    // Fragments arrive grouped by ascending page
    let pages: Vec<u32> = fragments.iter().map(|f| f.page).collect();
    assert!(pages.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_fragment_style_signals() {
    let fragments = PdfExtractor::from_bytes(&sample_report())
        .unwrap()
        .extract()
        .unwrap();

    let title = &fragments[0];
    assert_eq!(title.font_size, 24.0);
    assert!(title.is_bold);
    assert!(title.scripts.contains("LATIN"));
    assert_eq!(title.page_height, 792.0);

    let body = &fragments[2];
    assert_eq!(body.font_size, 12.0);
    assert!(!body.is_bold);
}

#[test]
fn test_fragment_y_is_measured_from_top() {
    let fragments = PdfExtractor::from_bytes(&sample_report())
        .unwrap()
        .extract()
        .unwrap();

    // Baseline 740 plus the ascender of a 24pt line, from a 792pt page top
    let expected = 792.0 - (740.0 + 24.0 * 0.8);
    assert!((fragments[0].y - expected).abs() < 0.01);
    assert!(fragments[0].y < fragments[1].y);

    // Lines of one block share the block's top
    assert_eq!(fragments[2].y, fragments[3].y);
    assert_eq!(fragments[3].y, fragments[4].y);
}

#[test]
fn test_media_box_inherited_from_page_tree() {
    let pdf = build_pdf_with(
        &[vec![line("Heading", 20, true, 800)]],
        842,
        MediaBoxOn::PageTree,
    );
    let fragments = PdfExtractor::from_bytes(&pdf).unwrap().extract().unwrap();
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].page_height, 842.0);
    assert!((fragments[0].y - (842.0 - 816.0)).abs() < 0.01);
}

#[test]
fn test_graphics_transform_scales_and_moves_text() {
    let pdf = build_pdf(&[vec![
        line("Annual Report", 24, true, 740),
        line("this is a long line of ordinary body text", 12, false, 640),
        line("Closing Remarks", 32, true, 650).transformed([0.75, 0.0, 0.0, 0.75, 0.0, -237.5]),
        line("Back To Normal", 18, true, 600),
    ]]);
    let fragments = PdfExtractor::from_bytes(&pdf).unwrap().extract().unwrap();

    let closing = fragments.iter().find(|f| f.text == "Closing Remarks").unwrap();
    assert_eq!(closing.font_size, 24.0);
    // Drawn at baseline 650 * 0.75 - 237.5 = 250
    let expected = 792.0 - (250.0 + 24.0 * 0.8);
    assert!((closing.y - expected).abs() < 0.01);

    // Q restores the identity transform for later text
    let after = fragments.iter().find(|f| f.text == "Back To Normal").unwrap();
    assert_eq!(after.font_size, 18.0);
    assert!((after.y - (792.0 - (600.0 + 18.0 * 0.8))).abs() < 0.01);
}

#[test]
fn test_two_columns_on_one_baseline() {
    let pdf = build_pdf(&[vec![
        line_at("Results", 14, true, 72, 700),
        line_at("the measured values are listed below", 10, false, 320, 700),
    ]]);
    let fragments = PdfExtractor::from_bytes(&pdf).unwrap().extract().unwrap();

    assert_eq!(fragments.len(), 2);
    let heading = fragments.iter().find(|f| f.text == "Results").unwrap();
    assert_eq!(heading.font_size, 14.0);
    assert!(heading.is_bold);
    assert!(fragments
        .iter()
        .any(|f| f.text == "the measured values are listed below" && !f.is_bold));
}

#[test]
fn test_page_selection() {
    let options = ExtractOptions::new().with_pages(PageSelection::parse("2").unwrap());
    let extractor = PdfExtractor::from_bytes_with_options(&sample_report(), options).unwrap();
    let fragments = extractor.extract().unwrap();

    assert_eq!(fragments.len(), 5);
    assert!(fragments.iter().all(|f| f.page == 2));
    assert_eq!(fragments[0].text, "Mission");
}

#[test]
fn test_extract_single_page() {
    let extractor = PdfExtractor::from_bytes(&sample_report()).unwrap();
    let page = extractor.extract_page(2).unwrap();
    assert_eq!(page[0].text, "Mission");

    assert!(matches!(
        extractor.extract_page(3),
        Err(Error::PageOutOfRange(3, 2))
    ));
}

#[test]
fn test_precision_option() {
    let pdf = build_pdf(&[vec![line("Coarse Buckets", 13, true, 700)]]);
    let options = ExtractOptions::new().with_precision(2.0);
    let fragments = PdfExtractor::from_bytes_with_options(&pdf, options)
        .unwrap()
        .extract()
        .unwrap();
    // 13 / 2 = 6.5 rounds half to even
    assert_eq!(fragments[0].font_size, 12.0);
}

#[test]
fn test_fragment_source_trait() {
    let extractor = PdfExtractor::from_bytes(&sample_report()).unwrap();
    let via_trait = extractor.fragments().unwrap();
    assert_eq!(via_trait, extractor.extract().unwrap());
}

#[test]
fn test_empty_page_yields_no_fragments() {
    let pdf = build_pdf(&[vec![]]);
    let fragments = PdfExtractor::from_bytes(&pdf).unwrap().extract().unwrap();
    assert!(fragments.is_empty());
}

#[test]
fn test_open_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, sample_report()).unwrap();

    let extractor = PdfExtractor::open(&path).unwrap();
    assert_eq!(extractor.page_count(), 2);

    let missing = PdfExtractor::open(dir.path().join("missing.pdf"));
    assert!(matches!(missing, Err(Error::Io(_))));
}

#[test]
fn test_reject_non_pdf_input() {
    assert!(matches!(
        PdfExtractor::from_bytes(b"PK\x03\x04 zip archive"),
        Err(Error::UnknownFormat)
    ));
    assert!(matches!(
        PdfExtractor::from_bytes(b"%PDF-x.y\n"),
        Err(Error::UnsupportedVersion(_))
    ));
}
