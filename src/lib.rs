//! # pdfoutline
//!
//! Heading outline inference for PDF documents.
//!
//! This library reads the text lines of a PDF, picks a document title and
//! builds a three-level (H1/H2/H3) outline from typography and wording
//! alone, without relying on embedded bookmarks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{outline_file, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let result = outline_file("document.pdf")?;
//!
//!     let json = render::to_json(&result, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Extraction**: one [`TextFragment`] per visual line, with normalized
//!   font size, top-origin position, bold flag and detected scripts
//! - **Classification**: an ordered rule chain decides which fragments are
//!   heading candidates, with per-language keywords and handling for
//!   scripts without letter case
//! - **Profiling**: the three largest of the five most frequent font sizes
//!   become the H1/H2/H3 thresholds
//! - **Assembly**: candidates are leveled and deduplicated in reading order
//! - **Batch**: directories of PDFs are processed in parallel with Rayon

pub mod batch;
pub mod classify;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{run_batch, run_batch_with_progress, BatchItem, BatchOptions, BatchReport};
pub use classify::{ClassifierOptions, HeadingClassifier, HeadingRule, KeywordSet, KeywordTable};
pub use detect::{has_pdf_extension, is_pdf_bytes, pdf_version};
pub use error::{Error, Result};
pub use model::{HeadingLevel, OutlineEntry, OutlineResult, TextFragment};
pub use outline::{select_title, FontProfile, OutlineAssembler};
pub use parser::{ErrorMode, ExtractOptions, FragmentSource, PageSelection, PdfExtractor};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Infer the title and outline of a document from its fragments.
///
/// Fragments must be in reading order. This never fails; an empty slice
/// yields an empty title and outline.
///
/// # Example
///
/// ```
/// use pdfoutline::{extract_outline, HeadingLevel, TextFragment};
///
/// let fragments = vec![TextFragment::new("INTRODUCTION", 24.0, 1, 10.0, 800.0).bold(true)];
/// let result = extract_outline(&fragments);
/// assert_eq!(result.title, "INTRODUCTION");
/// assert_eq!(result.outline[0].level, HeadingLevel::H1);
/// ```
pub fn extract_outline(fragments: &[TextFragment]) -> OutlineResult {
    OutlineAssembler::default().assemble(fragments)
}

/// Infer the outline with custom classifier options.
pub fn extract_outline_with_options(
    fragments: &[TextFragment],
    options: ClassifierOptions,
) -> OutlineResult {
    OutlineAssembler::new(options).assemble(fragments)
}

/// Infer the outline of any fragment source.
pub fn outline_source<S: FragmentSource + ?Sized>(source: &S) -> Result<OutlineResult> {
    Ok(extract_outline(&source.fragments()?))
}

/// Infer the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::outline_file;
///
/// let result = outline_file("document.pdf").unwrap();
/// println!("{}: {} headings", result.title, result.len());
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    Outliner::new().outline_file(path)
}

/// Infer the outline of a PDF file with custom options.
pub fn outline_file_with_options<P: AsRef<Path>>(
    path: P,
    extract: ExtractOptions,
    classifier: ClassifierOptions,
) -> Result<OutlineResult> {
    Outliner::new()
        .with_extract_options(extract)
        .with_classifier_options(classifier)
        .outline_file(path)
}

/// Infer the outline of a PDF held in memory.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::outline_bytes;
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let result = outline_bytes(&data).unwrap();
/// ```
pub fn outline_bytes(data: &[u8]) -> Result<OutlineResult> {
    Outliner::new().outline_bytes(data)
}

/// Builder for extracting outlines from PDF documents.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{KeywordTable, Outliner, PageSelection};
///
/// let result = Outliner::new()
///     .lenient()
///     .with_pages(PageSelection::Range(1..=20))
///     .with_extra_keywords(KeywordTable::load("keywords.json")?)
///     .outline_file("document.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Outliner {
    extract_options: ExtractOptions,
    classifier_options: ClassifierOptions,
    parallel: bool,
}

impl Outliner {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            classifier_options: ClassifierOptions::default(),
            parallel: true,
        }
    }

    /// Skip unreadable pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages);
        self
    }

    /// Set the font size precision.
    pub fn with_precision(mut self, precision: f32) -> Self {
        self.extract_options = self.extract_options.with_precision(precision);
        self
    }

    /// Replace the keyword table.
    pub fn with_keywords(mut self, keywords: KeywordTable) -> Self {
        self.classifier_options = self.classifier_options.with_keywords(keywords);
        self
    }

    /// Merge extra keywords over the current table.
    pub fn with_extra_keywords(mut self, keywords: KeywordTable) -> Self {
        self.classifier_options = self.classifier_options.with_extra_keywords(keywords);
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Set classifier options.
    pub fn with_classifier_options(mut self, options: ClassifierOptions) -> Self {
        self.classifier_options = options;
        self
    }

    /// Process batch documents one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Get the extraction options.
    pub fn extract_options(&self) -> &ExtractOptions {
        &self.extract_options
    }

    /// Get the classifier options.
    pub fn classifier_options(&self) -> &ClassifierOptions {
        &self.classifier_options
    }

    /// Build an assembler from the classifier options.
    pub fn assembler(&self) -> OutlineAssembler {
        OutlineAssembler::new(self.classifier_options.clone())
    }

    /// Infer the outline of a PDF file.
    pub fn outline_file<P: AsRef<Path>>(&self, path: P) -> Result<OutlineResult> {
        let extractor = PdfExtractor::open_with_options(path, self.extract_options.clone())?;
        self.outline_source(&extractor)
    }

    /// Infer the outline of a PDF held in memory.
    pub fn outline_bytes(&self, data: &[u8]) -> Result<OutlineResult> {
        let extractor = PdfExtractor::from_bytes_with_options(data, self.extract_options.clone())?;
        self.outline_source(&extractor)
    }

    /// Infer the outline of a PDF read to the end from `reader`.
    pub fn outline_reader<R: Read>(&self, reader: R) -> Result<OutlineResult> {
        let extractor = PdfExtractor::from_reader_with_options(reader, self.extract_options.clone())?;
        self.outline_source(&extractor)
    }

    /// Infer the outline of any fragment source.
    pub fn outline_source<S: FragmentSource + ?Sized>(&self, source: &S) -> Result<OutlineResult> {
        Ok(self.assembler().assemble(&source.fragments()?))
    }

    /// Process every PDF in `input_dir`, writing JSON files to `output_dir`.
    pub fn run_batch(
        &self,
        input_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        format: JsonFormat,
    ) -> Result<BatchReport> {
        run_batch(&self.batch_options(input_dir, output_dir, format))
    }

    /// Batch options carrying this builder's settings.
    pub fn batch_options(
        &self,
        input_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        format: JsonFormat,
    ) -> BatchOptions {
        let options = BatchOptions::new(input_dir.as_ref(), output_dir.as_ref())
            .with_format(format)
            .with_extract_options(self.extract_options.clone())
            .with_classifier_options(self.classifier_options.clone());
        if self.parallel {
            options
        } else {
            options.sequential()
        }
    }
}

impl Default for Outliner {
    fn default() -> Self {
        Self::new()
    }
}
