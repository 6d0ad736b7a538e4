//! Batch processing of PDF directories.
//!
//! Every `.pdf` file in the input directory produces one `<stem>.json` file
//! in the output directory. Documents are independent, so they are processed
//! on the rayon pool unless sequential mode is requested; one failing
//! document does not stop the batch.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::classify::ClassifierOptions;
use crate::detect::has_pdf_extension;
use crate::error::Result;
use crate::outline::OutlineAssembler;
use crate::parser::{ExtractOptions, PdfExtractor};
use crate::render::{to_json, JsonFormat};

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned for PDF files
    pub input_dir: PathBuf,

    /// Directory receiving the JSON files
    pub output_dir: PathBuf,

    /// JSON layout
    pub format: JsonFormat,

    /// Process documents in parallel
    pub parallel: bool,

    /// Fragment extraction options
    pub extract: ExtractOptions,

    /// Heading classifier options
    pub classifier: ClassifierOptions,
}

impl BatchOptions {
    /// Create batch options for an input and output directory.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            format: JsonFormat::Pretty,
            parallel: true,
            extract: ExtractOptions::default(),
            classifier: ClassifierOptions::default(),
        }
    }

    /// Set the JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set classifier options.
    pub fn with_classifier_options(mut self, options: ClassifierOptions) -> Self {
        self.classifier = options;
        self
    }
}

/// Outcome for one input document.
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Input PDF path
    pub input: PathBuf,

    /// Written JSON path, or the error message
    pub outcome: std::result::Result<BatchOutput, String>,
}

/// A successfully written outline.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// Written JSON path
    pub path: PathBuf,

    /// Number of outline entries
    pub entries: usize,
}

impl BatchItem {
    /// Check if the document was processed.
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Summary of a batch run, in input file order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One item per input document
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    /// Number of documents processed successfully.
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.is_ok()).count()
    }

    /// Items that were written.
    pub fn successes(&self) -> impl Iterator<Item = (&BatchItem, &BatchOutput)> {
        self.items
            .iter()
            .filter_map(|i| i.outcome.as_ref().ok().map(|out| (i, out)))
    }

    /// Items that failed.
    pub fn failures(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|i| !i.is_ok())
    }

    /// Check if every document succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.items.iter().all(BatchItem::is_ok)
    }
}

/// List the PDF files of a directory, sorted by name.
pub fn find_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// JSON output path for an input document: same stem, `.json` extension.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let name = input.file_name().map(Path::new).unwrap_or(input);
    output_dir.join(name.with_extension("json"))
}

/// List the input PDFs and create the output directory.
///
/// The output directory exists afterwards even when there is nothing to
/// process.
pub fn prepare(options: &BatchOptions) -> Result<Vec<PathBuf>> {
    let inputs = find_pdfs(&options.input_dir)?;
    fs::create_dir_all(&options.output_dir)?;
    Ok(inputs)
}

/// Run a batch without progress reporting.
pub fn run_batch(options: &BatchOptions) -> Result<BatchReport> {
    run_batch_with_progress(options, |_| {})
}

/// Run a batch, calling `progress` after each document finishes.
///
/// Fails only if the input directory cannot be read or the output directory
/// cannot be created; per-document failures are recorded in the report.
pub fn run_batch_with_progress<F>(options: &BatchOptions, progress: F) -> Result<BatchReport>
where
    F: Fn(&BatchItem) + Sync,
{
    let inputs = prepare(options)?;
    log::info!(
        "Processing {} PDF(s) from {}",
        inputs.len(),
        options.input_dir.display()
    );

    let assembler = OutlineAssembler::new(options.classifier.clone());
    let process = |input: &PathBuf| {
        let outcome = process_document(input, options, &assembler).map_err(|e| e.to_string());
        let item = BatchItem {
            input: input.clone(),
            outcome,
        };
        match &item.outcome {
            Ok(out) => log::info!("{} -> {}", input.display(), out.path.display()),
            Err(e) => log::warn!("Failed to process {}: {}", input.display(), e),
        }
        progress(&item);
        item
    };

    let items = if options.parallel {
        inputs.par_iter().map(process).collect()
    } else {
        inputs.iter().map(process).collect()
    };

    Ok(BatchReport { items })
}

fn process_document(
    input: &Path,
    options: &BatchOptions,
    assembler: &OutlineAssembler,
) -> Result<BatchOutput> {
    let extractor = PdfExtractor::open_with_options(input, options.extract.clone())?;
    let fragments = extractor.extract()?;
    let result = assembler.assemble(&fragments);

    let path = output_path_for(input, &options.output_dir);
    fs::write(&path, to_json(&result, options.format)?)?;

    Ok(BatchOutput {
        path,
        entries: result.len(),
    })
}
