//! Fragment extraction from PDF documents using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use super::layout::{get_number, PageReader};
use super::options::{ErrorMode, ExtractOptions};
use crate::detect::{pdf_version, pdf_version_from_path};
use crate::error::{Error, Result};
use crate::model::TextFragment;

/// US Letter height, used when a page has no usable MediaBox.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Supplies the text fragments of one document in reading order.
pub trait FragmentSource {
    /// Produce all fragments, grouped by ascending page.
    fn fragments(&self) -> Result<Vec<TextFragment>>;
}

impl FragmentSource for [TextFragment] {
    fn fragments(&self) -> Result<Vec<TextFragment>> {
        Ok(self.to_vec())
    }
}

impl FragmentSource for Vec<TextFragment> {
    fn fragments(&self) -> Result<Vec<TextFragment>> {
        Ok(self.clone())
    }
}

/// Extracts one [`TextFragment`] per text line of a PDF document.
pub struct PdfExtractor {
    doc: LopdfDocument,
    options: ExtractOptions,
}

impl PdfExtractor {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let path = path.as_ref();
        let version = pdf_version_from_path(path)?;
        log::debug!("Opening {} (PDF {})", path.display(), version);

        let doc = LopdfDocument::load(path)?;
        Ok(Self::with_document(doc, options))
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Load a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        pdf_version(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::with_document(doc, options))
    }

    /// Load a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ExtractOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    fn with_document(doc: LopdfDocument, options: ExtractOptions) -> Self {
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; extracted text may be unreadable");
        }
        Self { doc, options }
    }

    /// Get the extraction options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Extract fragments from all selected pages.
    ///
    /// In strict mode the first unreadable page fails the whole document;
    /// in lenient mode it is logged and skipped.
    pub fn extract(&self) -> Result<Vec<TextFragment>> {
        let mut fragments = Vec::new();

        for (page_num, page_id) in self.doc.get_pages() {
            if !self.options.pages.includes(page_num) {
                continue;
            }

            match self.extract_page_id(page_num, page_id) {
                Ok(mut page) => fragments.append(&mut page),
                Err(e) if self.options.error_mode == ErrorMode::Strict => return Err(e),
                Err(e) => log::warn!("Skipping page {}: {}", page_num, e),
            }
        }

        log::debug!("Extracted {} fragments", fragments.len());
        Ok(fragments)
    }

    /// Extract fragments from a single page (1-indexed).
    pub fn extract_page(&self, page_num: u32) -> Result<Vec<TextFragment>> {
        let pages = self.doc.get_pages();
        let page_id = *pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;
        self.extract_page_id(page_num, page_id)
    }

    fn extract_page_id(&self, page_num: u32, page_id: ObjectId) -> Result<Vec<TextFragment>> {
        let (bottom, top) = self.page_bounds(page_id);
        let page_height = top - bottom;
        let blocks = PageReader::new(&self.doc).read_blocks(page_id)?;

        let mut fragments = Vec::new();
        for block in &blocks {
            let y = (top - block.top()).max(0.0);
            for line in &block.lines {
                let raw = line.text();
                let text: String = if self.options.normalize_unicode {
                    raw.trim().nfc().collect()
                } else {
                    raw.trim().to_string()
                };
                if text.is_empty() {
                    continue;
                }

                fragments.push(
                    TextFragment::with_precision(
                        &text,
                        line.font_size,
                        self.options.precision,
                        page_num,
                        y,
                        page_height,
                    )
                    .bold(line.is_bold()),
                );
            }
        }

        Ok(fragments)
    }

    /// Vertical MediaBox bounds `(bottom, top)`, inherited through the page tree.
    fn page_bounds(&self, page_id: ObjectId) -> (f32, f32) {
        let mut node = self.doc.get_dictionary(page_id).ok();
        // Page trees are shallow; the bound guards against Parent cycles
        for _ in 0..32 {
            let Some(dict) = node else { break };

            if let Some(bounds) = dict
                .get(b"MediaBox")
                .ok()
                .and_then(|obj| self.resolve(obj).as_array().ok())
                .and_then(|arr| match arr.as_slice() {
                    [_, y0, _, y1, ..] => Some((get_number(y0)?, get_number(y1)?)),
                    _ => None,
                })
            {
                let (y0, y1) = bounds;
                if (y1 - y0).abs() > 0.0 {
                    return (y0.min(y1), y0.max(y1));
                }
            }

            node = dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .and_then(|r| self.doc.get_dictionary(r))
                .ok();
        }

        (0.0, DEFAULT_PAGE_HEIGHT)
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(obj),
            _ => obj,
        }
    }
}

impl FragmentSource for PdfExtractor {
    fn fragments(&self) -> Result<Vec<TextFragment>> {
        self.extract()
    }
}
