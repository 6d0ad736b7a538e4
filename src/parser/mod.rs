//! PDF fragment extraction.

mod extractor;
mod layout;
mod options;

pub use extractor::{FragmentSource, PdfExtractor};
pub use layout::{PageReader, TextBlock, TextLine, TextSpan};
pub use options::{ErrorMode, ExtractOptions, PageSelection};
