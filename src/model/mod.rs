//! Data model shared by the extractor, the classifier and the renderers.
//!
//! A document is reduced to an ordered list of [`TextFragment`]s (one per
//! visual line) and produces a single [`OutlineResult`].

mod fragment;
mod outline;

pub use fragment::{ScriptSet, TextFragment};
pub use outline::{HeadingLevel, OutlineEntry, OutlineResult};
