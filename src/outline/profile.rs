//! Font size distribution of a document.

use std::collections::HashMap;

use crate::classify::size_key;
use crate::model::{HeadingLevel, TextFragment};

/// Number of most frequent sizes kept in the profile.
pub const PROFILE_DEPTH: usize = 5;

/// Most common font sizes of a document and the H1/H2/H3 size thresholds.
///
/// Headings are assumed to use some of the document's most common styles
/// rather than simply the largest sizes, so the profile takes the most
/// frequent sizes first and only then orders them by size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontProfile {
    ranked_sizes: Vec<f32>,
    thresholds: [Option<f32>; 3],
}

impl FontProfile {
    /// Build the profile from all fragments of a document.
    pub fn from_fragments(fragments: &[TextFragment]) -> Self {
        Self::from_sizes(fragments.iter().map(|f| f.font_size))
    }

    /// Build the profile from normalized font sizes.
    pub fn from_sizes<I: IntoIterator<Item = f32>>(sizes: I) -> Self {
        // (size, count) in first-seen order
        let mut counts: Vec<(f32, usize)> = Vec::new();
        let mut index: HashMap<u32, usize> = HashMap::new();
        for size in sizes {
            match index.get(&size_key(size)) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(size_key(size), counts.len());
                    counts.push((size, 1));
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(PROFILE_DEPTH);

        let mut ranked_sizes: Vec<f32> = counts.into_iter().map(|(size, _)| size).collect();
        ranked_sizes.sort_by(|a, b| b.total_cmp(a));

        let mut thresholds = [None; 3];
        for (slot, size) in thresholds.iter_mut().zip(&ranked_sizes) {
            *slot = Some(*size);
        }

        log::debug!(
            "Font profile: ranked={:?}, thresholds={:?}",
            ranked_sizes,
            thresholds
        );

        Self {
            ranked_sizes,
            thresholds,
        }
    }

    /// Up to five most frequent sizes, largest first.
    pub fn ranked_sizes(&self) -> &[f32] {
        &self.ranked_sizes
    }

    /// H1, H2 and H3 sizes; `None` where the document has too few sizes.
    pub fn thresholds(&self) -> [Option<f32>; 3] {
        self.thresholds
    }

    /// Heading level whose threshold equals `font_size` exactly.
    pub fn level_for(&self, font_size: f32) -> Option<HeadingLevel> {
        self.thresholds
            .iter()
            .position(|t| *t == Some(font_size))
            .and_then(HeadingLevel::from_rank)
    }
}
