//! Title selection and outline construction.

use std::collections::HashSet;

use super::profile::FontProfile;
use crate::classify::{ClassifierOptions, HeadingClassifier};
use crate::model::{HeadingLevel, OutlineEntry, OutlineResult, TextFragment};

/// Pick the document title.
///
/// The title is the largest fragment on page 1, taking the topmost (then the
/// earliest) on ties. Without page-1 fragments the first fragment of the
/// document is used; an empty document has an empty title.
pub fn select_title(fragments: &[TextFragment]) -> String {
    fragments
        .iter()
        .filter(|f| f.page == 1)
        .min_by(|a, b| {
            b.font_size
                .total_cmp(&a.font_size)
                .then(a.y.total_cmp(&b.y))
        })
        .or_else(|| fragments.first())
        .map(|f| f.text.clone())
        .unwrap_or_default()
}

/// Builds a leveled, deduplicated outline from a document's fragments.
#[derive(Debug, Clone, Default)]
pub struct OutlineAssembler {
    classifier: HeadingClassifier,
}

impl OutlineAssembler {
    /// Create an assembler with custom classifier options.
    pub fn new(options: ClassifierOptions) -> Self {
        Self::with_classifier(HeadingClassifier::new(options))
    }

    /// Create an assembler around an existing classifier.
    pub fn with_classifier(classifier: HeadingClassifier) -> Self {
        Self { classifier }
    }

    /// Get the heading classifier.
    pub fn classifier(&self) -> &HeadingClassifier {
        &self.classifier
    }

    /// Infer the title and outline of one document.
    ///
    /// `fragments` must be in reading order (page ascending, then line order).
    pub fn assemble(&self, fragments: &[TextFragment]) -> OutlineResult {
        if fragments.is_empty() {
            return OutlineResult::new();
        }

        let title = select_title(fragments);
        let profile = FontProfile::from_fragments(fragments);

        let mut outline = Vec::new();
        let mut seen: HashSet<(String, HeadingLevel)> = HashSet::new();

        for fragment in fragments {
            let decision = self.classifier.classify(fragment);
            if !decision.accepted {
                continue;
            }

            let Some(level) = profile.level_for(fragment.font_size) else {
                log::debug!(
                    "Candidate '{}' (size {}) matches no level threshold",
                    fragment.text,
                    fragment.font_size
                );
                continue;
            };

            if !seen.insert((fragment.text.to_lowercase(), level)) {
                continue;
            }

            log::debug!(
                "{} '{}' on page {} (rule: {})",
                level,
                fragment.text,
                fragment.page,
                decision.rule
            );
            outline.push(OutlineEntry::new(level, fragment.text.clone(), fragment.page));
        }

        OutlineResult { title, outline }
    }
}
