//! Classifier configuration.

use super::keywords::{KeywordTable, NON_CASED_SCRIPTS, TERMINAL_MARKS};

/// Thresholds and lexical data for heading candidate classification.
#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    /// Fragments with more words than this are never headings
    pub max_words: usize,

    /// Fragments below this fraction of the page height are never headings
    pub top_fraction: f32,

    /// Punctuated text with more words than this is treated as prose
    pub prose_max_words: usize,

    /// Word limit for bold Latin-script headings
    pub bold_max_words: usize,

    /// Word limit for title-cased Latin-script headings
    pub title_case_max_words: usize,

    /// Sentence-terminal marks
    pub terminal_marks: Vec<char>,

    /// Heading keywords by language
    pub keywords: KeywordTable,

    /// Script families without letter case
    pub non_cased_scripts: Vec<String>,
}

impl ClassifierOptions {
    /// Create new classifier options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum word count.
    pub fn with_max_words(mut self, words: usize) -> Self {
        self.max_words = words;
        self
    }

    /// Set the top-of-page fraction (clamped to `0.0..=1.0`).
    pub fn with_top_fraction(mut self, fraction: f32) -> Self {
        self.top_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Replace the keyword table.
    pub fn with_keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords = keywords;
        self
    }

    /// Merge extra keyword sets over the current table.
    pub fn with_extra_keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords.merge(keywords);
        self
    }

    /// Add a script family to the non-cased set.
    pub fn with_non_cased_script(mut self, script: impl Into<String>) -> Self {
        let script = script.into().to_uppercase();
        if !self.non_cased_scripts.contains(&script) {
            self.non_cased_scripts.push(script);
        }
        self
    }

    /// Check if `text` ends with a sentence-terminal mark.
    pub fn ends_with_terminal(&self, text: &str) -> bool {
        text.chars()
            .next_back()
            .is_some_and(|c| self.terminal_marks.contains(&c))
    }
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            max_words: 10,
            top_fraction: 0.60,
            prose_max_words: 4,
            bold_max_words: 10,
            title_case_max_words: 6,
            terminal_marks: TERMINAL_MARKS.to_vec(),
            keywords: KeywordTable::builtin(),
            non_cased_scripts: NON_CASED_SCRIPTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
