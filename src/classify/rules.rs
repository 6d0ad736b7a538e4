//! Ordered heading-candidate rules.
//!
//! A fragment is run through [`RULE_CHAIN`] in order. Each rule either
//! decides (accept or reject) or defers to the next one; the first decision
//! wins. The order matters because the rules overlap: a keyword match, for
//! example, overrides the prose check that follows it but not the length and
//! position checks before it.

use std::fmt;

use super::options::ClassifierOptions;
use crate::model::{ScriptSet, TextFragment};

/// A single step of the heading-candidate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingRule {
    /// Reject empty or long text
    Length,
    /// Reject text in the lower part of the page
    Position,
    /// Accept text containing a heading keyword
    Keyword,
    /// Reject punctuated multi-word text
    Prose,
    /// Scripts without letter case: accept only bold text
    NonCasedScript,
    /// Latin fallback: upper-case, bold, or short title-case
    LatinCase,
}

/// Rules in evaluation order.
pub const RULE_CHAIN: [HeadingRule; 6] = [
    HeadingRule::Length,
    HeadingRule::Position,
    HeadingRule::Keyword,
    HeadingRule::Prose,
    HeadingRule::NonCasedScript,
    HeadingRule::LatinCase,
];

/// Signals of one fragment, as seen by the rules.
struct Candidate<'a> {
    text: &'a str,
    words: usize,
    is_bold: bool,
    y: f32,
    page_height: f32,
    scripts: &'a ScriptSet,
}

impl HeadingRule {
    /// Short rule name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            HeadingRule::Length => "length",
            HeadingRule::Position => "position",
            HeadingRule::Keyword => "keyword",
            HeadingRule::Prose => "prose",
            HeadingRule::NonCasedScript => "non-cased-script",
            HeadingRule::LatinCase => "latin-case",
        }
    }

    /// `Some(true)` accepts, `Some(false)` rejects, `None` defers.
    fn evaluate(self, c: &Candidate<'_>, opts: &ClassifierOptions) -> Option<bool> {
        match self {
            HeadingRule::Length => (c.text.is_empty() || c.words > opts.max_words).then_some(false),
            HeadingRule::Position => (c.y > c.page_height * opts.top_fraction).then_some(false),
            HeadingRule::Keyword => opts.keywords.matches(c.text).then_some(true),
            HeadingRule::Prose => {
                (opts.ends_with_terminal(c.text) && c.words > opts.prose_max_words)
                    .then_some(false)
            }
            HeadingRule::NonCasedScript => {
                let non_cased = c
                    .scripts
                    .iter()
                    .any(|s| opts.non_cased_scripts.iter().any(|n| n == s));
                non_cased.then(|| c.is_bold || opts.keywords.matches_exact(c.text))
            }
            HeadingRule::LatinCase => Some(
                is_upper_text(c.text)
                    || (c.is_bold && c.words <= opts.bold_max_words)
                    || (is_title_text(c.text) && c.words <= opts.title_case_max_words),
            ),
        }
    }
}

impl fmt::Display for HeadingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of classifying one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Whether the fragment is a heading candidate
    pub accepted: bool,
    /// The rule that decided
    pub rule: HeadingRule,
}

/// Decides whether a fragment is plausible as a heading, independent of level.
#[derive(Debug, Clone, Default)]
pub struct HeadingClassifier {
    options: ClassifierOptions,
}

impl HeadingClassifier {
    /// Create a classifier with custom options.
    pub fn new(options: ClassifierOptions) -> Self {
        Self { options }
    }

    /// Get the classifier options.
    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// Classify a fragment.
    pub fn classify(&self, fragment: &TextFragment) -> Decision {
        self.decide(
            &fragment.text,
            fragment.is_bold,
            fragment.y,
            fragment.page_height,
            &fragment.scripts,
        )
    }

    /// Check if a fragment is a heading candidate.
    pub fn is_candidate(&self, fragment: &TextFragment) -> bool {
        self.classify(fragment).accepted
    }

    /// Classify raw fragment signals.
    pub fn decide(
        &self,
        text: &str,
        is_bold: bool,
        y: f32,
        page_height: f32,
        scripts: &ScriptSet,
    ) -> Decision {
        let text = text.trim();
        let candidate = Candidate {
            text,
            words: text.split_whitespace().count(),
            is_bold,
            y,
            page_height,
            scripts,
        };

        for rule in RULE_CHAIN {
            if let Some(accepted) = rule.evaluate(&candidate, &self.options) {
                return Decision { accepted, rule };
            }
        }

        // LatinCase always decides
        Decision {
            accepted: false,
            rule: HeadingRule::LatinCase,
        }
    }
}

/// Upper-case or title-case letter (`ǅ`, `ᾼ`).
fn is_capital(c: char) -> bool {
    c.is_uppercase() || (!c.is_lowercase() && c.to_lowercase().ne(std::iter::once(c)))
}

/// At least one cased character and no lower-case ones.
fn is_upper_text(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if is_capital(c) {
            cased = true;
        }
    }
    cased
}

/// Every word starts upper-case and continues lower-case.
///
/// Upper-case letters may only follow uncased characters and lower-case
/// letters only cased ones, so `"Don't"` and `"HELLO"` are not title-cased.
fn is_title_text(text: &str) -> bool {
    let mut prev_cased = false;
    let mut cased = false;
    for c in text.chars() {
        if is_capital(c) {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            cased = true;
        } else {
            prev_cased = false;
        }
    }
    cased
}
