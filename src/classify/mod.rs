//! Per-fragment heading classification.
//!
//! Script detection and size normalization produce the signals a fragment
//! carries; [`HeadingClassifier`] runs the ordered rule chain that decides
//! whether a fragment is plausible as a heading at all. Level assignment
//! happens later, against the whole-document font profile.

mod keywords;
mod options;
mod rules;
mod script;
mod size;

pub use keywords::{KeywordSet, KeywordTable, NON_CASED_SCRIPTS, TERMINAL_MARKS};
pub use options::ClassifierOptions;
pub use rules::{Decision, HeadingClassifier, HeadingRule, RULE_CHAIN};
pub use script::{detect_scripts, script_family};
pub use size::{normalize_font_size, size_key, DEFAULT_PRECISION};
