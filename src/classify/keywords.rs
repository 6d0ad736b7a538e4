//! Multilingual heading keywords and script configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Script families without letter case. Case-based heading cues are
/// meaningless for them.
pub const NON_CASED_SCRIPTS: &[&str] = &["DEVANAGARI", "CJK", "ARABIC", "HANGUL"];

/// Sentence-terminal marks (full stop and Devanagari danda).
pub const TERMINAL_MARKS: &[char] = &['.', '\u{0964}'];

const ENGLISH: &[&str] = &[
    "goals",
    "overview",
    "objectives",
    "summary",
    "mission",
    "requirements",
    "pathway",
];

const HINDI: &[&str] = &["परिचय", "लक्ष्य", "उद्देश्य", "सारांश", "मिशन"];

/// Keywords for one language.
///
/// Deserialization goes through [`KeywordSet::new`], so case-insensitive
/// words are lowercased and blank words are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawKeywordSet")]
pub struct KeywordSet {
    /// Match against the raw text instead of the lowercased text
    #[serde(default)]
    pub case_sensitive: bool,

    /// Keywords, matched as substrings
    pub words: Vec<String>,
}

impl KeywordSet {
    /// Create a keyword set. Case-insensitive words are stored lowercased.
    pub fn new<I, S>(words: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words
            .into_iter()
            .map(|w| {
                let w: String = w.into();
                if case_sensitive {
                    w
                } else {
                    w.to_lowercase()
                }
            })
            .collect();
        Self {
            case_sensitive,
            words,
        }
    }

    /// Check `text` (raw) or `lowered` (its lowercase form) for a keyword.
    fn matches(&self, text: &str, lowered: &str) -> bool {
        let haystack = if self.case_sensitive { text } else { lowered };
        self.words.iter().any(|w| haystack.contains(w.as_str()))
    }
}

#[derive(Deserialize)]
struct RawKeywordSet {
    #[serde(default)]
    case_sensitive: bool,
    words: Vec<String>,
}

impl TryFrom<RawKeywordSet> for KeywordSet {
    type Error = String;

    fn try_from(raw: RawKeywordSet) -> std::result::Result<Self, Self::Error> {
        if raw.words.iter().any(|w| w.trim().is_empty()) {
            return Err("empty keyword".to_string());
        }
        Ok(KeywordSet::new(raw.words, raw.case_sensitive))
    }
}

/// Keyword sets keyed by language tag (e.g. `"en"`, `"hi"`).
///
/// Deserializes from a JSON object such as
/// `{"de": {"case_sensitive": false, "words": ["ziele", "überblick"]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordTable {
    sets: BTreeMap<String, KeywordSet>,
}

impl KeywordTable {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self {
            sets: BTreeMap::new(),
        }
    }

    /// Built-in English and Hindi keywords.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.insert("en", KeywordSet::new(ENGLISH.iter().copied(), false));
        table.insert("hi", KeywordSet::new(HINDI.iter().copied(), true));
        table
    }

    /// Parse a table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("keyword table: {}", e)))
    }

    /// Load a table from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Add or replace the set for a language tag.
    pub fn insert(&mut self, tag: impl Into<String>, set: KeywordSet) {
        self.sets.insert(tag.into(), set);
    }

    /// Merge another table into this one; its sets replace same-tag sets.
    pub fn merge(&mut self, other: KeywordTable) {
        self.sets.extend(other.sets);
    }

    /// Get the set for a language tag.
    pub fn get(&self, tag: &str) -> Option<&KeywordSet> {
        self.sets.get(tag)
    }

    /// Language tags in the table.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Check whether `text` contains any keyword, honouring each set's case mode.
    pub fn matches(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.sets.values().any(|set| set.matches(text, &lowered))
    }

    /// Check whether `text` contains any keyword verbatim, regardless of the
    /// set's case mode.
    pub fn matches_exact(&self, text: &str) -> bool {
        self.sets
            .values()
            .flat_map(|set| set.words.iter())
            .any(|w| text.contains(w.as_str()))
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_case_insensitive_english() {
        let table = KeywordTable::builtin();
        assert!(table.matches("Project OVERVIEW"));
        assert!(table.matches("our mission statement"));
        assert!(table.matches("Requirements"));
        assert!(!table.matches("Introduction"));
    }

    #[test]
    fn test_builtin_hindi() {
        let table = KeywordTable::builtin();
        assert!(table.matches("परियोजना का परिचय"));
        assert!(table.matches("सारांश"));
        assert!(!table.matches("अध्याय"));
    }

    #[test]
    fn test_matches_exact_is_case_sensitive() {
        let table = KeywordTable::builtin();
        assert!(table.matches_exact("overview of work"));
        assert!(!table.matches_exact("OVERVIEW"));
        assert!(table.matches_exact("लक्ष्य"));
    }

    #[test]
    fn test_case_sensitive_set() {
        let mut table = KeywordTable::empty();
        table.insert("de", KeywordSet::new(["Ziele"], true));
        assert!(table.matches("Unsere Ziele"));
        assert!(!table.matches("unsere ziele"));
    }

    #[test]
    fn test_from_json_and_merge() {
        let json = r#"{"de": {"words": ["Überblick", "Ziele"]}}"#;
        let extra = KeywordTable::from_json(json).unwrap();
        let de = extra.get("de").unwrap();
        assert!(!de.case_sensitive);
        assert_eq!(de.words, vec!["überblick", "ziele"]);

        let mut table = KeywordTable::builtin();
        table.merge(extra);
        assert_eq!(table.languages().collect::<Vec<_>>(), vec!["de", "en", "hi"]);
        assert!(table.matches("ÜBERBLICK"));
    }

    #[test]
    fn test_serde_deserialize_lowercases() {
        let json = r#"{"en": {"words": ["OVERVIEW"]}, "de": {"case_sensitive": true, "words": ["Ziele"]}}"#;
        let table: KeywordTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.get("en").unwrap().words, vec!["overview"]);
        assert_eq!(table.get("de").unwrap().words, vec!["Ziele"]);
        assert!(table.matches("Project Overview"));

        let set: KeywordSet = serde_json::from_str(r#"{"words": ["Résumé"]}"#).unwrap();
        assert_eq!(set, KeywordSet::new(["résumé"], false));
        assert!(serde_json::from_str::<KeywordSet>(r#"{"words": [""]}"#).is_err());
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            KeywordTable::from_json("[1, 2]"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            KeywordTable::from_json(r#"{"en": {"words": ["  "]}}"#),
            Err(Error::Config(_))
        ));
    }
}
