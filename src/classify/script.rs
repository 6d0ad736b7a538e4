//! Script-family detection from Unicode character names.

use crate::model::ScriptSet;

/// Script family of a character: the first word of its Unicode name.
///
/// `'a'` (LATIN SMALL LETTER A) yields `"LATIN"`, `'中'` (CJK UNIFIED
/// IDEOGRAPH-4E2D) yields `"CJK"`. Returns `None` for characters without a
/// resolvable name.
pub fn script_family(c: char) -> Option<String> {
    let name = unicode_names2::name(c)?.to_string();
    name.split_whitespace().next().map(str::to_string)
}

/// Collect the script families of all alphabetic characters in `text`.
///
/// Digits, punctuation and whitespace are ignored, so the set is empty for
/// text without letters.
pub fn detect_scripts(text: &str) -> ScriptSet {
    text.chars()
        .filter(|c| c.is_alphabetic())
        .filter_map(script_family)
        .collect()
}
