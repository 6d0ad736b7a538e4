//! Text fragment type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::classify::{detect_scripts, normalize_font_size, DEFAULT_PRECISION};

/// Set of script-family tags (e.g. `"LATIN"`, `"DEVANAGARI"`, `"CJK"`).
pub type ScriptSet = BTreeSet<String>;

/// One visually coherent line of text with its style and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTextFragment")]
pub struct TextFragment {
    /// Line text, trimmed
    pub text: String,

    /// Normalized font size bucket
    pub font_size: f32,

    /// Page number (1-indexed)
    pub page: u32,

    /// Top of the containing block, measured from the page top
    pub y: f32,

    /// Height of the page in the same units as `y`
    pub page_height: f32,

    /// Whether any contributing style run is bold
    pub is_bold: bool,

    /// Script families present among the alphabetic characters
    pub scripts: ScriptSet,
}

impl TextFragment {
    /// Create a fragment from raw measurements.
    ///
    /// The text is trimmed, the font size is normalized with the default
    /// precision and the scripts are detected from the text.
    pub fn new(text: &str, font_size: f32, page: u32, y: f32, page_height: f32) -> Self {
        Self::with_precision(text, font_size, DEFAULT_PRECISION, page, y, page_height)
    }

    /// Create a fragment, normalizing the font size with a custom precision.
    pub fn with_precision(
        text: &str,
        font_size: f32,
        precision: f32,
        page: u32,
        y: f32,
        page_height: f32,
    ) -> Self {
        let text = text.trim().to_string();
        let scripts = detect_scripts(&text);
        Self {
            text,
            font_size: normalize_font_size(font_size, precision),
            page,
            y,
            page_height,
            is_bold: false,
            scripts,
        }
    }

    /// Set the bold flag.
    pub fn bold(mut self, is_bold: bool) -> Self {
        self.is_bold = is_bold;
        self
    }
}

/// Wire form of a fragment. Deserialized fragments go through
/// [`TextFragment::new`], so text is trimmed, the size is bucketed with the
/// default precision and scripts are re-detected.
#[derive(Deserialize)]
struct RawTextFragment {
    text: String,
    font_size: f32,
    page: u32,
    y: f32,
    page_height: f32,
    #[serde(default)]
    is_bold: bool,
}

impl From<RawTextFragment> for TextFragment {
    fn from(raw: RawTextFragment) -> Self {
        TextFragment::new(&raw.text, raw.font_size, raw.page, raw.y, raw.page_height)
            .bold(raw.is_bold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_normalizes() {
        let frag = TextFragment::new("  Overview \n", 12.2, 1, 50.0, 800.0);
        assert_eq!(frag.text, "Overview");
        assert_eq!(frag.font_size, 12.0);
        assert!(!frag.is_bold);
        assert!(frag.scripts.contains("LATIN"));
    }

    #[test]
    fn test_custom_precision() {
        let frag = TextFragment::with_precision("Title", 13.4, 1.0, 1, 0.0, 800.0);
        assert_eq!(frag.font_size, 13.0);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let json = r#"{"text": "  परिचय ", "font_size": 14.2, "page": 2, "y": 40.0,
            "page_height": 800.0, "is_bold": true, "scripts": ["LATIN"]}"#;
        let frag: TextFragment = serde_json::from_str(json).unwrap();
        assert_eq!(frag.text, "परिचय");
        assert_eq!(frag.font_size, 14.0);
        assert!(frag.is_bold);
        assert!(frag.scripts.contains("DEVANAGARI"));
        assert!(!frag.scripts.contains("LATIN"));
    }

    #[test]
    fn test_serialized_fragment_reads_back() {
        let frag = TextFragment::new("Overview", 18.0, 1, 72.0, 792.0).bold(true);
        let json = serde_json::to_string(&frag).unwrap();
        let back: TextFragment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frag);
    }
}
