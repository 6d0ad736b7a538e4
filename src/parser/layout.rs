//! Layout analysis for PDF pages.
//!
//! Decodes a page content stream into positioned text spans, groups spans
//! into lines by baseline and lines into blocks by spacing. Coordinates here
//! are PDF user space (origin bottom-left); the extractor converts them to
//! top-origin offsets.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// A run of text with position and style information.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated advance width
    pub width: f32,
    /// Font size in points
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font appears to be bold
    pub is_bold: bool,
}

impl TextSpan {
    /// Create a new text span. Boldness is inferred from the font name.
    pub fn new(text: String, x: f32, y: f32, font_size: f32, font_name: String) -> Self {
        let lower = font_name.to_lowercase();
        let is_bold = ["bold", "black", "heavy"].iter().any(|w| lower.contains(w));
        let width = text.chars().map(char_advance).sum::<f32>() * font_size;

        Self {
            text,
            x,
            y,
            width,
            font_size,
            font_name,
            is_bold,
        }
    }
}

/// Spans sharing a baseline.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// The spans in this line, sorted by X position
    pub spans: Vec<TextSpan>,
    /// Y position (baseline)
    pub y: f32,
    /// Leftmost X position
    pub x: f32,
    /// Largest font size in this line
    pub font_size: f32,
}

impl TextLine {
    /// Create a line from spans (must not be empty).
    fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.total_cmp(&b.x));

        let font_size = spans.iter().map(|s| s.font_size).fold(0.0, f32::max);
        let y = spans.iter().map(|s| s.y).fold(f32::MIN, f32::max);
        let x = spans.first().map(|s| s.x).unwrap_or(0.0);

        Self {
            spans,
            y,
            x,
            font_size,
        }
    }

    /// Combined text of all spans.
    ///
    /// A space is inserted where the horizontal gap between spans is wider
    /// than a fifth of a character, except between CJK characters.
    pub fn text(&self) -> String {
        let mut result = String::new();
        let mut prev: Option<&TextSpan> = None;

        for span in &self.spans {
            if let Some(prev) = prev {
                let gap = span.x - (prev.x + prev.width);
                let char_width = span.font_size * 0.5;
                let needs_space = gap > char_width * 0.2
                    && !result.ends_with(char::is_whitespace)
                    && !span.text.starts_with(char::is_whitespace)
                    && !(result.chars().last().is_some_and(is_spaceless_script_char)
                        && span.text.chars().next().is_some_and(is_spaceless_script_char));
                if needs_space {
                    result.push(' ');
                }
            }
            result.push_str(&span.text);
            prev = Some(span);
        }

        result
    }

    /// Check if any span is bold.
    pub fn is_bold(&self) -> bool {
        self.spans.iter().any(|s| s.is_bold)
    }

    /// Approximate top edge (ascender) of the line.
    pub fn top(&self) -> f32 {
        self.y + self.font_size * 0.8
    }
}

/// Consecutive lines forming a paragraph-like block.
#[derive(Debug, Clone)]
pub struct TextBlock {
    /// The lines in this block, top to bottom
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    /// Top edge of the block in PDF user space.
    pub fn top(&self) -> f32 {
        self.lines
            .iter()
            .map(TextLine::top)
            .fold(f32::MIN, f32::max)
    }
}

/// Reads text blocks from the pages of a lopdf document.
pub struct PageReader<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> PageReader<'a> {
    /// Create a page reader.
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Extract text blocks of a page in reading order.
    pub fn read_blocks(&self, page_id: ObjectId) -> Result<Vec<TextBlock>> {
        let spans = self.read_spans(page_id)?;
        let lines = group_spans_into_lines(spans);
        Ok(group_lines_into_blocks(lines))
    }

    /// Extract positioned text spans from a page.
    pub fn read_spans(&self, page_id: ObjectId) -> Result<Vec<TextSpan>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let content = self.doc.get_page_content(page_id)?;
        self.decode_content(&content, &fonts)
    }

    /// Walk the content stream, tracking the text state.
    fn decode_content(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    ) -> Result<Vec<TextSpan>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let font_names: HashMap<&[u8], String> = fonts
            .iter()
            .map(|(key, font)| {
                let base = font
                    .get(b"BaseFont")
                    .ok()
                    .and_then(|o| o.as_name().ok())
                    .map(|n| String::from_utf8_lossy(n).into_owned())
                    .unwrap_or_else(|| String::from_utf8_lossy(key).into_owned());
                (key.as_slice(), base)
            })
            .collect();

        let mut state = TextState::default();
        let mut ctm = TextMatrix::default();
        let mut gs_stack: Vec<TextMatrix> = Vec::new();
        let mut spans = Vec::new();

        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "q" => gs_stack.push(ctm),
                "Q" => match gs_stack.pop() {
                    Some(saved) => ctm = saved,
                    None => log::debug!("Unbalanced Q in content stream"),
                },
                "cm" => {
                    if let Some(m) = matrix_operands(operands) {
                        ctm = m.concat(&ctm);
                    }
                }
                "BT" => {
                    state.in_text = true;
                    state.matrix = TextMatrix::default();
                }
                "ET" => state.in_text = false,
                "Tf" => {
                    if let [Object::Name(name), size, ..] = operands.as_slice() {
                        state.font_key = name.clone();
                        state.font_size = get_number(size).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if let [tx, ty, ..] = operands.as_slice() {
                        let (tx, ty) = (get_number(tx).unwrap_or(0.0), get_number(ty).unwrap_or(0.0));
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = matrix_operands(operands) {
                        state.matrix = m;
                    }
                }
                "T*" => state.matrix.translate(0.0, -state.leading),
                "Tj" | "TJ" | "'" | "\"" => {
                    if matches!(op.operator.as_str(), "'" | "\"") {
                        state.matrix.translate(0.0, -state.leading);
                    }
                    if !state.in_text {
                        continue;
                    }
                    let operand = match op.operator.as_str() {
                        "\"" => operands.get(2),
                        _ => operands.first(),
                    };
                    let font = fonts.get(&state.font_key).copied();
                    let text = match operand {
                        Some(Object::Array(items)) => self.decode_array(items, font),
                        Some(Object::String(bytes, _)) => self.decode_string(bytes, font),
                        _ => String::new(),
                    };
                    if text.trim().is_empty() {
                        continue;
                    }

                    // Text space to device space
                    let rendered = state.matrix.concat(&ctm);
                    let (x, y) = rendered.position();
                    let font_name = font_names
                        .get(state.font_key.as_slice())
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(&state.font_key).into_owned());
                    spans.push(TextSpan::new(
                        text,
                        x,
                        y,
                        state.font_size * rendered.scale(),
                        font_name,
                    ));
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    /// Decode a string operand with the font's encoding when available.
    fn decode_string(&self, bytes: &[u8], font: Option<&Dictionary>) -> String {
        match font.and_then(|f| f.get_font_encoding(self.doc).ok()) {
            Some(encoding) => LopdfDocument::decode_text(&encoding, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }

    /// Decode a `TJ` array. Large negative adjustments (in thousandths of an
    /// em) are word breaks.
    fn decode_array(&self, items: &[Object], font: Option<&Dictionary>) -> String {
        const SPACE_ADJUSTMENT: f32 = 200.0;

        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode_string(bytes, font)),
                other => {
                    let Some(adjustment) = get_number(other) else {
                        continue;
                    };
                    let breaks_word = -adjustment > SPACE_ADJUSTMENT
                        && combined
                            .chars()
                            .last()
                            .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                    if breaks_word {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }
}

/// Text state tracked across content stream operators.
#[derive(Debug, Clone)]
struct TextState {
    in_text: bool,
    font_key: Vec<u8>,
    font_size: f32,
    leading: f32,
    matrix: TextMatrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            in_text: false,
            font_key: Vec::new(),
            font_size: 12.0,
            leading: 12.0,
            matrix: TextMatrix::default(),
        }
    }
}

/// Affine matrix `[a b c d e f]`, used for the text matrix and the CTM.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}

impl TextMatrix {
    fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    /// `self × other`: apply `self` first, then `other`.
    fn concat(&self, other: &TextMatrix) -> TextMatrix {
        TextMatrix::new(
            self.a * other.a + self.b * other.c,
            self.a * other.b + self.b * other.d,
            self.c * other.a + self.d * other.c,
            self.c * other.b + self.d * other.d,
            self.e * other.a + self.f * other.c + other.e,
            self.e * other.b + self.f * other.d + other.f,
        )
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    /// Vertical scale factor applied to the font size.
    fn scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

fn matrix_operands(operands: &[Object]) -> Option<TextMatrix> {
    match operands {
        [a, b, c, d, e, f, ..] => Some(TextMatrix::new(
            get_number(a)?,
            get_number(b)?,
            get_number(c)?,
            get_number(d)?,
            get_number(e)?,
            get_number(f)?,
        )),
        _ => None,
    }
}

/// Horizontal gap, in ems, that separates two columns sharing a baseline.
const COLUMN_GAP_EMS: f32 = 3.0;

/// Group spans into lines by baseline, top to bottom.
///
/// Spans on the same baseline but separated by a column gutter become
/// separate lines, left to right.
pub fn group_spans_into_lines(spans: Vec<TextSpan>) -> Vec<TextLine> {
    group_by_baseline(spans)
        .into_iter()
        .flat_map(split_at_gutters)
        .map(TextLine::from_spans)
        .collect()
}

fn group_by_baseline(mut spans: Vec<TextSpan>) -> Vec<Vec<TextSpan>> {
    // PDF Y grows upwards: sort descending for top-to-bottom order
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y = 0.0;

    for span in spans {
        let tolerance = span.font_size * 0.3;
        if !current.is_empty() && (span.y - current_y).abs() > tolerance {
            lines.push(std::mem::take(&mut current));
        }
        if current.is_empty() {
            current_y = span.y;
        }
        current.push(span);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn split_at_gutters(mut spans: Vec<TextSpan>) -> Vec<Vec<TextSpan>> {
    spans.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut segments: Vec<Vec<TextSpan>> = Vec::new();
    for span in spans {
        let starts_column = segments.last().and_then(|seg| seg.last()).is_some_and(|prev| {
            let gap = span.x - (prev.x + prev.width);
            gap > prev.font_size.max(span.font_size) * COLUMN_GAP_EMS
        });
        if starts_column || segments.is_empty() {
            segments.push(vec![span]);
        } else if let Some(segment) = segments.last_mut() {
            segment.push(span);
        }
    }
    segments
}

/// Group lines into blocks on spacing, size and indentation changes.
pub fn group_lines_into_blocks(lines: Vec<TextLine>) -> Vec<TextBlock> {
    let avg_spacing = average_line_spacing(&lines);

    let mut blocks = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            let breaks = (prev.y - line.y).abs() > avg_spacing * 1.5
                || (prev.font_size - line.font_size).abs() > 1.0
                || (prev.x - line.x).abs() > 20.0;
            if breaks {
                blocks.push(TextBlock {
                    lines: std::mem::take(&mut current),
                });
            }
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(TextBlock { lines: current });
    }

    blocks
}

fn average_line_spacing(lines: &[TextLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

/// Extract a number from a PDF object.
pub(crate) fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Estimated advance of a character in ems: full width for CJK and Hangul,
/// half an em otherwise.
fn char_advance(c: char) -> f32 {
    if is_spaceless_script_char(c) || matches!(c as u32, 0xAC00..=0xD7AF | 0xFF00..=0xFFEF) {
        1.0
    } else {
        0.5
    }
}

/// Check if a character belongs to a script written without word spaces
/// (Chinese and Japanese). Korean uses spaces and is not included.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF        // CJK Unified Ideographs
        | 0x3400..=0x4DBF      // Extension A
        | 0x20000..=0x2EBEF    // Extensions B-F
        | 0x3040..=0x30FF      // Hiragana, Katakana
        | 0x3000..=0x303F      // CJK Symbols and Punctuation
    )
}

/// Decode string bytes without a font encoding: UTF-16BE with BOM, then
/// UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
