//! Layout analysis for PDF pages.
//!
//! Interprets a page content stream into positioned text spans, then groups
//! the spans into the block → line → span hierarchy the page walker reads.
//! Coordinates are converted to a top-left origin so that `y` grows down the
//! page.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::model::Rect;

/// Span flag: superscript.
pub const SPAN_FLAG_SUPERSCRIPT: u32 = 1 << 0;
/// Span flag: italic.
pub const SPAN_FLAG_ITALIC: u32 = 1 << 1;
/// Span flag: serif font.
pub const SPAN_FLAG_SERIF: u32 = 1 << 2;
/// Span flag: monospaced font.
pub const SPAN_FLAG_MONOSPACE: u32 = 1 << 3;
/// Span flag: bold.
pub const SPAN_FLAG_BOLD: u32 = 1 << 4;

/// Ascender/descender approximations as a fraction of the font size.
const ASCENT: f32 = 0.8;
const DESCENT: f32 = 0.2;
/// Baseline tolerance when grouping spans into a line (fraction of font size).
const LINE_Y_TOLERANCE: f32 = 0.3;
/// Horizontal gap, in font sizes, that splits one baseline into separate lines.
const LINE_GAP_FACTOR: f32 = 3.0;
/// TJ adjustment (thousandths of an em) treated as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A run of text sharing one font, size and style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Style bits (`SPAN_FLAG_*`)
    pub flags: u32,
    /// Base font name (e.g., "Helvetica-Bold")
    pub font: String,
    /// Baseline origin (x, y)
    pub origin: (f32, f32),
    /// Span bounding box
    pub bbox: Rect,
}

impl TextSpan {
    /// Create a span whose box is derived from its baseline origin, width and size.
    pub fn new(text: impl Into<String>, font: impl Into<String>, size: f32, flags: u32, origin: (f32, f32), width: f32) -> Self {
        let (x, baseline) = origin;
        Self {
            text: text.into(),
            size,
            flags,
            font: font.into(),
            origin,
            bbox: Rect::new(x, baseline - size * ASCENT, x + width, baseline + size * DESCENT),
        }
    }

    pub fn is_bold(&self) -> bool {
        self.flags & SPAN_FLAG_BOLD != 0
    }

    pub fn is_italic(&self) -> bool {
        self.flags & SPAN_FLAG_ITALIC != 0
    }

    pub fn baseline(&self) -> f32 {
        self.origin.1
    }

    pub fn width(&self) -> f32 {
        self.bbox.width()
    }

    /// Whether the span shows only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A physical line: spans sharing a baseline with no wide horizontal gap.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Spans in reading order
    pub spans: Vec<TextSpan>,
    /// Line bounding box
    pub bbox: Rect,
}

impl TextLine {
    /// Build a line from spans already in reading order.
    pub fn from_spans(spans: Vec<TextSpan>) -> Self {
        let bbox = Rect::union_all(spans.iter().map(|s| &s.bbox)).unwrap_or_default();
        Self { spans, bbox }
    }

    fn baseline(&self) -> f32 {
        self.spans.first().map(TextSpan::baseline).unwrap_or(self.bbox.bottom)
    }
}

/// A group of vertically adjacent lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
    pub bbox: Rect,
}

impl TextBlock {
    pub fn from_lines(lines: Vec<TextLine>) -> Self {
        let bbox = Rect::union_all(lines.iter().map(|l| &l.bbox)).unwrap_or_default();
        Self { lines, bbox }
    }
}

/// Structured text of one page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextPage {
    pub width: f32,
    pub height: f32,
    pub blocks: Vec<TextBlock>,
}

impl TextPage {
    /// Group raw spans into blocks and lines in reading order.
    pub fn from_spans(spans: &[TextSpan], width: f32, height: f32) -> Self {
        let lines = group_spans_into_lines(spans.to_vec());
        Self {
            width,
            height,
            blocks: group_lines_into_blocks(lines),
        }
    }

    /// Iterate over all lines of all blocks in order.
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }
}

/// Font resources needed while interpreting a content stream.
struct FontInfo<'a> {
    dict: &'a Dictionary,
    base_font: String,
    flags: u32,
    widths: Option<WidthTable>,
}

/// Glyph widths of a simple font, in thousandths of an em.
struct WidthTable {
    first_char: i64,
    widths: Vec<f32>,
    missing_width: f32,
}

impl WidthTable {
    fn width_of(&self, code: u8) -> f32 {
        let idx = i64::from(code) - self.first_char;
        if idx < 0 {
            return self.missing_width;
        }
        self.widths
            .get(idx as usize)
            .copied()
            .unwrap_or(self.missing_width)
    }
}

/// Affine transform `[a b c d e f]` as used by PDF operators.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_operands(operands: &[Object]) -> Option<Matrix> {
        if operands.len() < 6 {
            return None;
        }
        Some(Matrix {
            a: get_number(&operands[0])?,
            b: get_number(&operands[1])?,
            c: get_number(&operands[2])?,
            d: get_number(&operands[3])?,
            e: get_number(&operands[4])?,
            f: get_number(&operands[5])?,
        })
    }

    fn translation(tx: f32, ty: f32) -> Matrix {
        Matrix {
            e: tx,
            f: ty,
            ..Matrix::IDENTITY
        }
    }

    /// `self × other`
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text object state (text matrix, line matrix, font selection).
struct TextState {
    tm: Matrix,
    tlm: Matrix,
    leading: f32,
    font_key: Vec<u8>,
    font_size: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            tm: Matrix::IDENTITY,
            tlm: Matrix::IDENTITY,
            leading: 0.0,
            font_key: Vec::new(),
            font_size: 12.0,
        }
    }
}

impl TextState {
    fn begin_text(&mut self) {
        self.tm = Matrix::IDENTITY;
        self.tlm = Matrix::IDENTITY;
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.tlm = Matrix::translation(tx, ty).multiply(&self.tlm);
        self.tm = self.tlm;
    }

    fn next_line(&mut self) {
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            // Writers that omit TL usually rely on a 12pt default.
            12.0
        };
        self.move_line(0.0, -leading);
    }

    fn advance(&mut self, tx: f32) {
        self.tm = Matrix::translation(tx, 0.0).multiply(&self.tm);
    }
}

/// Extracts positioned spans from page content streams.
pub struct LayoutAnalyzer<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> LayoutAnalyzer<'a> {
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Interpret a decoded content stream into spans.
    ///
    /// `page_box` is the page's media box `[x0, y0, x1, y1]` in PDF user space;
    /// it anchors the conversion to top-left coordinates.
    pub fn extract_spans(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &'a Dictionary>,
        page_box: [f32; 4],
    ) -> crate::Result<Vec<TextSpan>> {
        let content = lopdf::content::Content::decode(content)
            .map_err(|e| crate::Error::PdfParse(e.to_string()))?;

        let font_infos: HashMap<&[u8], FontInfo<'a>> = fonts
            .iter()
            .map(|(name, dict)| (name.as_slice(), self.font_info(dict)))
            .collect();

        let mut spans = Vec::new();
        let mut ctm = Matrix::IDENTITY;
        let mut ctm_stack: Vec<Matrix> = Vec::new();
        let mut state = TextState::default();
        let mut in_text_block = false;

        for op in &content.operations {
            let operands = op.operands.as_slice();
            match op.operator.as_str() {
                "q" => ctm_stack.push(ctm),
                "Q" => {
                    if let Some(saved) = ctm_stack.pop() {
                        ctm = saved;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        ctm = m.multiply(&ctm);
                    }
                }
                "BT" => {
                    in_text_block = true;
                    state.begin_text();
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if operands.len() >= 2 {
                        if let Object::Name(name) = &operands[0] {
                            state.font_key = name.clone();
                        }
                        state.font_size = get_number(&operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if operands.len() >= 2 {
                        let tx = get_number(&operands[0]).unwrap_or(0.0);
                        let ty = get_number(&operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.move_line(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        state.tm = m;
                        state.tlm = m;
                    }
                }
                "T*" => state.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        state.next_line();
                    }
                    if !in_text_block {
                        continue;
                    }
                    let font = font_infos.get(state.font_key.as_slice());
                    let shown = match op.operator.as_str() {
                        "TJ" => operands.first().map(|o| self.show_array(o, font, state.font_size)),
                        "\"" => operands.get(2).map(|o| self.show_string(o, font, state.font_size)),
                        _ => operands.first().map(|o| self.show_string(o, font, state.font_size)),
                    };
                    let Some((text, advance)) = shown else {
                        continue;
                    };

                    let trm = state.tm.multiply(&ctm);
                    let size = (state.font_size * trm.vertical_scale()).abs();
                    if !text.is_empty() && size > 0.0 {
                        let origin = (trm.e - page_box[0], page_box[3] - trm.f);
                        let width = advance * trm.horizontal_scale();
                        let (font_name, flags) = font
                            .map(|f| (f.base_font.clone(), f.flags))
                            .unwrap_or_else(|| {
                                (String::from_utf8_lossy(&state.font_key).to_string(), 0)
                            });
                        spans.push(TextSpan::new(text, font_name, size, flags, origin, width));
                    }
                    state.advance(advance);
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    /// Decode one string operand; returns the text and its advance in text space.
    fn show_string(&self, operand: &Object, font: Option<&FontInfo<'_>>, font_size: f32) -> (String, f32) {
        match operand {
            Object::String(bytes, _) => {
                let text = self.decode(font, bytes);
                let advance = string_advance(font, bytes, &text, font_size);
                (text, advance)
            }
            _ => (String::new(), 0.0),
        }
    }

    /// Decode a TJ array, turning large negative adjustments into word spaces.
    fn show_array(&self, operand: &Object, font: Option<&FontInfo<'_>>, font_size: f32) -> (String, f32) {
        let Object::Array(items) = operand else {
            return (String::new(), 0.0);
        };

        let mut combined = String::new();
        let mut advance = 0.0;
        for item in items {
            match item {
                Object::String(bytes, _) => {
                    let text = self.decode(font, bytes);
                    advance += string_advance(font, bytes, &text, font_size);
                    combined.push_str(&text);
                }
                Object::Integer(_) | Object::Real(_) => {
                    let adjustment = -get_number(item).unwrap_or(0.0);
                    advance += adjustment / 1000.0 * font_size;
                    if adjustment > TJ_SPACE_THRESHOLD && needs_space_after(&combined) {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        (combined, advance)
    }

    fn decode(&self, font: Option<&FontInfo<'_>>, bytes: &[u8]) -> String {
        if let Some(encoding) = font.and_then(|f| f.dict.get_font_encoding(self.doc).ok()) {
            if let Ok(text) = LopdfDocument::decode_text(&encoding, bytes) {
                return text;
            }
        }
        decode_text_simple(bytes)
    }

    fn font_info(&self, dict: &'a Dictionary) -> FontInfo<'a> {
        let base_font = dict
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let descriptor = dict
            .get(b"FontDescriptor")
            .ok()
            .and_then(|o| self.resolve(o))
            .and_then(|o| o.as_dict().ok());
        let descriptor_flags = descriptor
            .and_then(|d| d.get(b"Flags").ok())
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(0);

        let is_type0 = dict
            .get(b"Subtype")
            .ok()
            .and_then(|o| o.as_name().ok())
            .is_some_and(|n| n == b"Type0");
        let widths = if is_type0 {
            None
        } else {
            self.width_table(dict, descriptor)
        };

        FontInfo {
            dict,
            flags: span_flags(&base_font, descriptor_flags),
            base_font,
            widths,
        }
    }

    fn width_table(&self, dict: &'a Dictionary, descriptor: Option<&'a Dictionary>) -> Option<WidthTable> {
        let first_char = dict.get(b"FirstChar").ok()?.as_i64().ok()?;
        let widths = self
            .resolve(dict.get(b"Widths").ok()?)?
            .as_array()
            .ok()?
            .iter()
            .map(|w| self.resolve(w).and_then(get_number).unwrap_or(0.0))
            .collect();
        let missing_width = descriptor
            .and_then(|d| d.get(b"MissingWidth").ok())
            .and_then(get_number)
            .filter(|w| *w > 0.0)
            .unwrap_or(500.0);
        Some(WidthTable {
            first_char,
            widths,
            missing_width,
        })
    }

    fn resolve(&self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok(),
            other => Some(other),
        }
    }
}

/// Map font name hints and descriptor flags onto span style bits.
fn span_flags(base_font: &str, descriptor_flags: i64) -> u32 {
    // Subset prefixes ("ABCDEF+") carry no style information.
    let name = base_font
        .split_once('+')
        .map(|(_, rest)| rest)
        .unwrap_or(base_font)
        .to_lowercase();

    let mut flags = 0;
    if name.contains("bold")
        || name.contains("black")
        || name.contains("heavy")
        || name.contains("semibold")
        || descriptor_flags & (1 << 18) != 0
    {
        flags |= SPAN_FLAG_BOLD;
    }
    if name.contains("italic") || name.contains("oblique") || descriptor_flags & (1 << 6) != 0 {
        flags |= SPAN_FLAG_ITALIC;
    }
    if descriptor_flags & (1 << 1) != 0 {
        flags |= SPAN_FLAG_SERIF;
    }
    if descriptor_flags & 1 != 0 || name.contains("courier") || name.contains("mono") {
        flags |= SPAN_FLAG_MONOSPACE;
    }
    flags
}

/// Advance of a shown string in unscaled text space.
fn string_advance(font: Option<&FontInfo<'_>>, bytes: &[u8], text: &str, font_size: f32) -> f32 {
    match font.and_then(|f| f.widths.as_ref()) {
        Some(table) => bytes.iter().map(|b| table.width_of(*b)).sum::<f32>() / 1000.0 * font_size,
        None => text.chars().count() as f32 * font_size * 0.5,
    }
}

fn needs_space_after(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => !c.is_whitespace() && c != '\u{00A0}' && !is_spaceless_script_char(c),
        None => false,
    }
}

/// Group spans into lines: cluster by baseline, then split wide gaps.
fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    if spans.is_empty() {
        return vec![];
    }

    spans.sort_by(|a, b| {
        a.baseline()
            .partial_cmp(&b.baseline())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.bbox.left.partial_cmp(&b.bbox.left).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut rows: Vec<Vec<TextSpan>> = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.size * LINE_Y_TOLERANCE;
        match current_y {
            Some(y) if (span.baseline() - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                }
                current_y = Some(span.baseline());
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }

    let mut lines = Vec::new();
    for mut row in rows {
        row.sort_by(|a, b| {
            a.bbox
                .left
                .partial_cmp(&b.bbox.left)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut segment: Vec<TextSpan> = Vec::new();
        for span in row {
            if let Some(prev) = segment.last() {
                let gap = span.bbox.left - prev.bbox.right;
                if gap > LINE_GAP_FACTOR * span.size.max(prev.size) {
                    lines.push(finish_line(std::mem::take(&mut segment)));
                }
            }
            segment.push(span);
        }
        if !segment.is_empty() {
            lines.push(finish_line(segment));
        }
    }

    log::debug!("grouped spans into {} lines", lines.len());
    lines
}

/// Insert inter-span spaces where the gap calls for one.
///
/// Every shown string stays its own span, whitespace-only runs included.
fn finish_line(spans: Vec<TextSpan>) -> TextLine {
    let mut finished: Vec<TextSpan> = Vec::with_capacity(spans.len());

    for mut span in spans {
        if let Some(prev) = finished.last() {
            if should_insert_space(prev, &span) {
                span.text.insert(0, ' ');
            }
        }
        finished.push(span);
    }

    TextLine::from_spans(finished)
}

fn should_insert_space(prev: &TextSpan, curr: &TextSpan) -> bool {
    let gap = curr.bbox.left - prev.bbox.right;
    let char_count = curr.text.chars().count();
    let avg_char_width = if char_count > 0 && curr.width() > 0.0 {
        curr.width() / char_count as f32
    } else {
        curr.size * 0.5
    };
    if gap <= avg_char_width * 0.2 {
        return false;
    }

    let prev_last = prev.text.chars().last();
    let curr_first = curr.text.chars().next();
    let both_spaceless = prev_last.is_some_and(is_spaceless_script_char)
        && curr_first.is_some_and(is_spaceless_script_char);
    let has_boundary_space = prev_last.is_some_and(|c| c.is_whitespace() || c == '\u{00A0}')
        || curr_first.is_some_and(|c| c.is_whitespace() || c == '\u{00A0}');

    !both_spaceless && !has_boundary_space
}

/// Group lines into blocks on large vertical gaps.
fn group_lines_into_blocks(lines: Vec<TextLine>) -> Vec<TextBlock> {
    if lines.is_empty() {
        return vec![];
    }

    let avg_spacing = average_line_spacing(&lines);
    let mut blocks = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            let spacing = line.baseline() - prev.baseline();
            // Segments of one baseline are separate columns, not continuation lines.
            if spacing > avg_spacing * 1.5 || spacing < 0.1 {
                blocks.push(TextBlock::from_lines(std::mem::take(&mut current)));
            }
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(TextBlock::from_lines(current));
    }

    blocks
}

fn average_line_spacing(lines: &[TextLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| w[1].baseline() - w[0].baseline())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Extensions B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, baseline: f32, size: f32, flags: u32) -> TextSpan {
        let width = text.chars().count() as f32 * size * 0.5;
        TextSpan::new(text, "Helvetica", size, flags, (x, baseline), width)
    }

    #[test]
    fn test_span_flags_from_name() {
        assert_eq!(span_flags("Helvetica-Bold", 0) & SPAN_FLAG_BOLD, SPAN_FLAG_BOLD);
        assert_eq!(span_flags("ABCDEF+Calibri-BoldItalic", 0), SPAN_FLAG_BOLD | SPAN_FLAG_ITALIC);
        assert_eq!(span_flags("Helvetica", 0), 0);
        assert!(span_flags("Courier", 0) & SPAN_FLAG_MONOSPACE != 0);
    }

    #[test]
    fn test_span_flags_from_descriptor() {
        // ForceBold + Serif
        let flags = span_flags("F1", (1 << 18) | (1 << 1));
        assert!(flags & SPAN_FLAG_BOLD != 0);
        assert!(flags & SPAN_FLAG_SERIF != 0);
        assert!(flags & SPAN_FLAG_ITALIC == 0);
    }

    #[test]
    fn test_span_box_from_origin() {
        let s = span("Hi", 10.0, 100.0, 10.0, 0);
        assert_eq!(s.bbox, Rect::new(10.0, 92.0, 20.0, 102.0));
    }

    #[test]
    fn test_matrix_multiply_translation() {
        let m = Matrix::translation(5.0, 7.0).multiply(&Matrix::translation(1.0, 2.0));
        assert_eq!((m.e, m.f), (6.0, 9.0));
        assert_eq!(m.vertical_scale(), 1.0);
    }

    #[test]
    fn test_text_state_line_moves_reset_advance() {
        let mut state = TextState::default();
        state.move_line(72.0, 700.0);
        state.advance(50.0);
        assert_eq!(state.tm.e, 122.0);
        state.move_line(0.0, -14.0);
        assert_eq!((state.tm.e, state.tm.f), (72.0, 686.0));
    }

    #[test]
    fn test_group_spans_same_baseline() {
        let spans = vec![
            span("Engineer", 60.0, 100.0, 10.0, 0),
            span("Software", 10.0, 100.5, 10.0, 0),
            span("Next line", 10.0, 115.0, 10.0, 0),
        ];
        let lines = group_spans_into_lines(spans);
        assert_eq!(lines.len(), 2);
        let first: Vec<&str> = lines[0].spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(first, ["Software", " Engineer"]);
        assert_eq!(lines[1].spans[0].text, "Next line");
    }

    #[test]
    fn test_wide_gap_splits_line() {
        let spans = vec![
            span("Left", 10.0, 100.0, 10.0, 0),
            span("Right", 300.0, 100.0, 10.0, 0),
        ];
        let lines = group_spans_into_lines(spans);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].text, "Left");
        assert_eq!(lines[1].spans[0].text, "Right");
    }

    #[test]
    fn test_style_change_keeps_separate_spans() {
        let spans = vec![
            span("Name:", 10.0, 100.0, 10.0, SPAN_FLAG_BOLD),
            span("Jane", 40.0, 100.0, 10.0, 0),
        ];
        let lines = group_spans_into_lines(spans);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[1].text, " Jane");
    }

    #[test]
    fn test_blank_spans_stay_in_line() {
        let spans = vec![
            span("   ", 10.0, 100.0, 30.0, 0),
            span("   ", 55.0, 100.0, 30.0, 0),
        ];
        let lines = group_spans_into_lines(spans);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 2);
        assert!(lines[0].spans.iter().all(TextSpan::is_blank));
    }

    #[test]
    fn test_blocks_break_on_large_gap() {
        let spans = vec![
            span("a", 10.0, 100.0, 10.0, 0),
            span("b", 10.0, 112.0, 10.0, 0),
            span("c", 10.0, 124.0, 10.0, 0),
            span("d", 10.0, 200.0, 10.0, 0),
        ];
        let page = TextPage::from_spans(&spans, 612.0, 792.0);
        assert_eq!(page.blocks.len(), 2);
        assert_eq!(page.blocks[0].lines.len(), 3);
        assert_eq!(page.lines().count(), 4);
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0x48, 0x65, 0x6C, 0x6C, 0xE9]), "Hellé");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
    }

    #[test]
    fn test_needs_space_after() {
        assert!(needs_space_after("word"));
        assert!(!needs_space_after("word "));
        assert!(!needs_space_after(""));
        assert!(!needs_space_after("漢"));
    }
}
