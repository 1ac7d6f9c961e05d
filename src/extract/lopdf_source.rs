//! Concrete [`PageSource`] backed by `lopdf`.
//!
//! Walks each page's content stream tracking the text matrix and current
//! font, decodes shown text with the font's encoding, and emits words in
//! top-down page coordinates. PDF extraction frequently splits one visual
//! word across several glyph runs; reassembly is the job of the analysis
//! stages, not this layer.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::{TableRegion, Word};

use super::source::{PageContent, PageSource};
use super::tables::{detect_table_regions, TableDetectConfig};

/// TJ kerning adjustments beyond this (in 1/1000 text-space units) are
/// treated as word spaces.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Fallback estimate of a glyph's advance as a fraction of the font size.
const CHAR_WIDTH_RATIO: f32 = 0.5;

/// PDF word source backed by `lopdf::Document`.
pub struct LopdfSource {
    doc: LopdfDocument,
    table_config: TableDetectConfig,
}

impl LopdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self::new(doc))
    }

    /// Open a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self::new(doc))
    }

    fn new(doc: LopdfDocument) -> Self {
        Self {
            doc,
            table_config: TableDetectConfig::default(),
        }
    }

    /// Override the table-detection configuration.
    pub fn with_table_config(mut self, config: TableDetectConfig) -> Self {
        self.table_config = config;
        self
    }

    /// Page dimensions from the MediaBox, defaulting to Letter.
    fn page_dimensions(&self, page_id: ObjectId) -> (f32, f32) {
        if let Ok(page_dict) = self.doc.get_dictionary(page_id) {
            if let Ok(media_box) = page_dict.get(b"MediaBox") {
                if let Ok(array) = media_box.as_array() {
                    if array.len() >= 4 {
                        let width = array[2].as_float().unwrap_or(612.0);
                        let height = array[3].as_float().unwrap_or(792.0);
                        return (width, height);
                    }
                }
            }
        }
        (612.0, 792.0)
    }

    /// Raw (decompressed) content stream bytes for a page.
    fn page_content_bytes(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = page_dict
            .get(b"Contents")
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| Error::PdfParse(e.to_string()));
                }
                Err(Error::PdfParse("Invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    /// Base font names for a page, keyed by font resource name.
    fn page_font_names(&self, page_id: ObjectId) -> HashMap<Vec<u8>, String> {
        let mut fonts = HashMap::new();
        if let Ok(lopdf_fonts) = self.doc.get_page_fonts(page_id) {
            for (name, font) in &lopdf_fonts {
                let base_font = font
                    .get(b"BaseFont")
                    .ok()
                    .and_then(|o| o.as_name().ok())
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                fonts.insert(name.clone(), base_font);
            }
        }
        fonts
    }

    /// Walk the content stream and collect words for a page.
    fn extract_words(&self, page_id: ObjectId, page_height: f32) -> Result<Vec<Word>> {
        let content_bytes = self.page_content_bytes(page_id)?;
        let content = lopdf::content::Content::decode(&content_bytes)
            .map_err(|e| Error::TextExtract(e.to_string()))?;

        let font_names = self.page_font_names(page_id);
        let lopdf_fonts: BTreeMap<Vec<u8>, &lopdf::Dictionary> =
            self.doc.get_page_fonts(page_id).unwrap_or_default();

        let mut words = Vec::new();
        let mut current_font = String::new();
        let mut current_font_name: Vec<u8> = Vec::new();
        let mut current_font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text_block = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text_block = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(font_name) = &op.operands[0] {
                            current_font_name = font_name.clone();
                            current_font = font_names
                                .get(font_name.as_slice())
                                .cloned()
                                .unwrap_or_else(|| {
                                    String::from_utf8_lossy(font_name.as_slice()).to_string()
                                });
                        }
                        current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    matrix.next_line();
                }
                "Tj" | "TJ" => {
                    if in_text_block {
                        let text = self.decode_shown_text(&op, &current_font_name, &lopdf_fonts);
                        if !text.trim().is_empty() {
                            let (x, y) = matrix.position();
                            let size = current_font_size * matrix.scale();
                            push_span_words(
                                &mut words,
                                &text,
                                x,
                                y,
                                size,
                                &current_font,
                                page_height,
                            );
                        }
                    }
                }
                "'" | "\"" => {
                    matrix.next_line();
                    if in_text_block {
                        let text_idx = if op.operator == "\"" { 2 } else { 0 };
                        if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                            let text =
                                self.decode_bytes(bytes, &current_font_name, &lopdf_fonts);
                            if !text.trim().is_empty() {
                                let (x, y) = matrix.position();
                                let size = current_font_size * matrix.scale();
                                push_span_words(
                                    &mut words,
                                    &text,
                                    x,
                                    y,
                                    size,
                                    &current_font,
                                    page_height,
                                );
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(words)
    }

    /// Decode the text shown by a Tj/TJ operation.
    fn decode_shown_text(
        &self,
        op: &lopdf::content::Operation,
        font_name: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> String {
        if op.operator == "TJ" {
            // Array of strings and kerning adjustments; large negative
            // adjustments stand in for word spaces.
            if let Some(Object::Array(arr)) = op.operands.first() {
                let mut combined = String::new();
                for item in arr {
                    match item {
                        Object::String(bytes, _) => {
                            combined.push_str(&self.decode_bytes(bytes, font_name, fonts));
                        }
                        Object::Integer(n) => {
                            if -(*n as f32) > TJ_SPACE_THRESHOLD && !combined.ends_with(' ') {
                                combined.push(' ');
                            }
                        }
                        Object::Real(n) => {
                            if -n > TJ_SPACE_THRESHOLD && !combined.ends_with(' ') {
                                combined.push(' ');
                            }
                        }
                        _ => {}
                    }
                }
                combined
            } else {
                String::new()
            }
        } else if let Some(Object::String(bytes, _)) = op.operands.first() {
            self.decode_bytes(bytes, font_name, fonts)
        } else {
            String::new()
        }
    }

    /// Decode a byte string using the current font's encoding if available.
    fn decode_bytes(
        &self,
        bytes: &[u8],
        font_name: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> String {
        if let Some(font_dict) = fonts.get(font_name) {
            if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }
}

impl PageSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn page(&self, number: u32) -> Result<PageContent> {
        let pages = self.doc.get_pages();
        let page_id = *pages
            .get(&number)
            .ok_or(Error::PageOutOfRange(number, pages.len() as u32))?;

        let (width, height) = self.page_dimensions(page_id);
        let words = self.extract_words(page_id, height)?;
        let tables: Vec<TableRegion> = detect_table_regions(&words, &self.table_config);

        log::debug!(
            "page {}: {} words, {} table regions",
            number,
            words.len(),
            tables.len()
        );

        Ok(PageContent {
            number,
            width,
            height,
            words,
            tables,
        })
    }
}

/// Split a decoded span into whitespace-separated words, estimating each
/// word's horizontal extent from the font size, and convert the baseline
/// position to top-down coordinates.
fn push_span_words(
    words: &mut Vec<Word>,
    text: &str,
    x: f32,
    baseline_y: f32,
    size: f32,
    font_name: &str,
    page_height: f32,
) {
    let char_width = size * CHAR_WIDTH_RATIO;
    // Ascender approximation; `top` is the distance from the page top.
    let top = (page_height - baseline_y - size * 0.8).max(0.0);

    let mut offset = 0usize;
    for piece in text.split(' ') {
        let chars = piece.chars().count();
        if chars > 0 && !piece.trim().is_empty() {
            let x0 = x + offset as f32 * char_width;
            let x1 = x0 + chars as f32 * char_width;
            words.push(Word::new(piece, font_name, size, top, x0, x1));
        }
        offset += chars + 1;
    }
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default leading; a TL operator would refine this.
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM marker
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple("Outline".as_bytes()), "Outline");
        assert_eq!(decode_text_simple("Résumé".as_bytes()), "Résumé");
    }

    #[test]
    fn test_decode_text_simple_latin1_fallback() {
        // Not valid UTF-8; 0xE9 is 'é' in Latin-1.
        let bytes = vec![0x43, 0x61, 0x66, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Café");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = vec![0xFE, 0xFF, 0x00, 0x4F, 0x00, 0x4B];
        assert_eq!(decode_text_simple(&bytes), "OK");
    }

    #[test]
    fn test_text_matrix_translate() {
        let mut m = TextMatrix::default();
        m.translate(10.0, -14.0);
        assert_eq!(m.position(), (10.0, -14.0));
        m.translate(5.0, 0.0);
        assert_eq!(m.position(), (15.0, -14.0));
    }

    #[test]
    fn test_text_matrix_scale() {
        let mut m = TextMatrix::default();
        m.set(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
        assert_eq!(m.scale(), 2.0);
    }

    #[test]
    fn test_push_span_words_splits_and_positions() {
        let mut words = Vec::new();
        push_span_words(&mut words, "Hello World", 100.0, 700.0, 12.0, "Helvetica", 792.0);

        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "Hello");
        assert_eq!(words[1].text, "World");
        // 5 chars + separator at 6pt estimated advance
        assert_eq!(words[0].x0, 100.0);
        assert_eq!(words[0].x1, 130.0);
        assert_eq!(words[1].x0, 136.0);
        // Top-down conversion: 792 - 700 - 9.6
        assert!((words[0].top - 82.4).abs() < 0.01);
    }

    #[test]
    fn test_push_span_words_skips_blank_pieces() {
        let mut words = Vec::new();
        push_span_words(&mut words, "  A  B ", 0.0, 0.0, 10.0, "F", 100.0);
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B"]);
    }
}
