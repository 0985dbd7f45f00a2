//! Fragment source abstraction.
//!
//! The outline pipeline never touches a PDF library directly: it consumes a
//! [`PageSource`], which yields raw positioned text fragments per page in
//! emission order. [`LopdfBackend`] is the concrete source backed by
//! `lopdf::Document`; tests substitute in-memory sources.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::BoundingBox;

/// Style bit set when the fragment's font looks bold.
pub const FLAG_BOLD: u32 = 1 << 0;
/// Style bit set when the fragment's font looks italic.
pub const FLAG_ITALIC: u32 = 1 << 1;

/// A raw positioned text run, before normalization or merging.
///
/// Coordinates are top-down page coordinates: the top edge of the page is 0
/// and y grows toward the footer. `flags` is an opaque style bitmask carried
/// through the pipeline unmodified.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Decoded text content
    pub text: String,

    /// Effective font size in points
    pub font_size: f32,

    /// Opaque style bits (see [`FLAG_BOLD`], [`FLAG_ITALIC`])
    pub flags: u32,

    /// Position on the page, top-down coordinates
    pub bbox: BoundingBox,
}

/// Abstract interface to an opened document.
///
/// Implementations enumerate pages and emit each page's text fragments with
/// position, size, and style bits, in the source's natural emission order.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Height of the given page (1-based) in page units.
    fn page_height(&self, page_no: u32) -> Result<f32>;

    /// Text fragments of the given page (1-based), in emission order.
    fn page_fragments(&self, page_no: u32) -> Result<Vec<Fragment>>;
}

/// Default page height when no MediaBox is found (US Letter, points).
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Per-page font map as returned by lopdf.
type FontMap<'a> = BTreeMap<Vec<u8>, &'a Dictionary>;

/// Concrete [`PageSource`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl LopdfBackend {
    /// Open a PDF file from a path.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self::from_document(doc))
    }

    /// Open a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if !crate::detect::is_pdf_bytes(data) {
            return Err(Error::UnknownFormat);
        }
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: LopdfDocument) -> Self {
        let pages = doc.get_pages();
        Self { doc, pages }
    }

    fn page_id(&self, page_no: u32) -> Result<ObjectId> {
        self.pages
            .get(&page_no)
            .copied()
            .ok_or(Error::PageOutOfRange(page_no, self.pages.len() as u32))
    }

    /// Resolve the page's MediaBox height, following the Parent chain for
    /// inherited boxes.
    fn media_box_height(&self, page_id: ObjectId) -> f32 {
        let mut current = Some(page_id);
        // Parent chains are shallow; the bound guards against cycles.
        for _ in 0..8 {
            let Some(id) = current else { break };
            let Ok(dict) = self.doc.get_dictionary(id) else {
                break;
            };
            if let Ok(obj) = dict.get(b"MediaBox") {
                let resolved = match obj {
                    Object::Reference(r) => self.doc.get_object(*r).ok(),
                    other => Some(other),
                };
                if let Some(Object::Array(arr)) = resolved {
                    if arr.len() == 4 {
                        let y0 = number(&arr[1]).unwrap_or(0.0);
                        let y1 = number(&arr[3]).unwrap_or(DEFAULT_PAGE_HEIGHT);
                        return (y1 - y0).abs();
                    }
                }
            }
            current = dict
                .get(b"Parent")
                .ok()
                .and_then(|o| o.as_reference().ok());
        }
        DEFAULT_PAGE_HEIGHT
    }

    /// Collect the page's (decompressed) content stream bytes.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
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

    /// Decode a text byte sequence through the font's encoding, with a
    /// simple fallback when the font or encoding is unavailable.
    fn decode_font_text(&self, fonts: &FontMap<'_>, font_name: &[u8], bytes: &[u8]) -> String {
        if let Some(font_dict) = fonts.get(font_name) {
            if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }

    /// Walk the content stream and emit fragments in emission order.
    fn walk_content(&self, page_id: ObjectId, page_height: f32) -> Result<Vec<Fragment>> {
        let data = self.page_content(page_id)?;
        let content = lopdf::content::Content::decode(&data)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();

        let mut fragments = Vec::new();
        let mut current_font: Vec<u8> = Vec::new();
        let mut current_flags = 0u32;
        let mut current_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(font_name) = &op.operands[0] {
                            current_font = font_name.clone();
                            current_flags = style_flags(&base_font_name(&fonts, font_name));
                        }
                        current_size = number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = number(&op.operands[0]).unwrap_or(0.0);
                        let ty = number(&op.operands[1]).unwrap_or(0.0);
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        matrix.set(
                            number(&op.operands[0]).unwrap_or(1.0),
                            number(&op.operands[1]).unwrap_or(0.0),
                            number(&op.operands[2]).unwrap_or(0.0),
                            number(&op.operands[3]).unwrap_or(1.0),
                            number(&op.operands[4]).unwrap_or(0.0),
                            number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    matrix.next_line();
                }
                "Tj" | "TJ" => {
                    if !in_text {
                        continue;
                    }
                    let text = if op.operator == "TJ" {
                        self.collect_tj_text(&fonts, &current_font, op.operands.first())
                    } else if let Some(Object::String(bytes, _)) = op.operands.first() {
                        self.decode_font_text(&fonts, &current_font, bytes)
                    } else {
                        String::new()
                    };
                    push_fragment(
                        &mut fragments,
                        text,
                        &matrix,
                        current_size,
                        current_flags,
                        page_height,
                    );
                }
                "'" | "\"" => {
                    matrix.next_line();
                    if !in_text {
                        continue;
                    }
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let text = self.decode_font_text(&fonts, &current_font, bytes);
                        push_fragment(
                            &mut fragments,
                            text,
                            &matrix,
                            current_size,
                            current_flags,
                            page_height,
                        );
                    }
                }
                _ => {}
            }
        }

        Ok(fragments)
    }

    /// Decode a TJ array: strings interleaved with kerning adjustments.
    /// Large negative adjustments (in 1/1000 text space units) act as word
    /// spaces in many producers.
    fn collect_tj_text(
        &self,
        fonts: &FontMap<'_>,
        font_name: &[u8],
        operand: Option<&Object>,
    ) -> String {
        const SPACE_THRESHOLD: f32 = 200.0;

        let Some(Object::Array(arr)) = operand else {
            return String::new();
        };

        let mut combined = String::new();
        for item in arr {
            match item {
                Object::String(bytes, _) => {
                    combined.push_str(&self.decode_font_text(fonts, font_name, bytes));
                }
                Object::Integer(n) => {
                    if -(*n as f32) > SPACE_THRESHOLD && needs_space(&combined) {
                        combined.push(' ');
                    }
                }
                Object::Real(n) => {
                    if -n > SPACE_THRESHOLD && needs_space(&combined) {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        combined
    }
}

impl PageSource for LopdfBackend {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_height(&self, page_no: u32) -> Result<f32> {
        let page_id = self.page_id(page_no)?;
        Ok(self.media_box_height(page_id))
    }

    fn page_fragments(&self, page_no: u32) -> Result<Vec<Fragment>> {
        let page_id = self.page_id(page_no)?;
        let height = self.media_box_height(page_id);
        self.walk_content(page_id, height)
    }
}

/// Base font name for a font resource, e.g. "Helvetica-Bold".
fn base_font_name(fonts: &FontMap<'_>, font_name: &[u8]) -> String {
    fonts
        .get(font_name)
        .and_then(|dict| dict.get(b"BaseFont").ok())
        .and_then(|obj| obj.as_name().ok())
        .map(|name| String::from_utf8_lossy(name).to_string())
        .unwrap_or_default()
}

/// Synthesize opaque style bits from a base font name.
fn style_flags(base_font: &str) -> u32 {
    let name = base_font.to_lowercase();
    let mut flags = 0;
    if name.contains("bold") || name.contains("black") || name.contains("heavy") {
        flags |= FLAG_BOLD;
    }
    if name.contains("italic") || name.contains("oblique") {
        flags |= FLAG_ITALIC;
    }
    flags
}

/// Append a fragment for a decoded run, flipping the PDF bottom-up baseline
/// into a top-down box with ascender/descender approximated from the size.
fn push_fragment(
    fragments: &mut Vec<Fragment>,
    text: String,
    matrix: &TextMatrix,
    font_size: f32,
    flags: u32,
    page_height: f32,
) {
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = matrix.position();
    let size = font_size * matrix.scale();
    // Width estimate: roughly half an em per character.
    let width = size * 0.5 * text.chars().count() as f32;
    let bbox = BoundingBox::new(
        x,
        page_height - (y + size * 0.8),
        x + width,
        page_height - (y - size * 0.2),
    );
    fragments.push(Fragment {
        text,
        font_size: size,
        flags,
        bbox,
    });
}

/// True when a decoded run should receive a synthetic word space.
fn needs_space(text: &str) -> bool {
    !text.is_empty() && !text.ends_with(' ') && !text.ends_with('\u{00A0}')
}

/// Extract a number from a PDF object.
fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
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

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
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
