//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for PDF operations, isolating
//! the concrete PDF library (lopdf) from span and line reconstruction.

use std::collections::BTreeMap;

use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// A value from a PDF content stream operand.
#[derive(Debug, Clone)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Numeric value of an integer or real operand.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    /// Numeric operand at `index`, or `default`.
    pub fn number(&self, index: usize, default: f32) -> f32 {
        self.operands
            .get(index)
            .and_then(PdfValue::as_number)
            .unwrap_or(default)
    }
}

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId).
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Return the raw (decompressed) content stream bytes for a page.
    /// A page without content yields an empty stream.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a text byte sequence using the font's encoding on the given page.
    /// Falls back to simple decoding if the font or encoding is unavailable.
    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String;

    /// The backend's own plain text for a page (1-indexed).
    fn page_text(&self, page_num: u32) -> Result<String>;
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
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

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text may be unreadable");
        }
        Ok(Self { doc })
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_content(&self, page_id: PageId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        let stream_bytes = |obj: &Object| -> Option<Vec<u8>> {
            let Object::Reference(r) = obj else {
                return None;
            };
            match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => s.decompressed_content().ok(),
                _ => None,
            }
        };

        match contents {
            Object::Reference(_) => stream_bytes(contents)
                .ok_or_else(|| Error::PdfParse("Invalid content stream".to_string())),
            Object::Array(arr) => {
                let mut content = Vec::new();
                for data in arr.iter().filter_map(stream_bytes) {
                    content.extend_from_slice(&data);
                    content.push(b' ');
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content =
            lopdf::content::Content::decode(data).map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String {
        if let Ok(fonts) = self.doc.get_page_fonts(page) {
            if let Some(font_dict) = fonts.get(font_name) {
                if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_text_simple(bytes)
    }

    fn page_text(&self, page_num: u32) -> Result<String> {
        self.doc
            .extract_text(&[page_num])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))
    }
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}
