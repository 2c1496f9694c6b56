//! Positioned text spans and baseline line grouping.
//!
//! Walks a page's content stream tracking the text matrix, collects every
//! shown string with its position, then clusters spans that share a baseline
//! into lines read top-to-bottom, left-to-right.

use std::cmp::Ordering;

use crate::error::Result;

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue};

/// Default leading used by `T*`, `'` and `"` when no `TL` was seen.
const DEFAULT_LEADING: f32 = 12.0;

/// TJ adjustments beyond this (thousandths of text space) read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A shown string and where it starts on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline, PDF user space so larger is higher)
    pub y: f32,
}

impl TextSpan {
    /// Create a new text span.
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// Text matrix for tracking position in content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    leading: f32,
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
            leading: DEFAULT_LEADING,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, op: &ContentOp) {
        self.a = op.number(0, 1.0);
        self.b = op.number(1, 0.0);
        self.c = op.number(2, 0.0);
        self.d = op.number(3, 1.0);
        self.e = op.number(4, 0.0);
        self.f = op.number(5, 0.0);
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }
}

/// Collect the positioned spans of one page.
pub fn page_spans<B: PdfBackend>(backend: &B, page: PageId) -> Result<Vec<TextSpan>> {
    let content = backend.page_content(page)?;
    if content.is_empty() {
        return Ok(Vec::new());
    }
    let ops = backend.decode_content(&content)?;
    Ok(collect_spans(&ops, |font, bytes| {
        backend.decode_text(page, font, bytes)
    }))
}

/// Walk content stream operations and collect the strings shown inside text objects.
///
/// `decode` turns a string operand into text given the current font resource name.
pub fn collect_spans<F>(ops: &[ContentOp], decode: F) -> Vec<TextSpan>
where
    F: Fn(&[u8], &[u8]) -> String,
{
    let mut spans = Vec::new();
    let mut matrix = TextMatrix::default();
    let mut font: Vec<u8> = Vec::new();
    let mut in_text = false;

    let mut push = |text: String, matrix: &TextMatrix| {
        if !text.trim().is_empty() {
            let (x, y) = matrix.position();
            spans.push(TextSpan::new(text, x, y));
        }
    };

    for op in ops {
        match op.operator.as_str() {
            "BT" => {
                in_text = true;
                let leading = matrix.leading;
                matrix = TextMatrix {
                    leading,
                    ..TextMatrix::default()
                };
            }
            "ET" => in_text = false,
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    font = name.clone();
                }
            }
            "TL" => matrix.leading = op.number(0, DEFAULT_LEADING),
            "Td" => matrix.translate(op.number(0, 0.0), op.number(1, 0.0)),
            "TD" => {
                let ty = op.number(1, 0.0);
                matrix.leading = -ty;
                matrix.translate(op.number(0, 0.0), ty);
            }
            "Tm" if op.operands.len() >= 6 => matrix.set(op),
            "T*" => matrix.next_line(),
            "Tj" if in_text => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    push(decode(&font, bytes), &matrix);
                }
            }
            "TJ" if in_text => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    push(join_tj_array(items, |b| decode(&font, b)), &matrix);
                }
            }
            "'" | "\"" => {
                matrix.next_line();
                let index = if op.operator == "\"" { 2 } else { 0 };
                if in_text {
                    if let Some(PdfValue::Str(bytes)) = op.operands.get(index) {
                        push(decode(&font, bytes), &matrix);
                    }
                }
            }
            _ => {}
        }
    }

    spans
}

/// Concatenate the strings of a TJ array, turning large negative kerning into spaces.
fn join_tj_array<F>(items: &[PdfValue], decode: F) -> String
where
    F: Fn(&[u8]) -> String,
{
    let mut combined = String::new();
    for item in items {
        match item {
            PdfValue::Str(bytes) => combined.push_str(&decode(bytes)),
            other => {
                let Some(adjustment) = other.as_number().map(|n| -n) else {
                    continue;
                };
                if adjustment > TJ_SPACE_THRESHOLD
                    && !combined.is_empty()
                    && !combined.ends_with(' ')
                    && !combined.chars().last().is_some_and(is_spaceless_script_char)
                {
                    combined.push(' ');
                }
            }
        }
    }
    combined
}

/// Characters from scripts that do not separate words with spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x30FF
        | 0x3000..=0x303F)
}

/// Cluster spans into lines.
///
/// Spans are ordered top-to-bottom then left-to-right. A span joins the
/// current line while its baseline is within `y_tolerance` of the line's
/// first span; otherwise it starts a new line. Each line's text is its span
/// texts, trimmed and joined by single spaces.
pub fn group_spans_into_lines(mut spans: Vec<TextSpan>, y_tolerance: f32) -> Vec<String> {
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
    });

    let mut lines: Vec<Vec<TextSpan>> = Vec::new();
    for span in spans {
        match lines.last_mut() {
            Some(line) if (span.y - line[0].y).abs() <= y_tolerance => line.push(span),
            _ => lines.push(vec![span]),
        }
    }

    lines
        .into_iter()
        .map(|mut line| {
            line.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
            line.iter()
                .map(|s| s.text.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|text| !text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin(_font: &[u8], bytes: &[u8]) -> String {
        bytes.iter().map(|&b| b as char).collect()
    }

    fn name(s: &str) -> PdfValue {
        PdfValue::Name(s.as_bytes().to_vec())
    }

    fn string(s: &str) -> PdfValue {
        PdfValue::Str(s.as_bytes().to_vec())
    }

    #[test]
    fn test_collect_spans_tracks_position() {
        let ops = vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), PdfValue::Integer(12)]),
            ContentOp::new("Td", vec![PdfValue::Integer(72), PdfValue::Integer(700)]),
            ContentOp::new("Tj", vec![string("Introduction")]),
            ContentOp::new("Td", vec![PdfValue::Integer(0), PdfValue::Integer(-20)]),
            ContentOp::new("Tj", vec![string("Body text")]),
            ContentOp::new("ET", vec![]),
        ];
        let spans = collect_spans(&ops, latin);
        assert_eq!(
            spans,
            vec![
                TextSpan::new("Introduction", 72.0, 700.0),
                TextSpan::new("Body text", 72.0, 680.0),
            ]
        );
    }

    #[test]
    fn test_collect_spans_ignores_text_outside_bt() {
        let ops = vec![
            ContentOp::new("Tj", vec![string("stray")]),
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tj", vec![string("   ")]),
            ContentOp::new("ET", vec![]),
        ];
        assert!(collect_spans(&ops, latin).is_empty());
    }

    #[test]
    fn test_collect_spans_tm_and_next_line() {
        let ops = vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new(
                "Tm",
                [1, 0, 0, 1, 50, 500]
                    .iter()
                    .map(|&n| PdfValue::Integer(n))
                    .collect(),
            ),
            ContentOp::new("TL", vec![PdfValue::Integer(14)]),
            ContentOp::new("'", vec![string("first")]),
            ContentOp::new("T*", vec![]),
            ContentOp::new("Tj", vec![string("second")]),
            ContentOp::new("ET", vec![]),
        ];
        let spans = collect_spans(&ops, latin);
        assert_eq!(spans[0], TextSpan::new("first", 50.0, 486.0));
        assert_eq!(spans[1], TextSpan::new("second", 50.0, 472.0));
    }

    #[test]
    fn test_tj_array_word_gaps() {
        let items = vec![
            string("Hello"),
            PdfValue::Integer(-250),
            string("World"),
            PdfValue::Real(-20.0),
            string("!"),
        ];
        assert_eq!(join_tj_array(&items, |b| latin(b"", b)), "Hello World!");
    }

    #[test]
    fn test_group_spans_top_to_bottom() {
        let spans = vec![
            TextSpan::new("bottom", 72.0, 100.0),
            TextSpan::new("right", 200.0, 702.0),
            TextSpan::new("left", 72.0, 700.0),
            TextSpan::new("middle", 72.0, 400.0),
        ];
        let lines = group_spans_into_lines(spans, 5.0);
        assert_eq!(lines, vec!["left right", "middle", "bottom"]);
    }

    #[test]
    fn test_group_spans_anchored_at_first_span() {
        // 704 -> 700 -> 696: the last span is 8 away from the line anchor.
        let spans = vec![
            TextSpan::new("a", 10.0, 704.0),
            TextSpan::new("b", 20.0, 700.0),
            TextSpan::new("c", 30.0, 696.0),
        ];
        let lines = group_spans_into_lines(spans, 5.0);
        assert_eq!(lines, vec!["a b", "c"]);
    }

    #[test]
    fn test_group_spans_empty() {
        assert!(group_spans_into_lines(Vec::new(), 5.0).is_empty());
    }
}
