//! PDF text extraction.

mod backend;
mod layout;
mod lines;
mod options;
mod source;

pub use backend::{decode_text_simple, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue};
pub use layout::{collect_spans, group_spans_into_lines, page_spans, TextSpan};
pub use lines::{to_text_lines, SectionSplitter};
pub use options::{ExtractOptions, LineStrategy};
pub use source::{LopdfExtractor, PageText, PdfExtractFallback, TextExtractor, TextSource};
