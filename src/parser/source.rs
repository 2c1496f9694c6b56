//! Text extraction backends and the fallback chain that drives them.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::detect::check_pdf_header;
use crate::error::{panic_message, Error, Result};
use crate::model::{Section, TextLine};

use super::backend::{LopdfBackend, PdfBackend};
use super::layout::{group_spans_into_lines, page_spans};
use super::lines::{to_text_lines, SectionSplitter};
use super::options::ExtractOptions;

/// Raw lines of one page, in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageText {
    /// Page number (1-indexed)
    pub number: u32,
    /// Lines as produced by the backend, untrimmed
    pub lines: Vec<String>,
}

impl PageText {
    /// Create a page.
    pub fn new(number: u32, lines: Vec<String>) -> Self {
        Self { number, lines }
    }
}

/// A PDF text backend.
pub trait TextExtractor: Send + Sync {
    /// Short backend name used in logs and errors.
    fn name(&self) -> &str;

    /// Extract the lines of every page of a PDF.
    fn extract(&self, data: &[u8], options: &ExtractOptions) -> Result<Vec<PageText>>;
}

/// Primary backend built on `lopdf`.
///
/// Produces lines rebuilt from positioned spans and/or lopdf's own plain
/// text, depending on [`ExtractOptions::strategy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfExtractor;

impl LopdfExtractor {
    fn page_lines<B: PdfBackend>(
        backend: &B,
        number: u32,
        page: (u32, u16),
        options: &ExtractOptions,
    ) -> Result<Vec<String>> {
        let mut lines = Vec::new();

        if options.strategy.positioned() {
            let spans = page_spans(backend, page)?;
            lines.extend(group_spans_into_lines(spans, options.y_tolerance));
        }

        if options.strategy.plain() {
            let text = backend.page_text(number)?;
            lines.extend(text.split('\n').map(str::to_string));
        }

        Ok(lines)
    }
}

impl TextExtractor for LopdfExtractor {
    fn name(&self) -> &str {
        "lopdf"
    }

    fn extract(&self, data: &[u8], options: &ExtractOptions) -> Result<Vec<PageText>> {
        let version = check_pdf_header(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        let pages = backend.pages();
        log::debug!("PDF {} with {} pages", version, pages.len());

        pages
            .into_iter()
            .map(|(number, page)| {
                Self::page_lines(&backend, number, page, options)
                    .map(|lines| PageText::new(number, lines))
            })
            .collect()
    }
}

/// Secondary backend built on `pdf-extract`, plain text only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractFallback;

impl TextExtractor for PdfExtractFallback {
    fn name(&self) -> &str {
        "pdf-extract"
    }

    fn extract(&self, data: &[u8], _options: &ExtractOptions) -> Result<Vec<PageText>> {
        check_pdf_header(data)?;
        // pdf-extract indexes operands without checking them and panics on malformed content
        let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(data))
            .map_err(|payload| Error::TextExtract(panic_message(payload.as_ref())))??;
        Ok(pages
            .into_iter()
            .zip(1u32..)
            .map(|(text, number)| {
                PageText::new(number, text.split('\n').map(str::to_string).collect())
            })
            .collect())
    }
}

/// Supplies text lines for a document.
///
/// Tries the primary backend, then the fallback if the primary fails. When
/// every backend fails the document simply has no text.
pub struct TextSource {
    primary: Box<dyn TextExtractor>,
    fallback: Option<Box<dyn TextExtractor>>,
    options: ExtractOptions,
    splitter: SectionSplitter,
}

impl TextSource {
    /// Create a source with the lopdf backend and pdf-extract fallback.
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            primary: Box::new(LopdfExtractor),
            fallback: Some(Box::new(PdfExtractFallback)),
            options,
            splitter: SectionSplitter::new(),
        }
    }

    /// Replace the primary backend.
    pub fn with_primary(mut self, primary: impl TextExtractor + 'static) -> Self {
        self.primary = Box::new(primary);
        self
    }

    /// Replace the fallback backend.
    pub fn with_fallback(mut self, fallback: impl TextExtractor + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    /// Disable the fallback backend.
    pub fn without_fallback(mut self) -> Self {
        self.fallback = None;
        self
    }

    /// Get the extract options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract pages from PDF bytes. Never fails; total failure yields no pages.
    pub fn extract_bytes(&self, data: &[u8]) -> Vec<PageText> {
        let pages = match self.try_extract(data) {
            Ok(pages) => pages,
            Err(e) => {
                log::error!("Text extraction failed: {}", e);
                return Vec::new();
            }
        };

        if self.options.normalize_unicode {
            pages
                .into_iter()
                .map(|page| PageText {
                    number: page.number,
                    lines: page.lines.iter().map(|l| l.nfc().collect()).collect(),
                })
                .collect()
        } else {
            pages
        }
    }

    /// Read a PDF file and extract its pages.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<PageText>> {
        let data = fs::read(path)?;
        Ok(self.extract_bytes(&data))
    }

    /// Trimmed, non-empty lines of a PDF in extraction order.
    pub fn text_lines(&self, data: &[u8]) -> Vec<TextLine> {
        to_text_lines(&self.extract_bytes(data))
    }

    /// Unscored sections of a PDF, tagged with `document`.
    pub fn sections(&self, data: &[u8], document: &str) -> Vec<Section> {
        self.splitter.split(&self.extract_bytes(data), document)
    }

    fn try_extract(&self, data: &[u8]) -> Result<Vec<PageText>> {
        let primary_err = match run_guarded(self.primary.as_ref(), data, &self.options) {
            Ok(pages) => return Ok(pages),
            Err(e) => e,
        };
        log::warn!("{} extraction failed: {}", self.primary.name(), primary_err);

        let Some(fallback) = &self.fallback else {
            return Err(backend_error(self.primary.name(), primary_err));
        };

        run_guarded(fallback.as_ref(), data, &self.options).map_err(|e| {
            backend_error(
                fallback.name(),
                format!("{} (after {} failed: {})", e, self.primary.name(), primary_err),
            )
        })
    }
}

impl Default for TextSource {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

/// Run one backend, turning a panic inside it into an error for that backend.
fn run_guarded(
    extractor: &dyn TextExtractor,
    data: &[u8],
    options: &ExtractOptions,
) -> Result<Vec<PageText>> {
    panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(data, options))).unwrap_or_else(
        |payload| Err(backend_error(extractor.name(), panic_message(payload.as_ref()))),
    )
}

fn backend_error(backend: &str, message: impl ToString) -> Error {
    Error::Extraction {
        backend: backend.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Fixed(Vec<PageText>, Arc<AtomicUsize>);

    impl TextExtractor for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn extract(&self, _data: &[u8], _options: &ExtractOptions) -> Result<Vec<PageText>> {
            self.1.fetch_add(1, Ordering::SeqCst);
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl TextExtractor for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn extract(&self, _data: &[u8], _options: &ExtractOptions) -> Result<Vec<PageText>> {
            Err(Error::PdfParse("broken xref".to_string()))
        }
    }

    struct Panicking;

    impl TextExtractor for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }

        fn extract(&self, _data: &[u8], _options: &ExtractOptions) -> Result<Vec<PageText>> {
            panic!("index out of bounds: the len is 0 but the index is 0")
        }
    }

    fn fixed(lines: &[&str]) -> (Fixed, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let page = PageText::new(1, lines.iter().map(|s| s.to_string()).collect());
        (Fixed(vec![page], calls.clone()), calls)
    }

    #[test]
    fn test_fallback_not_called_when_primary_succeeds() {
        let (primary, _) = fixed(&["primary"]);
        let (fallback, fallback_calls) = fixed(&["fallback"]);
        let source = TextSource::default()
            .with_primary(primary)
            .with_fallback(fallback);

        let pages = source.extract_bytes(b"%PDF-1.4");
        assert_eq!(pages[0].lines, vec!["primary"]);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fallback_used_when_primary_fails() {
        let (fallback, calls) = fixed(&["from fallback"]);
        let source = TextSource::default()
            .with_primary(Failing)
            .with_fallback(fallback);

        let lines = source.text_lines(b"%PDF-1.4");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(lines, vec![TextLine::new("from fallback", 1)]);
    }

    #[test]
    fn test_total_failure_yields_no_pages() {
        let source = TextSource::default()
            .with_primary(Failing)
            .with_fallback(Failing);
        assert!(source.extract_bytes(b"%PDF-1.4").is_empty());

        let source = TextSource::default().with_primary(Failing).without_fallback();
        assert!(source.text_lines(b"%PDF-1.4").is_empty());
    }

    #[test]
    fn test_unicode_normalization() {
        // "e" + combining acute accent
        let (primary, _) = fixed(&["Cafe\u{301}"]);
        let source = TextSource::default().with_primary(primary);
        assert_eq!(source.extract_bytes(b"")[0].lines[0], "Caf\u{e9}");

        let (primary, _) = fixed(&["Cafe\u{301}"]);
        let source = TextSource::new(ExtractOptions::new().with_normalize_unicode(false))
            .with_primary(primary);
        assert_eq!(source.extract_bytes(b"")[0].lines[0], "Cafe\u{301}");
    }

    #[test]
    fn test_lopdf_extractor_rejects_non_pdf() {
        let result = LopdfExtractor.extract(b"<html></html>", &ExtractOptions::default());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_non_pdf_bytes_yield_no_pages() {
        let source = TextSource::default();
        assert!(source.extract_bytes(b"plain text, not a pdf").is_empty());
    }

    #[test]
    fn test_sections_tagged_with_document() {
        let (primary, _) = fixed(&["First paragraph", "", "Second paragraph"]);
        let source = TextSource::default().with_primary(primary);
        let sections = source.sections(b"", "guide.pdf");
        assert_eq!(sections.len(), 2);
        assert!(sections.iter().all(|s| s.document == "guide.pdf" && s.page == 1));
    }

    #[test]
    fn test_panicking_primary_falls_back() {
        let (fallback, calls) = fixed(&["recovered"]);
        let source = TextSource::default()
            .with_primary(Panicking)
            .with_fallback(fallback);

        let lines = source.text_lines(b"%PDF-1.4");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(lines, vec![TextLine::new("recovered", 1)]);
    }

    #[test]
    fn test_panicking_backends_yield_no_pages() {
        let source = TextSource::default()
            .with_primary(Failing)
            .with_fallback(Panicking);
        assert!(source.extract_bytes(b"%PDF-1.4").is_empty());

        let err = run_guarded(&Panicking, b"%PDF-1.4", &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Extraction { ref backend, .. } if backend == "panicking"));
        assert!(err.to_string().contains("index out of bounds"));
    }
}
