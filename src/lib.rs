//! # docsift
//!
//! Heading outlines and persona-driven section ranking for PDF documents.
//!
//! Two pipelines share one text extraction layer:
//!
//! - **Outlines**: each PDF gets a title and a flat list of H1/H2/H3
//!   headings, classified purely from the shape of each text line.
//! - **Collections**: a JSON description of several PDFs, a persona and a
//!   task gets the most relevant sections ranked, plus cleaned excerpts from
//!   the pages they came from.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::{outline_file, to_json, JsonFormat};
//!
//! fn main() -> docsift::Result<()> {
//!     let outline = outline_file("report.pdf")?;
//!     println!("{}", to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! Whole directories are handled by the batch runners in [`pipeline`], which
//! keep going when one document fails and write a degraded record for it.

pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod pipeline;
pub mod relevance;
pub mod render;

// Re-export commonly used types
pub use detect::{check_pdf_header, discover_inputs, is_pdf_bytes, InputKind};
pub use error::{Error, Result};
pub use model::{
    CollectionConfig, CollectionMetadata, CollectionResult, ExtractedSection, HeadingEntry,
    HeadingLevel, OutlineResult, PersonaCategory, Section, SubsectionEntry, TextLine,
};
pub use outline::{HeadingClassifier, OutlineBuilder, OutlineOptions};
pub use parser::{ExtractOptions, LineStrategy, TextExtractor, TextSource};
pub use pipeline::{
    run_collection_batch, run_outline_batch, BatchOptions, BatchReport, CollectionPipeline,
    OutlinePipeline,
};
pub use relevance::{CollectionOptions, PersonaResolver, RelevanceScorer};
pub use render::{to_json, validate_collection, validate_outline, JsonFormat};

use std::path::Path;

/// Extract the outline of a PDF file.
///
/// Text extraction failures are not errors: a PDF whose text cannot be read
/// yields the fallback title and an empty outline.
///
/// # Example
///
/// ```no_run
/// use docsift::outline_file;
///
/// let outline = outline_file("file01.pdf").unwrap();
/// for heading in &outline.outline {
///     println!("{} {} (p. {})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    OutlinePipeline::new().process_file(path.as_ref())
}

/// Extract the outline of PDF bytes.
pub fn outline_bytes(data: &[u8]) -> OutlineResult {
    OutlinePipeline::new().process_bytes(data)
}

/// Rank the sections of a collection described by a JSON file.
///
/// The listed PDFs are read from the `PDFs` directory next to the file.
///
/// # Example
///
/// ```no_run
/// use docsift::analyze_collection_file;
///
/// let result = analyze_collection_file("Collection 1/challenge1b_input.json").unwrap();
/// for section in &result.extracted_sections {
///     println!("{}. {}", section.importance_rank, section.section_title);
/// }
/// ```
pub fn analyze_collection_file<P: AsRef<Path>>(path: P) -> Result<CollectionResult> {
    CollectionPipeline::new().process_file(path.as_ref())
}
