//! Collection input to ranked sections and refined excerpts.

use std::fs;
use std::path::Path;

use crate::detect::InputKind;
use crate::error::Result;
use crate::model::{CollectionConfig, CollectionMetadata, CollectionResult, Section};
use crate::parser::{ExtractOptions, TextSource};
use crate::relevance::{CollectionOptions, PersonaResolver, SectionExtractor, SubsectionRefiner};
use crate::render::validate_collection;

use super::{file_stem, timestamp, BatchJob};

/// Ranks the sections of a document collection for a persona and task.
pub struct CollectionPipeline {
    source: TextSource,
    resolver: PersonaResolver,
    extractor: SectionExtractor,
    refiner: SubsectionRefiner,
    options: CollectionOptions,
}

impl CollectionPipeline {
    /// Create a pipeline with default options, reading plain text lines.
    pub fn new() -> Self {
        Self::with_options(CollectionOptions::default())
    }

    /// Create a pipeline with custom options.
    pub fn with_options(options: CollectionOptions) -> Self {
        Self {
            source: TextSource::new(ExtractOptions::new().plain_text()),
            resolver: PersonaResolver::new(),
            extractor: options.section_extractor(),
            refiner: options.subsection_refiner(),
            options,
        }
    }

    /// Replace the text source.
    pub fn with_source(mut self, source: TextSource) -> Self {
        self.source = source;
        self
    }

    /// Get the collection options.
    pub fn options(&self) -> &CollectionOptions {
        &self.options
    }

    /// Read and parse a collection input file.
    pub fn load_config(&self, path: &Path) -> Result<CollectionConfig> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Process a collection input file, reading PDFs from the directory next to it.
    pub fn process_file(&self, path: &Path) -> Result<CollectionResult> {
        let config = self.load_config(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        self.analyze(&config, &base.join(&self.options.pdf_dir_name))
    }

    /// Rank the sections of every listed document found in `pdf_dir`.
    ///
    /// Listed documents missing from `pdf_dir` are skipped.
    pub fn analyze(&self, config: &CollectionConfig, pdf_dir: &Path) -> Result<CollectionResult> {
        let role = &config.persona.role;
        let task = &config.job_to_be_done.task;
        let category = self.resolver.resolve(role, task);
        log::debug!("Persona {:?} resolved to {}", role, category);

        let sections = self.collect_sections(config, pdf_dir)?;
        let extracted_sections = self.extractor.extract(&sections, category, task);
        let subsection_analysis = self.refiner.analyze(&sections, &extracted_sections);
        log::debug!(
            "{} sections, {} ranked, {} refined",
            sections.len(),
            extracted_sections.len(),
            subsection_analysis.len()
        );

        Ok(CollectionResult {
            metadata: CollectionMetadata {
                input_documents: config.filenames(),
                persona: role.clone(),
                job_to_be_done: task.clone(),
                processing_timestamp: timestamp(),
            },
            extracted_sections,
            subsection_analysis,
        })
    }

    fn collect_sections(&self, config: &CollectionConfig, pdf_dir: &Path) -> Result<Vec<Section>> {
        let mut sections = Vec::new();

        for doc in &config.documents {
            let path = pdf_dir.join(&doc.filename);
            if !path.is_file() {
                log::debug!("Skipping missing document {}", path.display());
                continue;
            }

            let name = Path::new(&doc.filename)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| doc.filename.clone());
            let data = fs::read(&path)?;
            sections.extend(self.source.sections(&data, &name));
        }

        Ok(sections)
    }
}

impl Default for CollectionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchJob for CollectionPipeline {
    type Record = CollectionResult;

    fn input_kind(&self) -> InputKind {
        InputKind::CollectionJson
    }

    fn output_name(&self, input: &Path) -> String {
        format!("{}_output.json", file_stem(input))
    }

    fn run(&self, input: &Path) -> Result<CollectionResult> {
        self.process_file(input)
    }

    fn degraded(&self, input: &Path) -> CollectionResult {
        let config = self.load_config(input).ok();
        CollectionResult::degraded(config.as_ref(), timestamp())
    }

    fn validate(&self, value: &serde_json::Value) -> Result<()> {
        validate_collection(value)
    }
}
