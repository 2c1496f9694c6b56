//! Persona-driven relevance ranking of document sections.

mod persona;
mod refine;
mod scorer;
mod sections;

pub use persona::{profile, PersonaProfile, PersonaResolver, PROFILES};
pub use refine::SubsectionRefiner;
pub use scorer::{RelevanceScorer, ScoreBreakdown};
pub use sections::{section_title, SectionExtractor, FALLBACK_SECTION_TITLE};

/// Options for ranking a document collection.
#[derive(Debug, Clone)]
pub struct CollectionOptions {
    /// Maximum number of ranked sections
    pub max_sections: usize,

    /// Maximum number of refined excerpts
    pub max_subsections: usize,

    /// Sections scoring at or below this are discarded
    pub min_score: f64,

    /// Refined excerpts must be longer than this many characters
    pub min_refined_len: usize,

    /// Directory next to the collection input holding its PDFs
    pub pdf_dir_name: String,
}

impl CollectionOptions {
    /// Create new collection options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of ranked sections.
    pub fn with_max_sections(mut self, max: usize) -> Self {
        self.max_sections = max;
        self
    }

    /// Set the maximum number of refined excerpts.
    pub fn with_max_subsections(mut self, max: usize) -> Self {
        self.max_subsections = max;
        self
    }

    /// Set the relevance floor.
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Set the name of the PDF directory next to each collection input.
    pub fn with_pdf_dir_name(mut self, name: impl Into<String>) -> Self {
        self.pdf_dir_name = name.into();
        self
    }

    pub(crate) fn section_extractor(&self) -> SectionExtractor {
        SectionExtractor::new(self.max_sections).with_min_score(self.min_score)
    }

    pub(crate) fn subsection_refiner(&self) -> SubsectionRefiner {
        SubsectionRefiner::new(self.min_refined_len, self.max_subsections)
    }
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self {
            max_sections: 10,
            max_subsections: 20,
            min_score: 0.1,
            min_refined_len: 50,
            pdf_dir_name: "PDFs".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_options_builder() {
        let options = CollectionOptions::new()
            .with_max_sections(5)
            .with_max_subsections(3)
            .with_min_score(0.5)
            .with_pdf_dir_name("docs");

        assert_eq!(options.max_sections, 5);
        assert_eq!(options.max_subsections, 3);
        assert_eq!(options.min_score, 0.5);
        assert_eq!(options.pdf_dir_name, "docs");
    }

    #[test]
    fn test_default_options() {
        let options = CollectionOptions::default();
        assert_eq!(options.max_sections, 10);
        assert_eq!(options.max_subsections, 20);
        assert_eq!(options.min_refined_len, 50);
        assert_eq!(options.pdf_dir_name, "PDFs");
    }
}
