//! Collection-level types: input config, sections and the ranked output record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed persona taxonomy driving relevance scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaCategory {
    TravelPlanner,
    HrProfessional,
    FoodContractor,
    Researcher,
    Student,
    Analyst,
    General,
}

impl PersonaCategory {
    /// Categories that can be matched, in resolution order. `General` is the fallback.
    pub const MATCHABLE: [PersonaCategory; 6] = [
        PersonaCategory::TravelPlanner,
        PersonaCategory::HrProfessional,
        PersonaCategory::FoodContractor,
        PersonaCategory::Researcher,
        PersonaCategory::Student,
        PersonaCategory::Analyst,
    ];

    /// Snake-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            PersonaCategory::TravelPlanner => "travel_planner",
            PersonaCategory::HrProfessional => "hr_professional",
            PersonaCategory::FoodContractor => "food_contractor",
            PersonaCategory::Researcher => "researcher",
            PersonaCategory::Student => "student",
            PersonaCategory::Analyst => "analyst",
            PersonaCategory::General => "general",
        }
    }
}

impl fmt::Display for PersonaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document listed in a collection input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// File name relative to the collection's PDF directory
    pub filename: String,
    /// Optional display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Persona block of a collection input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default)]
    pub role: String,
}

/// Job block of a collection input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobToBeDone {
    #[serde(default)]
    pub task: String,
}

/// Collection input configuration.
///
/// Unknown keys (e.g. `challenge_info`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
    #[serde(default)]
    pub persona: Persona,
    #[serde(default)]
    pub job_to_be_done: JobToBeDone,
}

impl CollectionConfig {
    /// File names of all listed documents, in input order.
    pub fn filenames(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }
}

/// A paragraph-like chunk of text, the unit that gets scored and ranked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Chunk text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Base file name of the source document
    pub document: String,
}

impl Section {
    /// Create a new section.
    pub fn new(text: impl Into<String>, page: u32, document: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page,
            document: document.into(),
        }
    }
}

/// A section together with its relevance score and discovery position.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSection<'a> {
    pub section: &'a Section,
    pub relevance_score: f64,
    /// Position of the section in the collection's discovery order
    pub order: usize,
}

/// A ranked section in the collection output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: u32,
    pub page_number: u32,
}

/// A refined excerpt from a page selected as relevant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionEntry {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// Metadata block of the collection output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
}

/// Collection output record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionResult {
    pub metadata: CollectionMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionEntry>,
}

impl CollectionResult {
    /// Record written when a collection could not be processed.
    ///
    /// Keeps whatever metadata the config provided.
    pub fn degraded(config: Option<&CollectionConfig>, timestamp: impl Into<String>) -> Self {
        let metadata = match config {
            Some(config) => CollectionMetadata {
                input_documents: config.filenames(),
                persona: config.persona.role.clone(),
                job_to_be_done: config.job_to_be_done.task.clone(),
                processing_timestamp: timestamp.into(),
            },
            None => CollectionMetadata {
                processing_timestamp: timestamp.into(),
                ..Default::default()
            },
        };
        Self {
            metadata,
            extracted_sections: Vec::new(),
            subsection_analysis: Vec::new(),
        }
    }
}
