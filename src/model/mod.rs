//! Record types shared by the outline and relevance pipelines.
//!
//! Everything here is created during a single pass over one document or
//! collection, serialized, and discarded.

mod collection;
mod outline;

pub use collection::{
    CollectionConfig, CollectionMetadata, CollectionResult, DocumentRef, ExtractedSection,
    JobToBeDone, Persona, PersonaCategory, ScoredSection, Section, SubsectionEntry,
};
pub use outline::{HeadingEntry, HeadingLevel, OutlineResult, TextLine};
