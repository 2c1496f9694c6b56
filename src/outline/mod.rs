//! Heading outline extraction from plain text lines.
//!
//! The heuristics are English-only and look at text shape alone: no font
//! metrics, no bounding boxes.

mod builder;
mod classifier;
mod title;

pub use builder::{OutlineBuilder, OutlineOptions};
pub use classifier::HeadingClassifier;
pub use title::{TitleResolver, FALLBACK_TITLE};

pub(crate) use classifier::is_upper;
