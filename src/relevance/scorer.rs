//! Persona-driven relevance scoring of section text.

use regex::Regex;

use crate::model::PersonaCategory;

use super::persona::profile;

const KEYWORD_WEIGHT: f64 = 0.4;
const JOB_WEIGHT: f64 = 0.3;
const LENGTH_WEIGHT: f64 = 0.2;
const STRUCTURE_WEIGHT: f64 = 0.1;

/// Word count at which the length signal saturates.
const LENGTH_SATURATION_WORDS: f64 = 50.0;

/// Characters inspected for the all-caps heading shape.
const HEADING_PREFIX_CHARS: usize = 50;

/// The four signals that make up a relevance score, before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    /// Distinct persona keywords present in the text
    pub keyword: f64,
    /// Job patterns present in both the task and the text
    pub job: f64,
    /// `min(words / 50, 1.0)`
    pub length: f64,
    /// Heading/list/bullet bonus, at most 0.7
    pub structure: f64,
}

impl ScoreBreakdown {
    /// Weighted total.
    pub fn total(&self) -> f64 {
        KEYWORD_WEIGHT * self.keyword
            + JOB_WEIGHT * self.job
            + LENGTH_WEIGHT * self.length
            + STRUCTURE_WEIGHT * self.structure
    }
}

/// Scores a section of text against a persona category and task.
///
/// Keyword hits are not normalized by section length, so long sections
/// collect more hits than the capped length signal would suggest.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    heading_shape: Regex,
    numbered_marker: Regex,
    bullet_marker: Regex,
}

impl RelevanceScorer {
    /// Create a new scorer.
    pub fn new() -> Self {
        Self {
            heading_shape: Regex::new(r"^[A-Z][A-Z\s]{2,}$").unwrap(),
            numbered_marker: Regex::new(r"^\d+\.").unwrap(),
            bullet_marker: Regex::new(r"^[•\-\*]").unwrap(),
        }
    }

    /// Weighted relevance score.
    pub fn score(&self, text: &str, category: PersonaCategory, task: &str) -> f64 {
        self.breakdown(text, category, task).total()
    }

    /// Individual signals for a section.
    pub fn breakdown(&self, text: &str, category: PersonaCategory, task: &str) -> ScoreBreakdown {
        let text_lower = text.to_lowercase();
        let task_lower = task.to_lowercase();

        let (keyword, job) = match profile(category) {
            Some(profile) => {
                let keyword = profile
                    .keywords
                    .iter()
                    .filter(|k| text_lower.contains(*k))
                    .count();
                let job = profile
                    .job_patterns
                    .iter()
                    .filter(|p| task_lower.contains(*p) && text_lower.contains(*p))
                    .count();
                (keyword as f64, job as f64)
            }
            None => (0.0, 0.0),
        };

        let words = text.split_whitespace().count() as f64;
        let length = (words / LENGTH_SATURATION_WORDS).min(1.0);

        ScoreBreakdown {
            keyword,
            job,
            length,
            structure: self.structure_bonus(text),
        }
    }

    fn structure_bonus(&self, text: &str) -> f64 {
        let prefix: String = text.chars().take(HEADING_PREFIX_CHARS).collect();
        let mut bonus = 0.0;
        if self.heading_shape.is_match(&prefix) {
            bonus += 0.3;
        }
        if self.numbered_marker.is_match(text) {
            bonus += 0.2;
        }
        if self.bullet_marker.is_match(text) {
            bonus += 0.2;
        }
        bonus
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn scorer() -> RelevanceScorer {
        RelevanceScorer::new()
    }

    #[test]
    fn test_keyword_counted_once() {
        let s = scorer();
        let once = s.breakdown("hotel", PersonaCategory::TravelPlanner, "");
        let many = s.breakdown("hotel hotel hotel", PersonaCategory::TravelPlanner, "");
        assert_eq!(once.keyword, 1.0);
        assert_eq!(many.keyword, 1.0);
    }

    #[test]
    fn test_job_requires_task_and_text() {
        let s = scorer();
        let text = "Plan your itinerary around the hotel booking";
        let with_task = s.breakdown(text, PersonaCategory::TravelPlanner, "Plan an itinerary");
        let without_task = s.breakdown(text, PersonaCategory::TravelPlanner, "Relax");
        assert_eq!(with_task.job, 2.0);
        assert_eq!(without_task.job, 0.0);
    }

    #[test]
    fn test_length_saturates() {
        let s = scorer();
        let short = vec!["word"; 25].join(" ");
        let long = vec!["word"; 200].join(" ");
        assert!((s.breakdown(&short, PersonaCategory::General, "").length - 0.5).abs() < EPS);
        assert!((s.breakdown(&long, PersonaCategory::General, "").length - 1.0).abs() < EPS);
    }

    #[test]
    fn test_structure_bonus_is_additive() {
        let s = scorer();
        let structure = |text: &str| s.breakdown(text, PersonaCategory::General, "").structure;
        assert!((structure("IMPORTANT NOTES") - 0.3).abs() < EPS);
        assert!((structure("1. First step") - 0.2).abs() < EPS);
        assert!((structure("• A bullet") - 0.2).abs() < EPS);
        assert!((structure("- A dash") - 0.2).abs() < EPS);
        assert_eq!(s.breakdown("plain", PersonaCategory::General, "").structure, 0.0);
    }

    #[test]
    fn test_heading_shape_checks_first_fifty_chars() {
        let s = scorer();
        let text = format!("{}{}", "A".repeat(50), " and then lowercase text");
        assert!((s.breakdown(&text, PersonaCategory::General, "").structure - 0.3).abs() < EPS);
        let mixed = "HEADING\nbody text follows";
        assert_eq!(s.breakdown(mixed, PersonaCategory::General, "").structure, 0.0);
    }

    #[test]
    fn test_weighted_total() {
        let breakdown = ScoreBreakdown {
            keyword: 2.0,
            job: 1.0,
            length: 0.5,
            structure: 0.3,
        };
        assert!((breakdown.total() - (0.8 + 0.3 + 0.1 + 0.03)).abs() < EPS);
    }

    #[test]
    fn test_general_has_no_keywords() {
        let s = scorer();
        let b = s.breakdown("travel hotel trip", PersonaCategory::General, "plan a trip");
        assert_eq!(b.keyword, 0.0);
        assert_eq!(b.job, 0.0);
    }

    #[test]
    fn test_adding_keyword_never_decreases_score() {
        let s = scorer();
        let task = "Plan a trip";
        let base = "We walked along the harbour in the evening";
        let more = format!("{} near the hotel", base);
        let a = s.score(base, PersonaCategory::TravelPlanner, task);
        let b = s.score(&more, PersonaCategory::TravelPlanner, task);
        assert!(b >= a);
        assert!(b - a >= KEYWORD_WEIGHT - EPS);
    }
}
