//! Integration tests for persona resolution, scoring and section ranking.

use docsift::model::{PersonaCategory, Section};
use docsift::relevance::{
    profile, PersonaResolver, RelevanceScorer, SectionExtractor, SubsectionRefiner,
};

const TASK: &str = "Plan a trip of 4 days for a group of 10 college friends.";

fn travel_sections() -> Vec<Section> {
    vec![
        Section::new(
            "Coastal hotels with sea views and a rooftop restaurant for the group.",
            1,
            "cities.pdf",
        ),
        Section::new("ok", 1, "cities.pdf"),
        Section::new(
            "1. Day trip itinerary: booking museum tours, transport passes and dining for friends.",
            2,
            "things.pdf",
        ),
        Section::new("Copyright notice", 3, "things.pdf"),
        Section::new(
            "Budget accommodation near the station, with a college student discount.",
            4,
            "tips.pdf",
        ),
        Section::new("The region has a long history of wine production.", 5, "history.pdf"),
    ]
}

#[test]
fn test_reference_personas() {
    let resolver = PersonaResolver::new();
    assert_eq!(resolver.resolve("Travel Planner", "Plan a trip"), PersonaCategory::TravelPlanner);
    assert_eq!(
        resolver.resolve("HR Professional", "Create forms"),
        PersonaCategory::HrProfessional
    );
    assert_eq!(resolver.resolve("Manager", "Plan vacation"), PersonaCategory::TravelPlanner);
    assert_eq!(resolver.resolve("Unknown", "Unknown task"), PersonaCategory::General);
}

#[test]
fn test_general_persona_has_no_tables() {
    assert!(profile(PersonaCategory::General).is_none());
    let scorer = RelevanceScorer::new();
    let b = scorer.breakdown("hotel restaurant itinerary", PersonaCategory::General, TASK);
    assert_eq!(b.keyword, 0.0);
    assert_eq!(b.job, 0.0);
}

#[test]
fn test_score_monotonic_in_keywords() {
    let scorer = RelevanceScorer::new();
    let category = PersonaCategory::TravelPlanner;
    // same word count, one more distinct keyword each step
    let texts = [
        "a quiet place near the old quay",
        "a quiet hotel near the old quay",
        "a quiet hotel near the old tour",
        "a quiet hotel near the restaurant tour",
    ];
    let scores: Vec<f64> = texts.iter().map(|t| scorer.score(t, category, TASK)).collect();
    assert!(scores.windows(2).all(|w| w[0] <= w[1]), "{:?}", scores);
    assert!(scores[3] > scores[0]);
}

#[test]
fn test_extracted_sections_above_floor() {
    let sections = travel_sections();
    let extractor = SectionExtractor::default();
    let scorer = RelevanceScorer::new();
    let extracted = extractor.extract(&sections, PersonaCategory::TravelPlanner, TASK);

    assert!(!extracted.is_empty());
    for entry in &extracted {
        let source = sections
            .iter()
            .find(|s| s.page == entry.page_number && s.document == entry.document)
            .unwrap();
        assert!(scorer.score(&source.text, PersonaCategory::TravelPlanner, TASK) > 0.1);
    }
    assert!(extracted.iter().all(|e| e.document != "history.pdf"));
}

#[test]
fn test_ranks_are_dense() {
    let sections = travel_sections();
    for max in [1, 2, 10] {
        let extracted =
            SectionExtractor::new(max).extract(&sections, PersonaCategory::TravelPlanner, TASK);
        let survivors = SectionExtractor::new(usize::MAX)
            .score_all(&sections, PersonaCategory::TravelPlanner, TASK)
            .len();
        let ranks: Vec<u32> = extracted.iter().map(|e| e.importance_rank).collect();
        let expected: Vec<u32> = (1..=max.min(survivors) as u32).collect();
        assert_eq!(ranks, expected);
    }
}

#[test]
fn test_subsections_come_from_ranked_pages() {
    let sections = travel_sections();
    let extracted =
        SectionExtractor::new(2).extract(&sections, PersonaCategory::TravelPlanner, TASK);
    let subsections = SubsectionRefiner::default().analyze(&sections, &extracted);

    assert!(!subsections.is_empty());
    for entry in &subsections {
        assert!(extracted.iter().any(|e| e.page_number == entry.page_number));
        assert!(entry.refined_text.chars().count() > 50);
    }
}

#[test]
fn test_ranking_is_idempotent() {
    let sections = travel_sections();
    let extractor = SectionExtractor::default();
    let first = extractor.extract(&sections, PersonaCategory::TravelPlanner, TASK);
    let second = extractor.extract(&sections, PersonaCategory::TravelPlanner, TASK);
    assert_eq!(first, second);
}
