//! Persona keyword tables and persona resolution.
//!
//! The tables are constant data shared by every collection; nothing mutates
//! them after startup.

use crate::model::PersonaCategory;

/// Keyword tables for one persona category.
#[derive(Debug, Clone, Copy)]
pub struct PersonaProfile {
    pub category: PersonaCategory,
    /// Substrings looked for in the persona role
    pub role_anchors: &'static [&'static str],
    /// Substrings looked for in the task when no role anchor matched
    pub task_anchors: &'static [&'static str],
    /// Keywords counted in section text
    pub keywords: &'static [&'static str],
    /// Task-oriented keywords counted when present in both the task and the text
    pub job_patterns: &'static [&'static str],
}

/// Profiles in resolution order.
pub const PROFILES: [PersonaProfile; 6] = [
    PersonaProfile {
        category: PersonaCategory::TravelPlanner,
        role_anchors: &["travel", "planner", "trip"],
        task_anchors: &["trip", "travel", "vacation"],
        keywords: &[
            "travel", "trip", "vacation", "tour", "itinerary", "booking", "hotel", "restaurant",
            "attraction", "activity", "transport", "budget", "planning", "schedule", "day",
            "group", "friends", "college", "student", "accommodation", "dining", "sightseeing",
        ],
        job_patterns: &["plan", "trip", "itinerary", "schedule", "booking", "accommodation"],
    },
    PersonaProfile {
        category: PersonaCategory::HrProfessional,
        role_anchors: &["hr", "human resources", "professional"],
        task_anchors: &["form", "onboarding", "compliance"],
        keywords: &[
            "form", "onboarding", "compliance", "employee", "hr", "human resources", "policy",
            "procedure", "document", "signature", "fill", "complete", "submit", "approval",
            "workflow", "automation", "digital", "electronic", "management", "tracking",
        ],
        job_patterns: &["create", "form", "fillable", "digital", "automation", "workflow"],
    },
    PersonaProfile {
        category: PersonaCategory::FoodContractor,
        role_anchors: &["food", "catering", "contractor"],
        task_anchors: &["menu", "buffet", "catering"],
        keywords: &[
            "recipe", "cooking", "food", "meal", "dinner", "buffet", "vegetarian", "corporate",
            "catering", "menu", "ingredient", "preparation", "serving", "quantity", "portion",
            "dietary", "restriction", "allergy", "nutrition", "presentation", "service",
        ],
        job_patterns: &["prepare", "menu", "buffet", "catering", "service", "quantity"],
    },
    PersonaProfile {
        category: PersonaCategory::Researcher,
        role_anchors: &["researcher", "phd", "academic"],
        task_anchors: &["research", "literature", "review"],
        keywords: &[
            "research", "study", "analysis", "methodology", "data", "results", "conclusion",
            "literature", "review", "paper", "publication", "experiment", "hypothesis",
            "finding", "evidence", "statistical", "benchmark", "performance", "evaluation",
        ],
        job_patterns: &["review", "literature", "methodology", "analysis", "findings"],
    },
    PersonaProfile {
        category: PersonaCategory::Student,
        role_anchors: &["student", "undergraduate", "college"],
        task_anchors: &["study", "learn", "exam"],
        keywords: &[
            "study", "learn", "education", "course", "exam", "test", "assignment", "homework",
            "concept", "theory", "practice", "exercise", "review", "preparation", "grade",
            "academic", "curriculum", "syllabus", "textbook", "lecture", "tutorial",
        ],
        job_patterns: &["study", "learn", "prepare", "exam", "concept", "practice"],
    },
    PersonaProfile {
        category: PersonaCategory::Analyst,
        role_anchors: &["analyst", "investment", "financial"],
        task_anchors: &["analyze", "report", "financial"],
        keywords: &[
            "analysis", "report", "data", "trend", "financial", "market", "performance",
            "revenue", "investment", "strategy", "business", "corporate", "annual", "quarterly",
            "metrics", "kpi", "forecast", "projection", "comparison", "benchmark",
        ],
        job_patterns: &["analyze", "report", "trend", "performance", "financial", "market"],
    },
];

/// Look up the keyword tables for a category. `General` has none.
pub fn profile(category: PersonaCategory) -> Option<&'static PersonaProfile> {
    PROFILES.iter().find(|p| p.category == category)
}

/// Maps a persona role and task to a [`PersonaCategory`].
///
/// Role anchors are tried first across all categories, then task anchors,
/// then `General`. Matching is unanchored substring containment.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonaResolver;

impl PersonaResolver {
    /// Create a resolver over the built-in tables.
    pub fn new() -> Self {
        Self
    }

    /// Resolve the category for a role and task.
    pub fn resolve(&self, role: &str, task: &str) -> PersonaCategory {
        let role = role.to_lowercase();
        let task = task.to_lowercase();

        first_hit(&role, |p| p.role_anchors)
            .or_else(|| first_hit(&task, |p| p.task_anchors))
            .unwrap_or(PersonaCategory::General)
    }
}

fn first_hit(
    haystack: &str,
    anchors: impl Fn(&PersonaProfile) -> &'static [&'static str],
) -> Option<PersonaCategory> {
    PROFILES
        .iter()
        .find(|p| anchors(p).iter().any(|a| haystack.contains(a)))
        .map(|p| p.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(role: &str, task: &str) -> PersonaCategory {
        PersonaResolver::new().resolve(role, task)
    }

    #[test]
    fn test_reference_personas() {
        assert_eq!(resolve("Travel Planner", "Plan a trip"), PersonaCategory::TravelPlanner);
        assert_eq!(resolve("HR Professional", "Create forms"), PersonaCategory::HrProfessional);
        assert_eq!(resolve("Manager", "Plan vacation"), PersonaCategory::TravelPlanner);
        assert_eq!(resolve("Unknown", "Unknown task"), PersonaCategory::General);
    }

    #[test]
    fn test_remaining_categories() {
        assert_eq!(resolve("Food Contractor", "Prepare buffet"), PersonaCategory::FoodContractor);
        assert_eq!(resolve("PhD Researcher", "x"), PersonaCategory::Researcher);
        assert_eq!(resolve("Undergraduate", "x"), PersonaCategory::Student);
        assert_eq!(resolve("Investment Analyst", "x"), PersonaCategory::Analyst);
    }

    #[test]
    fn test_role_beats_task() {
        // task would say analyst, role says food
        assert_eq!(
            resolve("Catering lead", "Write a financial report"),
            PersonaCategory::FoodContractor
        );
    }

    #[test]
    fn test_enumeration_order_wins() {
        // "professional" is an hr anchor, "travel" comes earlier
        assert_eq!(
            resolve("Travel Professional", ""),
            PersonaCategory::TravelPlanner
        );
        // research anchors precede study anchors in the task table
        assert_eq!(
            resolve("Someone", "Review material to study for the exam"),
            PersonaCategory::Researcher
        );
    }

    #[test]
    fn test_substring_inside_word() {
        // "thr" contains "hr"
        assert_eq!(resolve("Anthropologist", ""), PersonaCategory::HrProfessional);
        // "platform" contains "form"
        assert_eq!(resolve("Someone", "Document the platform"), PersonaCategory::HrProfessional);
    }

    #[test]
    fn test_profile_lookup() {
        assert!(profile(PersonaCategory::General).is_none());
        let travel = profile(PersonaCategory::TravelPlanner).unwrap();
        assert!(travel.keywords.contains(&"itinerary"));
        assert!(travel.job_patterns.contains(&"plan"));
        let order: Vec<PersonaCategory> = PROFILES.iter().map(|p| p.category).collect();
        assert_eq!(order, PersonaCategory::MATCHABLE.to_vec());
    }
}
