//! Post-hoc shape checks for output records.
//!
//! Validation is advisory: callers log a violation and write the record
//! unchanged.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::HeadingLevel;

/// JSON type a field is expected to have.
#[derive(Debug, Clone, Copy)]
enum Kind {
    String,
    Integer,
    Array,
    Object,
}

impl Kind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Kind::String => value.is_string(),
            Kind::Integer => value.is_u64() || value.is_i64(),
            Kind::Array => value.is_array(),
            Kind::Object => value.is_object(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

const OUTLINE_FIELDS: &[(&str, Kind)] = &[("title", Kind::String), ("outline", Kind::Array)];

const HEADING_FIELDS: &[(&str, Kind)] = &[
    ("level", Kind::String),
    ("text", Kind::String),
    ("page", Kind::Integer),
];

const COLLECTION_FIELDS: &[(&str, Kind)] = &[
    ("metadata", Kind::Object),
    ("extracted_sections", Kind::Array),
    ("subsection_analysis", Kind::Array),
];

const METADATA_FIELDS: &[(&str, Kind)] = &[
    ("input_documents", Kind::Array),
    ("persona", Kind::String),
    ("job_to_be_done", Kind::String),
    ("processing_timestamp", Kind::String),
];

const EXTRACTED_FIELDS: &[(&str, Kind)] = &[
    ("document", Kind::String),
    ("section_title", Kind::String),
    ("importance_rank", Kind::Integer),
    ("page_number", Kind::Integer),
];

const SUBSECTION_FIELDS: &[(&str, Kind)] = &[
    ("document", Kind::String),
    ("refined_text", Kind::String),
    ("page_number", Kind::Integer),
];

/// Check the shape of an outline record.
pub fn validate_outline(value: &Value) -> Result<()> {
    let record = check_object(value, "outline record", OUTLINE_FIELDS)?;
    check_items(&record["outline"], "outline", HEADING_FIELDS)?;

    for (i, entry) in as_slice(&record["outline"]).iter().enumerate() {
        let level = entry["level"].as_str().unwrap_or_default();
        if !HeadingLevel::ALL.iter().any(|known| known.as_str() == level) {
            return Err(violation(format!("outline[{}].level: unknown level {:?}", i, level)));
        }
    }
    Ok(())
}

/// Check the shape of a collection record.
pub fn validate_collection(value: &Value) -> Result<()> {
    let record = check_object(value, "collection record", COLLECTION_FIELDS)?;
    check_object(&record["metadata"], "metadata", METADATA_FIELDS)?;

    if !as_slice(&record["metadata"]["input_documents"])
        .iter()
        .all(Value::is_string)
    {
        return Err(violation("metadata.input_documents: expected array of strings"));
    }

    check_items(&record["extracted_sections"], "extracted_sections", EXTRACTED_FIELDS)?;
    check_items(&record["subsection_analysis"], "subsection_analysis", SUBSECTION_FIELDS)
}

fn check_object<'v>(
    value: &'v Value,
    what: &str,
    fields: &[(&str, Kind)],
) -> Result<&'v Map<String, Value>> {
    let object = value
        .as_object()
        .ok_or_else(|| violation(format!("{}: expected object", what)))?;

    for (key, kind) in fields {
        match object.get(*key) {
            None => return Err(violation(format!("{}: missing \"{}\"", what, key))),
            Some(v) if !kind.matches(v) => {
                return Err(violation(format!(
                    "{}.{}: expected {}",
                    what,
                    key,
                    kind.name()
                )))
            }
            Some(_) => {}
        }
    }
    Ok(object)
}

fn check_items(value: &Value, what: &str, fields: &[(&str, Kind)]) -> Result<()> {
    for (i, item) in as_slice(value).iter().enumerate() {
        check_object(item, &format!("{}[{}]", what, i), fields)?;
    }
    Ok(())
}

fn as_slice(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or_default()
}

fn violation(message: impl Into<String>) -> Error {
    Error::SchemaViolation(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_outline() {
        let value = json!({
            "title": "Overview",
            "outline": [{"level": "H1", "text": "Introduction", "page": 1}]
        });
        assert!(validate_outline(&value).is_ok());
        assert!(validate_outline(&json!({"title": "", "outline": []})).is_ok());
    }

    #[test]
    fn test_outline_violations() {
        let missing_title = json!({"outline": []});
        assert!(matches!(
            validate_outline(&missing_title),
            Err(Error::SchemaViolation(_))
        ));

        let bad_page = json!({
            "title": "T",
            "outline": [{"level": "H1", "text": "Intro", "page": "1"}]
        });
        let err = validate_outline(&bad_page).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema violation: outline[0].page: expected integer"
        );

        let bad_level = json!({
            "title": "T",
            "outline": [{"level": "H4", "text": "Intro", "page": 1}]
        });
        assert!(validate_outline(&bad_level).is_err());
    }

    #[test]
    fn test_valid_collection() {
        let value = json!({
            "metadata": {
                "input_documents": ["a.pdf"],
                "persona": "Travel Planner",
                "job_to_be_done": "Plan a trip",
                "processing_timestamp": "2025-07-10T12:00:00.000000"
            },
            "extracted_sections": [
                {"document": "a.pdf", "section_title": "Beaches", "importance_rank": 1, "page_number": 2}
            ],
            "subsection_analysis": [
                {"document": "a.pdf", "refined_text": "Beaches are nice", "page_number": 2}
            ]
        });
        assert!(validate_collection(&value).is_ok());
    }

    #[test]
    fn test_collection_violations() {
        let no_metadata = json!({"extracted_sections": [], "subsection_analysis": []});
        assert!(validate_collection(&no_metadata).is_err());

        let bad_documents = json!({
            "metadata": {
                "input_documents": [1],
                "persona": "",
                "job_to_be_done": "",
                "processing_timestamp": ""
            },
            "extracted_sections": [],
            "subsection_analysis": []
        });
        assert!(validate_collection(&bad_documents).is_err());
    }
}
