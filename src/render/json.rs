//! JSON rendering for outline and collection records.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a record to JSON.
pub fn to_json<T: Serialize + ?Sized>(record: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(record),
        JsonFormat::Compact => serde_json::to_string(record),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
