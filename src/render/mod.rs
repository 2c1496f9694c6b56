//! Rendering and validation of output records.

mod json;
mod schema;

pub use json::{to_json, JsonFormat};
pub use schema::{validate_collection, validate_outline};
