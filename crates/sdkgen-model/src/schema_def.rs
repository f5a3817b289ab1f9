use jsonschema::Validator;
use schemars::schema_for;

use crate::report::{ErrorEntry, E_SCHEMA_VIOLATION};
use crate::types::{ApiDescriptor, TypesDescriptor};

/// JSON Schema for the API model input format.
pub fn api_schema() -> serde_json::Value {
    serde_json::to_value(schema_for!(ApiDescriptor)).expect("schema serialization should not fail")
}

/// JSON Schema for the types model input format.
pub fn types_schema() -> serde_json::Value {
    serde_json::to_value(schema_for!(TypesDescriptor))
        .expect("schema serialization should not fail")
}

/// Validate a document against a JSON Schema, returning findings as `ErrorEntry`s.
pub fn validate_against_schema(
    value: &serde_json::Value,
    schema: &serde_json::Value,
    file: &str,
) -> Vec<ErrorEntry> {
    let compiled = match Validator::new(schema) {
        Ok(v) => v,
        Err(e) => {
            return vec![ErrorEntry::error(
                E_SCHEMA_VIOLATION,
                format!("Invalid schema: {e}"),
                file,
                "$",
            )];
        }
    };

    compiled
        .iter_errors(value)
        .map(|err| {
            let instance_path = err.instance_path.as_str();
            let path = if instance_path.is_empty() {
                "$".to_string()
            } else {
                format!("${instance_path}")
            };
            ErrorEntry::error(E_SCHEMA_VIOLATION, err.to_string(), file, &path)
        })
        .collect()
}
