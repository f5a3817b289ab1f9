use std::path::Path;

use serde::de::DeserializeOwned;

use crate::report::{ErrorEntry, ValidationReport, E_PARSE_ERROR};
use crate::schema_def;
use crate::types::{ApiDescriptor, TypesDescriptor};
use crate::validate;

/// Load an API model from a `.json`, `.yaml` or `.yml` file.
///
/// The raw document is checked against the model's JSON Schema before
/// deserializing; semantic findings (duplicates, unknown versions) are
/// returned in the report rather than as an error.
#[allow(clippy::result_large_err)]
pub fn load_api(path: &Path) -> Result<(ApiDescriptor, ValidationReport), LoadError> {
    let file = display_name(path);
    let api: ApiDescriptor = load_document(path, &file, &schema_def::api_schema())?;
    let report = validate::validate_api(&api, &file);
    Ok((api, report))
}

/// Load a types model from a `.json`, `.yaml` or `.yml` file.
#[allow(clippy::result_large_err)]
pub fn load_types(path: &Path) -> Result<(TypesDescriptor, ValidationReport), LoadError> {
    let file = display_name(path);
    let types: TypesDescriptor = load_document(path, &file, &schema_def::types_schema())?;
    let report = validate::validate_types(&types, &file);
    Ok((types, report))
}

/// Parse model content that is already in memory.
#[allow(clippy::result_large_err)]
pub fn parse_document<T: DeserializeOwned>(
    content: &str,
    format: DocumentFormat,
    file: &str,
    schema: &serde_json::Value,
) -> Result<T, LoadError> {
    let value: serde_json::Value = match format {
        DocumentFormat::Json => serde_json::from_str(content)
            .map_err(|e| LoadError::Parse(json_error_to_entry(e, file)))?,
        DocumentFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| LoadError::Parse(yaml_error_to_entry(e, file)))?,
    };

    let violations = schema_def::validate_against_schema(&value, schema, file);
    if !violations.is_empty() {
        return Err(LoadError::SchemaViolation {
            file: file.to_string(),
            report: ValidationReport::from_errors(violations),
        });
    }

    serde_json::from_value(value).map_err(|e| LoadError::Parse(json_error_to_entry(e, file)))
}

/// Supported model file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

/// Errors that prevent a model file from loading at all
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Model file not found: {0}")]
    NotFound(String),

    #[error("Unsupported model file format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    #[error("Failed to parse {}: {}", .0.file, .0.message)]
    Parse(ErrorEntry),

    #[error("{file} does not match the model schema ({} violation(s))", .report.errors.len())]
    SchemaViolation {
        file: String,
        report: ValidationReport,
    },

    #[error("I/O error reading {0}: {1}")]
    Io(String, std::io::Error),
}

#[allow(clippy::result_large_err)]
fn load_document<T: DeserializeOwned>(
    path: &Path,
    file: &str,
    schema: &serde_json::Value,
) -> Result<T, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(file.to_string()));
    }
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(file.to_string()))?;
    let content =
        std::fs::read_to_string(path).map_err(|e| LoadError::Io(file.to_string(), e))?;
    parse_document(&content, format, file, schema)
}

fn display_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn json_error_to_entry(err: serde_json::Error, file: &str) -> ErrorEntry {
    let path = format!("$.line:{}:col:{}", err.line(), err.column());
    ErrorEntry::error(E_PARSE_ERROR, format!("JSON parse error: {err}"), file, &path)
        .with_suggestion("Check JSON syntax and field types")
}

fn yaml_error_to_entry(err: serde_yaml::Error, file: &str) -> ErrorEntry {
    let path = match err.location() {
        Some(loc) => format!("$.line:{}:col:{}", loc.line(), loc.column()),
        None => "$".to_string(),
    };
    ErrorEntry::error(E_PARSE_ERROR, format!("YAML parse error: {err}"), file, &path)
        .with_suggestion("Check YAML syntax and field types")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::E_SCHEMA_VIOLATION;
    use tempfile::TempDir;

    const API_JSON: &str = r#"{
        "package": "gitlab.com/acme/ledger",
        "apiPath": "/v3",
        "methods": [
            { "name": "GetBalance", "version": "v3", "params": [{ "name": "account", "type": "string" }], "returns": "uint64" },
            { "name": "Transfer", "version": "v3", "params": [] }
        ]
    }"#;

    #[test]
    fn test_load_api_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("api.json");
        std::fs::write(&path, API_JSON).unwrap();

        let (api, report) = load_api(&path).unwrap();
        assert!(report.ok);
        assert_eq!(api.methods.len(), 2);
        assert_eq!(api.methods[0].name, "GetBalance");
        assert_eq!(api.resolved_package_name(), "ledger");
    }

    #[test]
    fn test_load_types_yaml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("types.yaml");
        std::fs::write(
            &path,
            "package: ledger\ntypes:\n  - name: Account\n    fields:\n      - name: id\n        type: string\n      - name: tags\n        type: string\n        list: true\nenums:\n  - name: Status\n    values:\n      - name: Active\n        value: 1\n",
        )
        .unwrap();

        let (types, report) = load_types(&path).unwrap();
        assert!(report.ok);
        assert_eq!(types.types[0].fields.len(), 2);
        assert!(types.types[0].fields[1].list);
        assert_eq!(types.enums[0].values[0].name, "Active");
    }

    #[test]
    fn test_duplicates_reported_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("api.json");
        std::fs::write(
            &path,
            r#"{ "package": "ledger", "methods": [{ "name": "A" }, { "name": "A" }] }"#,
        )
        .unwrap();

        let (api, report) = load_api(&path).unwrap();
        assert_eq!(api.methods.len(), 2);
        assert!(report.has_errors());
    }

    #[test]
    fn test_missing_file() {
        let err = load_api(Path::new("/nonexistent/api.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("api.toml");
        std::fs::write(&path, "package = 'ledger'").unwrap();
        let err = load_api(&path).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_document::<ApiDescriptor>(
            "{ invalid json }",
            DocumentFormat::Json,
            "api.json",
            &schema_def::api_schema(),
        )
        .unwrap_err();
        match err {
            LoadError::Parse(entry) => {
                assert_eq!(entry.code, E_PARSE_ERROR);
                assert_eq!(entry.file, "api.json");
                assert!(entry.message.contains("JSON parse error"));
            }
            other => panic!("Expected Parse, got: {other:?}"),
        }
    }

    #[test]
    fn test_schema_violation() {
        let err = parse_document::<ApiDescriptor>(
            r#"{ "package": "ledger", "methods": [{ "params": [] }] }"#,
            DocumentFormat::Json,
            "api.json",
            &schema_def::api_schema(),
        )
        .unwrap_err();
        match err {
            LoadError::SchemaViolation { file, report } => {
                assert_eq!(file, "api.json");
                assert!(report.errors.iter().all(|e| e.code == E_SCHEMA_VIOLATION));
            }
            other => panic!("Expected SchemaViolation, got: {other:?}"),
        }
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), Some(DocumentFormat::Json));
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::from_path(Path::new("a")), None);
    }
}
