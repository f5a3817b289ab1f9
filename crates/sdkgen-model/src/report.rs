use serde::{Deserialize, Serialize};

// ── Diagnostic code constants ──

pub const E_DUPLICATE_SYMBOL: &str = "E_DUPLICATE_SYMBOL";
pub const E_MISSING_FIELD: &str = "E_MISSING_FIELD";
pub const E_PARSE_ERROR: &str = "E_PARSE_ERROR";
pub const E_SCHEMA_VIOLATION: &str = "E_SCHEMA_VIOLATION";
pub const W_UNKNOWN_VERSION: &str = "W_UNKNOWN_VERSION";

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation/parsing finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Machine-readable stable code
    pub code: String,
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Model file the finding belongs to
    pub file: String,
    /// JSONPath to the offending field
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Aggregated validation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the model is usable (no errors, warnings are ok)
    pub ok: bool,
    pub errors: Vec<ErrorEntry>,
}

impl ValidationReport {
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<ErrorEntry>) -> Self {
        let ok = !errors.iter().any(|e| e.severity == Severity::Error);
        Self { ok, errors }
    }

    /// Add an entry and update the ok flag
    pub fn push(&mut self, entry: ErrorEntry) {
        if entry.severity == Severity::Error {
            self.ok = false;
        }
        self.errors.push(entry);
    }

    pub fn merge(&mut self, other: ValidationReport) {
        for entry in other.errors {
            self.push(entry);
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.errors.iter().filter(|e| e.severity == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        !self.ok
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::success()
    }
}

impl ErrorEntry {
    pub fn error(code: &str, message: impl Into<String>, file: &str, path: &str) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Error,
            message: message.into(),
            file: file.to_string(),
            path: path.to_string(),
            suggestion: None,
        }
    }

    pub fn warning(code: &str, message: impl Into<String>, file: &str, path: &str) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Warning,
            message: message.into(),
            file: file.to_string(),
            path: path.to_string(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_entry_json_format() {
        let entry = ErrorEntry::error(
            E_DUPLICATE_SYMBOL,
            "Method 'GetBalance' is declared more than once",
            "api.json",
            "$.methods[2].name",
        )
        .with_suggestion("Rename or remove the duplicate method");

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["code"], "E_DUPLICATE_SYMBOL");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["file"], "api.json");
        assert_eq!(json["path"], "$.methods[2].name");
        assert_eq!(json["suggestion"], "Rename or remove the duplicate method");
    }

    #[test]
    fn test_suggestion_omitted_when_absent() {
        let entry = ErrorEntry::warning(W_UNKNOWN_VERSION, "odd version", "api.json", "$");
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("suggestion").is_none());
    }

    #[test]
    fn test_validation_report_from_errors() {
        let report = ValidationReport::from_errors(vec![ErrorEntry::warning(
            W_UNKNOWN_VERSION,
            "some warning",
            "api.json",
            "$.methods[0].version",
        )]);
        assert!(report.ok); // warnings don't make it fail

        let report = ValidationReport::from_errors(vec![ErrorEntry::error(
            E_MISSING_FIELD,
            "missing",
            "api.json",
            "$.package",
        )]);
        assert!(!report.ok);
    }

    #[test]
    fn test_validation_report_merge() {
        let mut first = ValidationReport::success();
        let mut second = ValidationReport::success();
        first.push(ErrorEntry::warning(W_UNKNOWN_VERSION, "w", "a.json", "$"));
        second.push(ErrorEntry::error(E_PARSE_ERROR, "e", "b.json", "$"));

        first.merge(second);
        assert!(first.has_errors());
        assert_eq!(first.count(Severity::Error), 1);
        assert_eq!(first.count(Severity::Warning), 1);
    }
}
