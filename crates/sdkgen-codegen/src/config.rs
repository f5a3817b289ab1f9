use serde::{Deserialize, Serialize};

use crate::error::CodegenError;
use crate::mapper::to_snake_case;

/// Settings shared by every backend: how the generated SDK names and
/// versions itself in file names and dependency manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendConfig {
    /// SDK name (e.g., "ledger"); drives package directories and manifests
    pub sdk_name: String,
    /// SDK version written into manifests, must be semver
    pub version: String,
    /// One-line description written into manifests
    pub description: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            sdk_name: "api".to_string(),
            version: "0.1.0".to_string(),
            description: String::new(),
        }
    }
}

impl BackendConfig {
    pub fn new(sdk_name: impl Into<String>) -> Self {
        Self {
            sdk_name: sdk_name.into(),
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Reject configs that would produce unusable manifests or package
    /// directories outside the output root.
    pub fn validate(&self) -> Result<(), CodegenError> {
        if self.sdk_name.trim().is_empty() {
            return Err(CodegenError::InvalidConfig("sdk name must not be empty".to_string()));
        }
        let package = self.snake_name();
        let usable = package.bytes().any(|b| b.is_ascii_alphanumeric())
            && package
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
        if !usable {
            return Err(CodegenError::InvalidConfig(format!(
                "sdk name '{}' does not yield a package name (got '{package}'); \
                 use letters, digits, '-' or '_'",
                self.sdk_name
            )));
        }
        semver::Version::parse(&self.version).map_err(|e| {
            CodegenError::InvalidConfig(format!("version '{}' is not semver: {e}", self.version))
        })?;
        Ok(())
    }

    /// SDK name as a snake-case, path-safe identifier.
    pub fn snake_name(&self) -> String {
        crate::generator::safe_file_name(&to_snake_case(&self.sdk_name).replace('-', "_"))
    }

    /// Template data bound to manifest files.
    pub fn manifest_data(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.sdk_name,
            "package": self.snake_name(),
            "version": self.version,
            "description": self.description,
        })
    }
}
