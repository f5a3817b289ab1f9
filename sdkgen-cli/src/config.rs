use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sdkgen_codegen::BackendConfig;
use serde::Deserialize;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "sdkgen.config.json";

/// Output directory used when neither the config file nor `-o` names one.
pub const DEFAULT_OUTPUT_DIR: &str = "generated";

/// Contents of `sdkgen.config.json`.
///
/// Relative paths are resolved against the directory holding the file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratorConfig {
    pub api: Option<PathBuf>,
    pub types: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub sdk_name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// Values given on the command line; each one overrides the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api: Option<PathBuf>,
    pub types: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub languages: Vec<String>,
    pub sdk_name: Option<String>,
    pub version: Option<String>,
}

/// Fully resolved settings of one `generate` run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSettings {
    pub api: PathBuf,
    pub types: Option<PathBuf>,
    pub output: PathBuf,
    /// Empty means every registered language
    pub languages: Vec<String>,
    pub backend: BackendConfig,
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        let mut config: GeneratorConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config '{}'", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.api = config.api.map(|p| base.join(p));
        config.types = config.types.map(|p| base.join(p));
        config.output = config.output.map(|p| base.join(p));
        Ok(config)
    }

    /// Load `explicit` if given, else `sdkgen.config.json` in the working
    /// directory if present, else an empty config.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply command-line overrides and fill in defaults.
    pub fn resolve(self, overrides: Overrides) -> Result<GenerateSettings> {
        let Some(api) = overrides.api.or(self.api) else {
            anyhow::bail!("No API description given (use --api or set \"api\" in {DEFAULT_CONFIG_FILE})");
        };

        let defaults = BackendConfig::default();
        let backend = BackendConfig {
            sdk_name: overrides
                .sdk_name
                .or(self.sdk_name)
                .unwrap_or(defaults.sdk_name),
            version: overrides.version.or(self.version).unwrap_or(defaults.version),
            description: self.description.unwrap_or(defaults.description),
        };
        backend.validate()?;

        let languages = if overrides.languages.is_empty() {
            self.languages
        } else {
            overrides.languages
        };

        Ok(GenerateSettings {
            api,
            types: overrides.types.or(self.types),
            output: overrides
                .output
                .or(self.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            languages,
            backend,
        })
    }
}
