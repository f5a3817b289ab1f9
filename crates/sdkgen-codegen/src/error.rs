use thiserror::Error;

use crate::traits::FileRole;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("unsupported target language: {language} (available: {})", .available.join(", "))]
    UnsupportedLanguage {
        language: String,
        available: Vec<String>,
    },

    #[error("invalid template '{name}' for {language}: {source}")]
    Template {
        language: String,
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to render {role} file '{path}' for {language}: {source}")]
    Render {
        language: String,
        role: FileRole,
        path: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("invalid backend config: {0}")]
    InvalidConfig(String),
}

impl CodegenError {
    /// Language the error belongs to, if it is tied to one.
    pub fn language(&self) -> Option<&str> {
        match self {
            CodegenError::UnsupportedLanguage { language, .. }
            | CodegenError::Template { language, .. }
            | CodegenError::Render { language, .. } => Some(language),
            CodegenError::InvalidConfig(_) => None,
        }
    }
}
