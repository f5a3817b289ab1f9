pub mod dart;
pub mod go_lang;
pub mod python;
pub mod rust_lang;

use std::sync::Arc;

use crate::config::BackendConfig;
use crate::error::CodegenError;
use crate::traits::LanguageBackend;

/// Languages shipped with the engine, in registration order.
pub const BUILTIN_LANGUAGES: &[&str] = &["dart", "python", "rust", "go"];

/// Create the built-in backend for `language`.
pub fn create_backend(
    language: &str,
    config: &BackendConfig,
) -> Result<Arc<dyn LanguageBackend>, CodegenError> {
    let config = config.clone();
    match language {
        "dart" => Ok(Arc::new(dart::DartBackend::new(config)?)),
        "python" => Ok(Arc::new(python::PythonBackend::new(config)?)),
        "rust" => Ok(Arc::new(rust_lang::RustBackend::new(config)?)),
        "go" => Ok(Arc::new(go_lang::GoBackend::new(config)?)),
        other => Err(CodegenError::UnsupportedLanguage {
            language: other.to_string(),
            available: BUILTIN_LANGUAGES.iter().map(|s| s.to_string()).collect(),
        }),
    }
}
