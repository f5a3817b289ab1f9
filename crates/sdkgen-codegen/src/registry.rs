use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::backends::{create_backend, BUILTIN_LANGUAGES};
use crate::config::BackendConfig;
use crate::error::CodegenError;
use crate::traits::LanguageBackend;

/// Language name → backend lookup.
///
/// Registration needs `&mut self`; lookups take `&self` and hand out shared
/// `Arc`s, so a populated registry can be read from many threads.
#[derive(Default, Clone)]
pub struct BackendRegistry {
    backends: BTreeMap<String, Arc<dyn LanguageBackend>>,
}

impl BackendRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in backend, configured with `config`.
    pub fn with_builtin_backends(config: &BackendConfig) -> Result<Self, CodegenError> {
        config.validate()?;
        let mut registry = Self::new();
        for language in BUILTIN_LANGUAGES {
            registry.register(*language, create_backend(language, config)?);
        }
        Ok(registry)
    }

    /// Store `backend` under `name`. An existing entry for the same name is
    /// replaced.
    pub fn register(&mut self, name: impl Into<String>, backend: Arc<dyn LanguageBackend>) {
        let name = name.into();
        debug!(language = %name, "registering backend");
        if self.backends.insert(name.clone(), backend).is_some() {
            debug!(language = %name, "replaced existing backend");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn LanguageBackend>> {
        self.backends.get(name).cloned()
    }

    /// Like [`get`](Self::get), but an unknown name becomes
    /// `CodegenError::UnsupportedLanguage` listing what is available.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn LanguageBackend>, CodegenError> {
        self.get(name).ok_or_else(|| CodegenError::UnsupportedLanguage {
            language: name.to_string(),
            available: self.list(),
        })
    }

    /// Registered names, sorted.
    pub fn list(&self) -> Vec<String> {
        self.backends.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("languages", &self.list())
            .finish()
    }
}
