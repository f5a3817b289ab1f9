use std::collections::BTreeMap;

use sdkgen_model::{ApiDescriptor, TypesDescriptor};
use tracing::{debug, warn};

use crate::error::CodegenError;
use crate::traits::{FileRole, LanguageBackend};

/// Reduce a name to its last path element so it cannot escape the output
/// directory. Trailing separators are ignored; "" becomes "." and a name made
/// only of separators becomes "/".
/// e.g., "../../etc/passwd" → "passwd"
pub fn safe_file_name(name: &str) -> String {
    if name.is_empty() {
        return ".".to_string();
    }
    let trimmed = name.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        return "/".to_string();
    }
    match trimmed.rfind(['/', '\\']) {
        Some(pos) => trimmed[pos + 1..].to_string(),
        None => trimmed.to_string(),
    }
}

/// Rendered files of one backend, keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct GeneratedProject {
    /// Files keyed by relative path (sorted for deterministic output)
    files: BTreeMap<String, String>,
}

impl GeneratedProject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    pub fn file(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Result of rendering a whole project: every file that rendered, plus one
/// error per file that did not.
#[derive(Debug, Default)]
pub struct RenderOutcome {
    pub project: GeneratedProject,
    pub errors: Vec<CodegenError>,
}

impl RenderOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Render the client, the types (when given) and every additional file of
/// `backend` into memory.
///
/// A file that fails is left out and its error collected; the remaining
/// files are still rendered.
pub fn render_project(
    backend: &dyn LanguageBackend,
    api: &ApiDescriptor,
    types: Option<&TypesDescriptor>,
) -> RenderOutcome {
    let mut outcome = RenderOutcome::default();
    let language = backend.language();

    // 1. Client
    let mut buf = Vec::new();
    let client_path = backend.client_file_name();
    match backend.emit_client(api, &mut buf) {
        Ok(()) => add_rendered(&mut outcome, language, client_path, buf),
        Err(e) => record_failure(&mut outcome, e),
    }

    // 2. Types
    if let Some(types) = types {
        let mut buf = Vec::new();
        let types_path = backend.types_file_name();
        match backend.emit_types(types, &mut buf) {
            Ok(()) => add_rendered(&mut outcome, language, types_path, buf),
            Err(e) => record_failure(&mut outcome, e),
        }
    }

    // 3. Project skeleton files
    for file in backend.additional_files() {
        match backend.render_additional(&file) {
            Ok(content) => {
                debug!(language, path = %file.path, "rendered additional file");
                outcome.project.add_file(file.path, content);
            }
            Err(source) => record_failure(
                &mut outcome,
                CodegenError::Render {
                    language: language.to_string(),
                    role: FileRole::Additional,
                    path: file.path,
                    source,
                },
            ),
        }
    }

    outcome
}

fn add_rendered(outcome: &mut RenderOutcome, language: &str, path: String, buf: Vec<u8>) {
    // Templates are UTF-8 and so is every value we feed them.
    let content = String::from_utf8_lossy(&buf).into_owned();
    debug!(language, path = %path, bytes = content.len(), "rendered file");
    outcome.project.add_file(path, content);
}

fn record_failure(outcome: &mut RenderOutcome, error: CodegenError) {
    warn!("{error}");
    outcome.errors.push(error);
}
