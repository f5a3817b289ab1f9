use std::io::Write;

use indexmap::IndexSet;
use sdkgen_model::{ApiDescriptor, TypesDescriptor};

use crate::error::CodegenError;
use crate::template::TemplateSet;

/// Client SDK backend for one target language.
///
/// A backend renders the model into source text and describes where every
/// file belongs; it never touches the file system. Backends hold no mutable
/// state, so one instance may render on several threads at once.
pub trait LanguageBackend: Send + Sync {
    /// Registry name of the target language (e.g., "dart").
    fn language(&self) -> &str;

    /// Write the complete client source to `sink`.
    ///
    /// On error the sink may hold partial output and must be discarded.
    fn emit_client(&self, api: &ApiDescriptor, sink: &mut dyn Write) -> Result<(), CodegenError>;

    /// Write the complete type definitions source to `sink`.
    fn emit_types(&self, types: &TypesDescriptor, sink: &mut dyn Write)
        -> Result<(), CodegenError>;

    /// Source file extension including the leading dot (e.g., ".dart").
    fn file_extension(&self) -> &str;

    /// Relative path of the client file.
    fn client_file_name(&self) -> String;

    /// Relative path of the types file.
    fn types_file_name(&self) -> String;

    /// Every other file the generated project needs (manifest, runtime support).
    fn additional_files(&self) -> Vec<AdditionalFile>;

    /// Directories the caller should create before writing files.
    fn output_structure(&self) -> OutputStructure;

    /// Render one of this backend's additional files. Backends with helpers
    /// override this so the file's template can call them.
    fn render_additional(&self, file: &AdditionalFile) -> Result<String, minijinja::Error> {
        file.render()
    }
}

/// Which output file of a backend an operation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    Client,
    Types,
    Additional,
}

impl std::fmt::Display for FileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FileRole::Client => "client",
            FileRole::Types => "types",
            FileRole::Additional => "additional",
        })
    }
}

/// A non-primary file of the generated project, rendered from its own
/// template and data.
#[derive(Debug, Clone, PartialEq)]
pub struct AdditionalFile {
    /// Path relative to the output root
    pub path: String,
    /// Template body
    pub template: &'static str,
    /// Data bound to the template; `None` renders it with an empty context
    pub data: Option<serde_json::Value>,
}

impl AdditionalFile {
    pub fn new(path: impl Into<String>, template: &'static str) -> Self {
        Self {
            path: path.into(),
            template,
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Render the template against its data with the shared helpers only.
    pub fn render(&self) -> Result<String, minijinja::Error> {
        self.render_with(&TemplateSet::new())
    }

    /// Render the template against its data in `templates`' environment.
    pub fn render_with(&self, templates: &TemplateSet) -> Result<String, minijinja::Error> {
        let ctx = self
            .data
            .clone()
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
        templates.render_str(self.template, ctx)
    }
}

/// Directory layout of a generated project. Purely descriptive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputStructure {
    pub client_dir: String,
    pub types_dir: String,
    pub extra_dirs: IndexSet<String>,
}

impl OutputStructure {
    pub fn new(client_dir: impl Into<String>, types_dir: impl Into<String>) -> Self {
        Self {
            client_dir: client_dir.into(),
            types_dir: types_dir.into(),
            extra_dirs: IndexSet::new(),
        }
    }

    pub fn with_extra_dir(mut self, dir: impl Into<String>) -> Self {
        self.extra_dirs.insert(dir.into());
        self
    }

    /// All directories to create, deduplicated, in declaration order.
    /// The output root itself ("" or ".") is skipped.
    pub fn directories(&self) -> IndexSet<&str> {
        [self.client_dir.as_str(), self.types_dir.as_str()]
            .into_iter()
            .chain(self.extra_dirs.iter().map(String::as_str))
            .filter(|dir| !dir.is_empty() && *dir != ".")
            .collect()
    }
}
