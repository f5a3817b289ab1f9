use std::io::Write;

use sdkgen_model::{ApiDescriptor, TypesDescriptor};

use crate::config::BackendConfig;
use crate::error::CodegenError;
use crate::mapper::{map_type, to_snake_case, to_upper_camel};
use crate::template::{
    ClientContext, LiteralSyntax, TemplateSet, TypesContext, CLIENT_TEMPLATE, TYPES_TEMPLATE,
};
use crate::traits::{AdditionalFile, FileRole, LanguageBackend, OutputStructure};

const LANGUAGE: &str = "rust";

const CLIENT: &str = include_str!("../../templates/rust/client.rs.jinja");
const TYPES: &str = include_str!("../../templates/rust/types.rs.jinja");
const CARGO_TOML: &str = include_str!("../../templates/rust/Cargo.toml.jinja");
const LIB_RS: &str = include_str!("../../templates/rust/lib.rs.jinja");
const JSONRPC: &str = include_str!("../../templates/rust/jsonrpc.rs.jinja");

const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use",
    "where", "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv",
    "try", "typeof", "unsized", "virtual", "yield",
];

// Cannot be written as raw identifiers.
const NON_RAW: &[&str] = &["self", "super", "crate", "_"];

/// Rust client backend (async `reqwest` transport, serde types).
#[derive(Debug)]
pub struct RustBackend {
    templates: TemplateSet,
    config: BackendConfig,
}

impl RustBackend {
    pub fn new(config: BackendConfig) -> Result<Self, CodegenError> {
        config.validate()?;
        let mut templates = TemplateSet::new();
        templates.helper("rustType", rust_type);
        templates.helper("rustClassName", to_upper_camel);
        templates.helper("rustMethodName", rust_field_name);
        templates.helper("rustFieldName", rust_field_name);
        templates.field_type_helper("rustFieldType", rust_field_type);
        templates.literal_syntax(LiteralSyntax::Rust);
        templates.add(LANGUAGE, CLIENT_TEMPLATE, CLIENT)?;
        templates.add(LANGUAGE, TYPES_TEMPLATE, TYPES)?;
        Ok(Self { templates, config })
    }
}

impl LanguageBackend for RustBackend {
    fn language(&self) -> &str {
        LANGUAGE
    }

    fn emit_client(&self, api: &ApiDescriptor, sink: &mut dyn Write) -> Result<(), CodegenError> {
        self.templates.render_file(
            CLIENT_TEMPLATE,
            ClientContext::new(api, &self.config),
            sink,
            LANGUAGE,
            FileRole::Client,
            self.client_file_name(),
        )
    }

    fn emit_types(
        &self,
        types: &TypesDescriptor,
        sink: &mut dyn Write,
    ) -> Result<(), CodegenError> {
        self.templates.render_file(
            TYPES_TEMPLATE,
            TypesContext {
                types,
                sdk: &self.config,
            },
            sink,
            LANGUAGE,
            FileRole::Types,
            self.types_file_name(),
        )
    }

    fn file_extension(&self) -> &str {
        ".rs"
    }

    fn client_file_name(&self) -> String {
        "src/client.rs".to_string()
    }

    fn types_file_name(&self) -> String {
        "src/types.rs".to_string()
    }

    fn additional_files(&self) -> Vec<AdditionalFile> {
        vec![
            AdditionalFile::new("Cargo.toml", CARGO_TOML).with_data(self.config.manifest_data()),
            AdditionalFile::new("src/lib.rs", LIB_RS),
            AdditionalFile::new("src/jsonrpc.rs", JSONRPC),
        ]
    }

    fn output_structure(&self) -> OutputStructure {
        OutputStructure::new("src", "src")
    }

    fn render_additional(&self, file: &AdditionalFile) -> Result<String, minijinja::Error> {
        file.render_with(&self.templates)
    }
}

fn rust_type(source: &str) -> String {
    map_type(source, LANGUAGE)
}

fn rust_field_type(source: &str, optional: bool, list: bool) -> String {
    let base = rust_type(source);
    let ty = if list { format!("Vec<{base}>") } else { base };
    if optional {
        format!("Option<{ty}>")
    } else {
        ty
    }
}

/// Snake-case identifier, escaped when it collides with a keyword.
fn rust_field_name(name: &str) -> String {
    let ident = to_snake_case(name);
    if NON_RAW.contains(&ident.as_str()) {
        format!("{ident}_")
    } else if RESERVED.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else {
        ident
    }
}
