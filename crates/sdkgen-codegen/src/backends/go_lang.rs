use std::io::Write;

use sdkgen_model::{ApiDescriptor, TypesDescriptor};

use crate::config::BackendConfig;
use crate::error::CodegenError;
use crate::mapper::{map_type, to_lower_camel, to_upper_camel};
use crate::template::{ClientContext, TemplateSet, TypesContext, CLIENT_TEMPLATE, TYPES_TEMPLATE};
use crate::traits::{AdditionalFile, FileRole, LanguageBackend, OutputStructure};

const LANGUAGE: &str = "go";

const CLIENT: &str = include_str!("../../templates/go/client.go.jinja");
const TYPES: &str = include_str!("../../templates/go/types.go.jinja");
const GO_MOD: &str = include_str!("../../templates/go/go.mod.jinja");
const JSONRPC: &str = include_str!("../../templates/go/jsonrpc.go.jinja");

const KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

// Names the generated methods already bind.
const BOUND: &[&str] = &["c", "ctx", "params", "result", "err"];

/// Go client backend (`net/http` transport, tagged structs).
///
/// Every emitted file lives in the module root and shares one package clause
/// derived from the SDK name.
#[derive(Debug)]
pub struct GoBackend {
    templates: TemplateSet,
    config: BackendConfig,
}

impl GoBackend {
    pub fn new(config: BackendConfig) -> Result<Self, CodegenError> {
        config.validate()?;
        let mut templates = TemplateSet::new();
        templates.helper("goType", go_type);
        templates.helper("goExportedName", to_upper_camel);
        templates.helper("goMethodName", to_upper_camel);
        templates.helper("goParamName", go_param_name);
        templates.field_type_helper("goFieldType", go_field_type);
        templates.global("goPackage", config.snake_name());
        templates.add(LANGUAGE, CLIENT_TEMPLATE, CLIENT)?;
        templates.add(LANGUAGE, TYPES_TEMPLATE, TYPES)?;
        Ok(Self { templates, config })
    }
}

impl LanguageBackend for GoBackend {
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
        ".go"
    }

    fn client_file_name(&self) -> String {
        "client.go".to_string()
    }

    fn types_file_name(&self) -> String {
        "types.go".to_string()
    }

    fn additional_files(&self) -> Vec<AdditionalFile> {
        let data = self.config.manifest_data();
        vec![
            AdditionalFile::new("go.mod", GO_MOD).with_data(data),
            AdditionalFile::new("jsonrpc.go", JSONRPC),
        ]
    }

    fn output_structure(&self) -> OutputStructure {
        OutputStructure::new(".", ".")
    }

    fn render_additional(&self, file: &AdditionalFile) -> Result<String, minijinja::Error> {
        file.render_with(&self.templates)
    }
}

fn go_type(source: &str) -> String {
    map_type(source, LANGUAGE)
}

fn go_param_name(name: &str) -> String {
    let ident = to_lower_camel(name);
    if KEYWORDS.contains(&ident.as_str()) || BOUND.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}

fn go_field_type(source: &str, optional: bool, list: bool) -> String {
    let base = go_type(source);
    let ty = if list { format!("[]{base}") } else { base };
    if optional {
        format!("*{ty}")
    } else {
        ty
    }
}
