use std::io::Write;

use sdkgen_model::{ApiDescriptor, TypesDescriptor};

use crate::config::BackendConfig;
use crate::error::CodegenError;
use crate::mapper::{map_type, to_lower_camel, to_upper_camel};
use crate::template::{
    ClientContext, LiteralSyntax, TemplateSet, TypesContext, CLIENT_TEMPLATE, TYPES_TEMPLATE,
};
use crate::traits::{AdditionalFile, FileRole, LanguageBackend, OutputStructure};

const LANGUAGE: &str = "dart";

const CLIENT: &str = include_str!("../../templates/dart/client.dart.jinja");
const TYPES: &str = include_str!("../../templates/dart/types.dart.jinja");
const PUBSPEC: &str = include_str!("../../templates/dart/pubspec.yaml.jinja");
const JSON_RPC_CLIENT: &str = include_str!("../../templates/dart/json_rpc_client.dart.jinja");

// Reserved words; built-in identifiers like `dynamic` stay usable as names.
const KEYWORDS: &[&str] = &[
    "assert", "break", "case", "catch", "class", "const", "continue", "default", "do", "else",
    "enum", "extends", "false", "final", "finally", "for", "if", "in", "is", "new", "null",
    "rethrow", "return", "super", "switch", "this", "throw", "true", "try", "var", "void",
    "while", "with", "await", "yield",
];

/// Dart client backend (`package:http` JSON-RPC transport).
#[derive(Debug)]
pub struct DartBackend {
    templates: TemplateSet,
    config: BackendConfig,
}

impl DartBackend {
    pub fn new(config: BackendConfig) -> Result<Self, CodegenError> {
        config.validate()?;
        let mut templates = TemplateSet::new();
        templates.helper("dartType", dart_type);
        templates.helper("dartClassName", to_upper_camel);
        templates.helper("dartMethodName", dart_ident);
        templates.helper("dartIdent", dart_ident);
        templates.helper("dartParamName", dart_param_name);
        templates.field_type_helper("dartFieldType", dart_field_type);
        templates.literal_syntax(LiteralSyntax::Dart);
        templates.add(LANGUAGE, CLIENT_TEMPLATE, CLIENT)?;
        templates.add(LANGUAGE, TYPES_TEMPLATE, TYPES)?;
        Ok(Self { templates, config })
    }
}

impl LanguageBackend for DartBackend {
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
        ".dart"
    }

    fn client_file_name(&self) -> String {
        format!("lib/{}_client.dart", self.config.snake_name())
    }

    fn types_file_name(&self) -> String {
        "lib/types.dart".to_string()
    }

    fn additional_files(&self) -> Vec<AdditionalFile> {
        vec![
            AdditionalFile::new("pubspec.yaml", PUBSPEC).with_data(self.config.manifest_data()),
            AdditionalFile::new("lib/src/json_rpc_client.dart", JSON_RPC_CLIENT),
        ]
    }

    fn output_structure(&self) -> OutputStructure {
        OutputStructure::new("lib", "lib").with_extra_dir("lib/src")
    }

    fn render_additional(&self, file: &AdditionalFile) -> Result<String, minijinja::Error> {
        file.render_with(&self.templates)
    }
}

fn dart_type(source: &str) -> String {
    map_type(source, LANGUAGE)
}

/// Lower-camel identifier with a trailing underscore on reserved words.
fn dart_ident(name: &str) -> String {
    let ident = to_lower_camel(name);
    if KEYWORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}

// `params` is the local map every client method builds.
fn dart_param_name(name: &str) -> String {
    let ident = dart_ident(name);
    if ident == "params" {
        "params_".to_string()
    } else {
        ident
    }
}

fn dart_field_type(source: &str, optional: bool, list: bool) -> String {
    let base = dart_type(source);
    let ty = if list { format!("List<{base}>") } else { base };
    if optional {
        format!("{ty}?")
    } else {
        ty
    }
}
