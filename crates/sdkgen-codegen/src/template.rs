//! Template environment shared by the backends.
//!
//! Every environment is strict about undefined values, so a template that
//! names a field missing from the model fails to render instead of silently
//! emitting an empty string.

use std::io::Write;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use serde::Serialize;
use tracing::debug;

use sdkgen_model::{ApiDescriptor, TypesDescriptor};

use crate::config::BackendConfig;
use crate::error::CodegenError;
use crate::mapper::{to_lower_camel, to_snake_case, to_upper_camel};
use crate::traits::FileRole;

/// Name of the client template inside a backend's set.
pub const CLIENT_TEMPLATE: &str = "client";
/// Name of the types template inside a backend's set.
pub const TYPES_TEMPLATE: &str = "types";

/// How the `literal` helper quotes string enum values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiteralSyntax {
    /// JSON escapes, read as-is by Python and Go
    #[default]
    Json,
    /// JSON escapes plus `\$`, which Dart would otherwise interpolate
    Dart,
    /// Rust escapes (`\u{7}`)
    Rust,
}

/// A minijinja environment with the naming helpers bound.
#[derive(Debug)]
pub struct TemplateSet {
    env: Environment<'static>,
}

impl TemplateSet {
    /// Environment with the shared helpers: `camelCase`, `snakeCase`,
    /// `upperCamel`, `docComment` and `literal` (JSON quoting).
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        env.add_function("camelCase", |s: String| to_lower_camel(&s));
        env.add_function("snakeCase", |s: String| to_snake_case(&s));
        env.add_function("upperCamel", |s: String| to_upper_camel(&s));
        env.add_function("docComment", |text: String, prefix: String| {
            doc_comment(&text, &prefix)
        });

        let mut set = Self { env };
        set.literal_syntax(LiteralSyntax::default());
        set
    }

    /// Rebind `literal` to quote strings for another target.
    pub fn literal_syntax(&mut self, syntax: LiteralSyntax) {
        self.env
            .add_function("literal", move |v: Value| scalar_literal(&v, syntax));
    }

    /// Bind a string → string helper under `name`.
    pub fn helper<F>(&mut self, name: &'static str, f: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.env.add_function(name, move |s: String| f(&s));
    }

    /// Bind a field-type helper: `(source type, optional, list) → target type`.
    pub fn field_type_helper<F>(&mut self, name: &'static str, f: F)
    where
        F: Fn(&str, bool, bool) -> String + Send + Sync + 'static,
    {
        self.env
            .add_function(name, move |s: String, optional: bool, list: bool| {
                f(&s, optional, list)
            });
    }

    /// Bind a constant visible to every template of the set.
    pub fn global<S: Serialize>(&mut self, name: &'static str, value: S) {
        self.env.add_global(name, Value::from_serialize(&value));
    }

    /// Parse and store a template body under `name`.
    pub fn add(
        &mut self,
        language: &str,
        name: &'static str,
        body: &'static str,
    ) -> Result<(), CodegenError> {
        self.env
            .add_template(name, body)
            .map_err(|source| CodegenError::Template {
                language: language.to_string(),
                name: name.to_string(),
                source,
            })
    }

    /// Render a stored template into `sink`.
    pub fn render_to<S: Serialize>(
        &self,
        name: &str,
        ctx: S,
        sink: &mut dyn Write,
    ) -> Result<(), minijinja::Error> {
        let tmpl = self.env.get_template(name)?;
        tmpl.render_captured_to(ctx, sink)?;
        Ok(())
    }

    /// Render an ad-hoc template body.
    pub fn render_str<S: Serialize>(&self, body: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.render_str(body, ctx)
    }

    /// Render a stored template into `sink`, attributing failures to the
    /// given language, file role and output path.
    pub fn render_file<S: Serialize>(
        &self,
        name: &str,
        ctx: S,
        sink: &mut dyn Write,
        language: &str,
        role: FileRole,
        path: String,
    ) -> Result<(), CodegenError> {
        debug!(language, %role, path = %path, "rendering template '{name}'");
        self.render_to(name, ctx, sink)
            .map_err(|source| CodegenError::Render {
                language: language.to_string(),
                role,
                path,
                source,
            })
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Root context of a client template.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientContext<'a> {
    pub api: &'a ApiDescriptor,
    pub package_name: String,
    pub module_name: String,
    pub sdk: &'a BackendConfig,
}

impl<'a> ClientContext<'a> {
    pub fn new(api: &'a ApiDescriptor, sdk: &'a BackendConfig) -> Self {
        Self {
            api,
            package_name: api.resolved_package_name(),
            module_name: api.resolved_module_name(),
            sdk,
        }
    }
}

/// Root context of a types template.
#[derive(Debug, Serialize)]
pub struct TypesContext<'a> {
    pub types: &'a TypesDescriptor,
    pub sdk: &'a BackendConfig,
}

/// Render an enum scalar as a source literal: strings are double-quoted
/// and escaped for `syntax`, numbers are printed as-is.
pub fn scalar_literal(value: &Value, syntax: LiteralSyntax) -> String {
    match value.as_str() {
        Some(s) => string_literal(s, syntax),
        None => value.to_string(),
    }
}

pub fn string_literal(s: &str, syntax: LiteralSyntax) -> String {
    match syntax {
        LiteralSyntax::Json => serde_json::Value::from(s).to_string(),
        LiteralSyntax::Dart => serde_json::Value::from(s).to_string().replace('$', "\\$"),
        LiteralSyntax::Rust => format!("{s:?}"),
    }
}

/// Prefix every line of `text` with a line-comment marker.
/// e.g., ("a\nb", "//") → "// a\n// b"
pub fn doc_comment(text: &str, prefix: &str) -> String {
    text.trim_end()
        .lines()
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                prefix.to_string()
            } else {
                format!("{prefix} {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
