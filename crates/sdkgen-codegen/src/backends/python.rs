use std::io::Write;

use sdkgen_model::{ApiDescriptor, TypesDescriptor};

use crate::config::BackendConfig;
use crate::error::CodegenError;
use crate::mapper::{map_type, to_snake_case, to_upper_camel};
use crate::template::{ClientContext, TemplateSet, TypesContext, CLIENT_TEMPLATE, TYPES_TEMPLATE};
use crate::traits::{AdditionalFile, FileRole, LanguageBackend, OutputStructure};

const LANGUAGE: &str = "python";

const CLIENT: &str = include_str!("../../templates/python/client.py.jinja");
const TYPES: &str = include_str!("../../templates/python/types.py.jinja");
const PYPROJECT: &str = include_str!("../../templates/python/pyproject.toml.jinja");
const INIT: &str = include_str!("../../templates/python/__init__.py.jinja");
const JSONRPC: &str = include_str!("../../templates/python/_jsonrpc.py.jinja");

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield", "self",
];

/// Python client backend (stdlib `urllib` transport, dataclass types).
#[derive(Debug)]
pub struct PythonBackend {
    templates: TemplateSet,
    config: BackendConfig,
}

impl PythonBackend {
    pub fn new(config: BackendConfig) -> Result<Self, CodegenError> {
        config.validate()?;
        let mut templates = TemplateSet::new();
        templates.helper("pyType", py_type);
        templates.helper("pyClassName", to_upper_camel);
        templates.helper("pyMethodName", py_ident);
        templates.helper("pyIdent", py_ident);
        templates.helper("pyDocstring", py_docstring);
        templates.field_type_helper("pyFieldType", py_field_type);
        templates.add(LANGUAGE, CLIENT_TEMPLATE, CLIENT)?;
        templates.add(LANGUAGE, TYPES_TEMPLATE, TYPES)?;
        Ok(Self { templates, config })
    }

    fn package_dir(&self) -> String {
        self.config.snake_name()
    }
}

impl LanguageBackend for PythonBackend {
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
        ".py"
    }

    fn client_file_name(&self) -> String {
        format!("{}/client.py", self.package_dir())
    }

    fn types_file_name(&self) -> String {
        format!("{}/types.py", self.package_dir())
    }

    fn additional_files(&self) -> Vec<AdditionalFile> {
        let pkg = self.package_dir();
        vec![
            AdditionalFile::new("pyproject.toml", PYPROJECT).with_data(self.config.manifest_data()),
            AdditionalFile::new(format!("{pkg}/__init__.py"), INIT),
            AdditionalFile::new(format!("{pkg}/_jsonrpc.py"), JSONRPC),
        ]
    }

    fn output_structure(&self) -> OutputStructure {
        let pkg = self.package_dir();
        OutputStructure::new(pkg.clone(), pkg)
    }

    fn render_additional(&self, file: &AdditionalFile) -> Result<String, minijinja::Error> {
        file.render_with(&self.templates)
    }
}

fn py_type(source: &str) -> String {
    map_type(source, LANGUAGE)
}

/// Snake-case identifier with a trailing underscore on keywords (PEP 8).
fn py_ident(name: &str) -> String {
    let ident = to_snake_case(name);
    if KEYWORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}

/// Docstring body that cannot close its `"""` delimiters early.
fn py_docstring(text: &str) -> String {
    let mut body = text
        .trim_end()
        .replace('\\', "\\\\")
        .replace("\"\"\"", "\\\"\\\"\\\"");
    if body.ends_with('"') {
        body.pop();
        body.push_str("\\\"");
    }
    body
}

fn py_field_type(source: &str, optional: bool, list: bool) -> String {
    let base = py_type(source);
    let ty = if list { format!("List[{base}]") } else { base };
    if optional {
        format!("Optional[{ty}]")
    } else {
        ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sdkgen_model::{
        EnumDescriptor, EnumScalar, EnumValue, FieldDescriptor, MethodDescriptor, TypeDescriptor,
    };

    fn backend() -> PythonBackend {
        PythonBackend::new(BackendConfig::new("LedgerSdk")).unwrap()
    }

    #[test]
    fn test_field_type() {
        assert_eq!(py_field_type("string", false, false), "str");
        assert_eq!(py_field_type("time.Time", true, false), "Optional[datetime.datetime]");
        assert_eq!(py_field_type("uint32", true, true), "Optional[List[int]]");
    }

    #[test]
    fn test_ident_escapes_keywords() {
        assert_eq!(py_ident("from"), "from_");
        assert_eq!(py_ident("Lambda"), "lambda_");
        assert_eq!(py_ident("fromAccount"), "from_account");
    }

    #[test]
    fn test_docstring_escaping() {
        assert_eq!(py_docstring("plain"), "plain");
        assert_eq!(py_docstring(r#"a """ b"#), r#"a \"\"\" b"#);
        assert_eq!(py_docstring(r#"say "hi""#), r#"say "hi\""#);
        assert_eq!(py_docstring(r"C:\path"), r"C:\\path");
    }

    #[test]
    fn test_rejects_unsafe_sdk_name() {
        for name in ["/", "..", "My SDK"] {
            assert!(PythonBackend::new(BackendConfig::new(name)).is_err(), "{name}");
        }
    }

    #[test]
    fn test_layout() {
        let b = backend();
        assert_eq!(b.file_extension(), ".py");
        assert_eq!(b.client_file_name(), "ledger_sdk/client.py");
        assert_eq!(b.types_file_name(), "ledger_sdk/types.py");
        let paths: Vec<String> = b.additional_files().into_iter().map(|f| f.path).collect();
        assert_eq!(
            paths,
            vec!["pyproject.toml", "ledger_sdk/__init__.py", "ledger_sdk/_jsonrpc.py"]
        );
        let structure = b.output_structure();
        let dirs: Vec<&str> = structure.directories().into_iter().collect();
        assert_eq!(dirs, vec!["ledger_sdk"]);
    }

    #[test]
    fn test_emit_client_uses_snake_case_methods() {
        let mut api = ApiDescriptor::new("ledger");
        let mut method = MethodDescriptor::new("GetBalance")
            .with_param("accountID", "string")
            .returning("uint64");
        method.description = Some("Returns the balance of an account.".to_string());
        api.methods.push(method);

        let mut out = Vec::new();
        backend().emit_client(&api, &mut out).unwrap();
        let code = String::from_utf8(out).unwrap();

        assert!(code.contains("class LedgerClient:"), "{code}");
        assert!(code.contains("def get_balance(self, account_i_d: str) -> int:"), "{code}");
        assert!(code.contains("\"\"\"Returns the balance of an account.\"\"\""), "{code}");
        assert!(code.contains("return self._rpc.call(\"GetBalance\", params)"), "{code}");
    }

    #[test]
    fn test_emit_types() {
        let mut types = TypesDescriptor::new("ledger");
        types.types.push(TypeDescriptor {
            name: "Account".to_string(),
            fields: vec![
                FieldDescriptor::new("url", "string"),
                FieldDescriptor {
                    optional: true,
                    ..FieldDescriptor::new("balance", "uint64")
                },
            ],
        });
        types.enums.push(EnumDescriptor {
            name: "Status".to_string(),
            values: vec![
                EnumValue {
                    name: "Active".to_string(),
                    value: EnumScalar::Integer(1),
                },
                EnumValue {
                    name: "Closed".to_string(),
                    value: EnumScalar::Text("closed".to_string()),
                },
            ],
        });

        let mut out = Vec::new();
        backend().emit_types(&types, &mut out).unwrap();
        let code = String::from_utf8(out).unwrap();

        assert!(code.contains("@dataclass(kw_only=True)\nclass Account:"), "{code}");
        assert!(code.contains("    url: str\n"), "{code}");
        assert!(code.contains("    balance: Optional[int] = None\n"), "{code}");
        assert!(code.contains("class Status(Enum):"), "{code}");
        assert!(code.contains("    ACTIVE = 1\n"), "{code}");
        assert!(code.contains("    CLOSED = \"closed\"\n"), "{code}");
    }

    #[test]
    fn test_multiline_description_docstring() {
        let mut api = ApiDescriptor::new("ledger");
        let mut method = MethodDescriptor::new("GetBalance");
        method.description = Some(r#"Returns the """balance""".
Fails if unknown."#
            .into());
        api.methods.push(method);

        let mut out = Vec::new();
        backend().emit_client(&api, &mut out).unwrap();
        let code = String::from_utf8(out).unwrap();

        let expected = r#"        """Returns the \"\"\"balance\"\"\".
        Fails if unknown."""
"#;
        assert!(code.contains(expected), "{code}");
    }

    #[test]
    fn test_enum_strings_use_python_escapes() {
        let mut types = TypesDescriptor::new("ledger");
        types.enums.push(EnumDescriptor {
            name: "Signal".to_string(),
            values: vec![
                EnumValue { name: "Bell".to_string(), value: EnumScalar::Text("a\u{7}b".into()) },
                EnumValue { name: "Max".to_string(), value: EnumScalar::Unsigned(u64::MAX) },
            ],
        });

        let mut out = Vec::new();
        backend().emit_types(&types, &mut out).unwrap();
        let code = String::from_utf8(out).unwrap();

        assert!(code.contains("    BELL = \"a\\u0007b\"\n"), "{code}");
        assert!(code.contains("    MAX = 18446744073709551615\n"), "{code}");
    }

    #[test]
    fn test_additional_files_render_with_python_helpers() {
        let file = AdditionalFile::new("x.py", "{{ pyIdent('from') }}: {{ pyType('[]byte') }}");
        assert_eq!(backend().render_additional(&file).unwrap(), "from_: bytes");
    }
}
