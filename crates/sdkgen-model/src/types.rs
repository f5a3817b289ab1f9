use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// API surface rendered into a client; the root of the client model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiDescriptor {
    /// Package identifier of the service definition (e.g., "gitlab.com/acme/ledger")
    pub package: String,
    /// Path the API is served under (e.g., "/v3")
    #[serde(default)]
    pub api_path: String,
    /// Methods in declaration order; order is preserved in the emitted client
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    /// Which API generation the client targets
    #[serde(default)]
    pub api_version: ApiVersion,
    /// Language-specific package name override
    #[serde(default)]
    pub package_name: Option<String>,
    /// Language-specific module name override
    #[serde(default)]
    pub module_name: Option<String>,
}

/// A single remote method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    /// Method name as exposed on the wire (e.g., "GetBalance")
    pub name: String,
    /// Owning sub-package / namespace
    #[serde(default)]
    pub sub_package: String,
    /// Version tag ("v2", "v3", or empty for legacy)
    #[serde(default)]
    pub version: String,
    /// Ordered parameter list
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
    /// Source type name of the result, if the method returns one
    #[serde(default)]
    pub returns: Option<String>,
    /// Human-readable description carried into doc comments
    #[serde(default)]
    pub description: Option<String>,
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParamDescriptor {
    pub name: String,
    /// Source type name, resolved per target language at emission time
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Type definitions rendered into a types file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TypesDescriptor {
    pub package: String,
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
    #[serde(default)]
    pub enums: Vec<EnumDescriptor>,
}

/// A record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

/// A field of a record type.
///
/// The type is kept as the source type name; backends map it when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub list: bool,
}

/// An enumeration and its members, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnumDescriptor {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnumValue {
    pub name: String,
    pub value: EnumScalar,
}

/// Opaque enum member value, carried through to the output unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum EnumScalar {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

/// API generation targeted by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V2,
    #[default]
    V3,
    Both,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V2 => "v2",
            ApiVersion::V3 => "v3",
            ApiVersion::Both => "both",
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ApiDescriptor {
    /// Create a descriptor with no methods for the given package.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            api_path: String::new(),
            methods: Vec::new(),
            api_version: ApiVersion::default(),
            package_name: None,
            module_name: None,
        }
    }

    /// Package name used by the generated project: the override if set,
    /// otherwise derived from the package identifier.
    pub fn resolved_package_name(&self) -> String {
        self.package_name
            .clone()
            .unwrap_or_else(|| derive_package_name(&self.package))
    }

    /// Module name used by the generated project: the override if set,
    /// otherwise derived from the package identifier.
    pub fn resolved_module_name(&self) -> String {
        self.module_name
            .clone()
            .unwrap_or_else(|| derive_package_name(&self.package))
    }
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub_package: String::new(),
            version: String::new(),
            params: Vec::new(),
            returns: None,
            description: None,
        }
    }

    /// Append a parameter (builder style).
    pub fn with_param(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.params.push(ParamDescriptor {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    /// Set the return type (builder style).
    pub fn returning(mut self, type_name: impl Into<String>) -> Self {
        self.returns = Some(type_name.into());
        self
    }
}

impl TypesDescriptor {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            types: Vec::new(),
            enums: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.enums.is_empty()
    }
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            optional: false,
            list: false,
        }
    }
}

/// Derive a package name from a package identifier.
/// e.g., "gitlab.com/acme/ledger-api" → "ledger_api"
pub fn derive_package_name(package: &str) -> String {
    let last = package
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    last.replace(['.', '-'], "_").to_lowercase()
}
