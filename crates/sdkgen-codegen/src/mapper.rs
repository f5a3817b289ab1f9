//! Source-type and identifier mapping shared by every backend.
//!
//! All functions here are total: unknown languages and unmapped types pass
//! through unchanged, and every naming transform accepts the empty string.

/// Source primitive type name → target type string, for one language.
pub type TypeTable = &'static [(&'static str, &'static str)];

const DART_TYPES: TypeTable = &[
    ("string", "String"),
    ("int", "int"),
    ("uint", "int"),
    ("uint32", "int"),
    ("uint64", "int"),
    ("int32", "int"),
    ("int64", "int"),
    ("bool", "bool"),
    ("float64", "double"),
    ("float32", "double"),
    ("[]byte", "Uint8List"),
    ("time.Time", "DateTime"),
];

const PYTHON_TYPES: TypeTable = &[
    ("string", "str"),
    ("int", "int"),
    ("uint", "int"),
    ("uint32", "int"),
    ("uint64", "int"),
    ("int32", "int"),
    ("int64", "int"),
    ("bool", "bool"),
    ("float64", "float"),
    ("float32", "float"),
    ("[]byte", "bytes"),
    ("time.Time", "datetime.datetime"),
];

const RUST_TYPES: TypeTable = &[
    ("string", "String"),
    ("int", "i64"),
    ("uint", "u64"),
    ("uint32", "u32"),
    ("uint64", "u64"),
    ("int32", "i32"),
    ("int64", "i64"),
    ("bool", "bool"),
    ("float64", "f64"),
    ("float32", "f32"),
    ("[]byte", "Vec<u8>"),
    ("time.Time", "chrono::DateTime<chrono::Utc>"),
];

// Source primitives are Go names, so "go" has no table and maps by identity.
static TYPE_MAPPINGS: &[(&str, TypeTable)] = &[
    ("dart", DART_TYPES),
    ("python", PYTHON_TYPES),
    ("rust", RUST_TYPES),
];

/// The mapping table for a language, if it has one.
pub fn mapped_types(language: &str) -> Option<TypeTable> {
    TYPE_MAPPINGS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, table)| *table)
}

/// Map a source type name to the target language's type.
///
/// Lookup is exact and case-sensitive. Unknown languages and unmapped types
/// return `source_type` unchanged, so custom types survive into the output.
pub fn map_type(source_type: &str, target_language: &str) -> String {
    mapped_types(target_language)
        .and_then(|table| table.iter().find(|(src, _)| *src == source_type))
        .map(|(_, target)| (*target).to_string())
        .unwrap_or_else(|| source_type.to_string())
}

/// Lower-case the first character, leaving the rest untouched.
/// e.g., "GetBalance" → "getBalance", "FOO" → "fOO"
pub fn to_lower_camel(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-case the first character, leaving the rest untouched.
/// e.g., "account" → "Account"
pub fn to_upper_camel(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Insert `_` before every upper-case character after the first, then
/// lower-case everything. Runs are not collapsed: "ABC" → "a_b_c".
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, ch) in s.char_indices() {
        if i > 0 && ch.is_ascii_uppercase() {
            result.push('_');
        }
        result.push(ch);
    }
    result.to_lowercase()
}
