use indexmap::IndexMap;

use crate::report::{
    ErrorEntry, ValidationReport, E_DUPLICATE_SYMBOL, E_MISSING_FIELD, W_UNKNOWN_VERSION,
};
use crate::types::{ApiDescriptor, TypesDescriptor};

const KNOWN_METHOD_VERSIONS: &[&str] = &["", "v2", "v3"];

/// Check an API model: required names, unique method names, known version tags.
pub fn validate_api(api: &ApiDescriptor, file: &str) -> ValidationReport {
    let mut report = ValidationReport::success();

    if api.package.is_empty() {
        report.push(
            ErrorEntry::error(E_MISSING_FIELD, "API package is required", file, "$.package")
                .with_suggestion("Add a 'package' identifier (e.g., \"ledger\")"),
        );
    }

    let mut seen: IndexMap<&str, usize> = IndexMap::new();
    for (i, method) in api.methods.iter().enumerate() {
        let path = format!("$.methods[{i}]");

        if method.name.is_empty() {
            report.push(ErrorEntry::error(
                E_MISSING_FIELD,
                "Method name is required",
                file,
                &format!("{path}.name"),
            ));
        } else if let Some(first) = seen.get(method.name.as_str()) {
            report.push(
                ErrorEntry::error(
                    E_DUPLICATE_SYMBOL,
                    format!(
                        "Method '{}' is declared more than once (first at $.methods[{first}])",
                        method.name
                    ),
                    file,
                    &format!("{path}.name"),
                )
                .with_suggestion("Rename or remove the duplicate method"),
            );
        } else {
            seen.insert(&method.name, i);
        }

        if !KNOWN_METHOD_VERSIONS.contains(&method.version.as_str()) {
            report.push(
                ErrorEntry::warning(
                    W_UNKNOWN_VERSION,
                    format!(
                        "Method '{}' has unknown version tag '{}'",
                        method.name, method.version
                    ),
                    file,
                    &format!("{path}.version"),
                )
                .with_suggestion("Use \"v2\", \"v3\", or leave empty"),
            );
        }

        for (j, param) in method.params.iter().enumerate() {
            if param.name.is_empty() || param.type_name.is_empty() {
                report.push(ErrorEntry::error(
                    E_MISSING_FIELD,
                    format!("Parameter {j} of method '{}' needs a name and a type", method.name),
                    file,
                    &format!("{path}.params[{j}]"),
                ));
            }
        }
    }

    report
}

/// Check a types model: required names and uniqueness of types, enums,
/// fields within a type and members within an enum.
pub fn validate_types(types: &TypesDescriptor, file: &str) -> ValidationReport {
    let mut report = ValidationReport::success();

    let mut seen_types: IndexMap<&str, usize> = IndexMap::new();
    for (i, ty) in types.types.iter().enumerate() {
        let path = format!("$.types[{i}]");
        check_name(&mut report, &mut seen_types, &ty.name, "Type", file, "$.types", i);

        let mut seen_fields: IndexMap<&str, usize> = IndexMap::new();
        for (j, field) in ty.fields.iter().enumerate() {
            let field_path = format!("{path}.fields[{j}]");
            check_name(
                &mut report,
                &mut seen_fields,
                &field.name,
                "Field",
                file,
                &format!("{path}.fields"),
                j,
            );
            if field.type_name.is_empty() {
                report.push(ErrorEntry::error(
                    E_MISSING_FIELD,
                    format!("Field '{}' of type '{}' has no type", field.name, ty.name),
                    file,
                    &format!("{field_path}.type"),
                ));
            }
        }
    }

    let mut seen_enums: IndexMap<&str, usize> = IndexMap::new();
    for (i, en) in types.enums.iter().enumerate() {
        let path = format!("$.enums[{i}]");
        check_name(&mut report, &mut seen_enums, &en.name, "Enum", file, "$.enums", i);

        let mut seen_values: IndexMap<&str, usize> = IndexMap::new();
        for (j, value) in en.values.iter().enumerate() {
            check_name(
                &mut report,
                &mut seen_values,
                &value.name,
                "Enum member",
                file,
                &format!("{path}.values"),
                j,
            );
        }
    }

    report
}

fn check_name<'a>(
    report: &mut ValidationReport,
    seen: &mut IndexMap<&'a str, usize>,
    name: &'a str,
    kind: &str,
    file: &str,
    list_path: &str,
    index: usize,
) {
    let path = format!("{list_path}[{index}]");
    if name.is_empty() {
        report.push(ErrorEntry::error(
            E_MISSING_FIELD,
            format!("{kind} name is required"),
            file,
            &format!("{path}.name"),
        ));
        return;
    }
    if let Some(first) = seen.get(name) {
        report.push(
            ErrorEntry::error(
                E_DUPLICATE_SYMBOL,
                format!("{kind} '{name}' is declared more than once (first at {list_path}[{first}])"),
                file,
                &format!("{path}.name"),
            )
            .with_suggestion(format!("Rename or remove the duplicate {}", kind.to_lowercase())),
        );
    } else {
        seen.insert(name, index);
    }
}
