use std::path::PathBuf;

use pretty_assertions::assert_eq;
use sdkgen_model::{load_api, load_types, ApiVersion, EnumScalar, LoadError, Severity};
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("fixtures/ledger")
}

#[test]
fn test_ledger_api_fixture() {
    let (api, report) = load_api(&fixtures_dir().join("api.json")).unwrap();
    assert!(report.ok, "{:?}", report.errors);

    assert_eq!(api.package, "gitlab.com/acme/ledger");
    assert_eq!(api.api_version, ApiVersion::V3);
    assert_eq!(api.resolved_package_name(), "ledger");
    let names: Vec<&str> = api.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["GetBalance", "GetAccount", "Transfer", "Ping"]);

    let transfer = &api.methods[2];
    assert_eq!(transfer.params.len(), 4);
    assert_eq!(transfer.params[3].type_name, "[]byte");
    assert_eq!(transfer.returns.as_deref(), Some("Receipt"));
    assert_eq!(api.methods[3].returns, None);
}

#[test]
fn test_ledger_yaml_fixture_with_module_override() {
    let (api, report) = load_api(&fixtures_dir().join("api.yaml")).unwrap();
    assert!(report.ok);
    assert_eq!(api.resolved_module_name(), "ledger_v3");
    assert_eq!(api.methods.len(), 1);
}

#[test]
fn test_ledger_types_fixture() {
    let (types, report) = load_types(&fixtures_dir().join("types.json")).unwrap();
    assert!(report.ok, "{:?}", report.errors);

    let account = &types.types[0];
    assert_eq!(account.name, "Account");
    assert!(account.fields[2].optional);
    assert!(account.fields[3].list);

    let network = &types.enums[1];
    assert_eq!(network.values[0].value, EnumScalar::Text("mainnet".to_string()));
    assert_eq!(types.enums[0].values[1].value, EnumScalar::Integer(2));
}

#[test]
fn test_semantic_findings_do_not_block_loading() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("api.yaml");
    std::fs::write(
        &path,
        "package: ledger\nmethods:\n  - name: Get\n    version: v9\n  - name: Get\n",
    )
    .unwrap();

    let (api, report) = load_api(&path).unwrap();
    assert_eq!(api.methods.len(), 2);
    assert_eq!(report.count(Severity::Error), 1);
    assert_eq!(report.count(Severity::Warning), 1);
    assert!(!report.ok);
}

#[test]
fn test_schema_violation_is_a_load_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("types.json");
    std::fs::write(&path, r#"{ "package": "x", "types": [{ "fields": [] }] }"#).unwrap();

    match load_types(&path) {
        Err(LoadError::SchemaViolation { report, .. }) => assert!(report.has_errors()),
        other => panic!("Expected SchemaViolation, got: {other:?}"),
    }
}
