use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures/ledger")
}

fn sdkgen(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sdkgen"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run sdkgen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_list_prints_sorted_languages() {
    let tmp = TempDir::new().unwrap();
    let output = sdkgen(tmp.path(), &["list"]);
    assert!(output.status.success());
    let names: Vec<String> = stdout(&output)
        .lines()
        .skip(1)
        .map(|l| l.trim().to_string())
        .collect();
    assert_eq!(names, vec!["dart", "go", "python", "rust"]);
}

#[test]
fn test_generate_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let fixtures = fixtures_dir();
    let config = serde_json::json!({
        "api": fixtures.join("api.json"),
        "types": fixtures.join("types.json"),
        "output": "sdk",
        "languages": ["dart", "rust"],
        "sdkName": "ledger",
        "version": "1.4.0",
    });
    std::fs::write(
        tmp.path().join("sdkgen.config.json"),
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();

    let output = sdkgen(tmp.path(), &["generate"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let pubspec = std::fs::read_to_string(tmp.path().join("sdk/dart/pubspec.yaml")).unwrap();
    assert!(pubspec.contains("version: 1.4.0"));
    let cargo = std::fs::read_to_string(tmp.path().join("sdk/rust/Cargo.toml")).unwrap();
    assert!(cargo.contains("name = \"ledger\""));
    assert!(!tmp.path().join("sdk/go").exists());
}

#[test]
fn test_flags_override_config_languages() {
    let tmp = TempDir::new().unwrap();
    let fixtures = fixtures_dir();
    let config = serde_json::json!({
        "api": fixtures.join("api.json"),
        "languages": ["dart"],
    });
    std::fs::write(tmp.path().join("sdkgen.config.json"), config.to_string()).unwrap();

    let output = sdkgen(tmp.path(), &["generate", "-l", "python", "-o", "out"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(tmp.path().join("out/python/api/client.py").exists());
    assert!(!tmp.path().join("out/dart").exists());
}

#[test]
fn test_generate_unknown_language_exits_nonzero() {
    let tmp = TempDir::new().unwrap();
    let api = fixtures_dir().join("api.json");
    let output = sdkgen(
        tmp.path(),
        &["generate", "--api", api.to_str().unwrap(), "-l", "cobol", "-l", "go"],
    );
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("unsupported target language: cobol"), "{err}");
    assert!(err.contains("dart, go, python, rust"), "{err}");
    assert!(tmp.path().join("generated/go/client.go").exists());
}

#[test]
fn test_generate_rejects_sdk_name_outside_output() {
    let tmp = TempDir::new().unwrap();
    let api = fixtures_dir().join("api.json");
    for name in ["..", "/", "My SDK"] {
        let output = sdkgen(
            tmp.path(),
            &["generate", "--api", api.to_str().unwrap(), "-l", "python", "--sdk-name", name],
        );
        assert_eq!(output.status.code(), Some(1), "{name}");
        assert!(stderr(&output).contains("does not yield a package name"), "{name}");
    }
    assert!(!tmp.path().join("generated").exists());
    assert!(!tmp.path().join("client.py").exists());
}

#[test]
fn test_generate_without_api_fails() {
    let tmp = TempDir::new().unwrap();
    let output = sdkgen(tmp.path(), &["generate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error:"));
}

#[test]
fn test_validate_yaml_fixture() {
    let tmp = TempDir::new().unwrap();
    let api = fixtures_dir().join("api.yaml");
    let output = sdkgen(tmp.path(), &["validate", "--api", api.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("1 methods"));
}

#[test]
fn test_schema_command_prints_json() {
    let tmp = TempDir::new().unwrap();
    let output = sdkgen(tmp.path(), &["schema", "types"]);
    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["title"], "TypesDescriptor");
}
