use std::fs::{read_to_string, write};
use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::tempdir;

const REPORT: &str = r#"[
  {"licenses": [
    {"package_name": "zlib", "license_kinds": [{"name": "Zlib"}], "package_version": "1.3.1"},
    {"package_name": "libfoo", "license_kinds": [{"name": "MIT"}], "package_url": "https://foo.example"}
  ]},
  {"licenses": [
    {"package_name": "libfoo", "license_kinds": [{"name": "Apache-2.0"}]}
  ]}
]"#;

fn sbom_generator() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sbom-generator"))
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&read_to_string(path).expect("read sbom")).expect("parse sbom")
}

fn check_report_sbom(doc: &Value) {
    assert_eq!(doc["spdxVersion"], "SPDX-2.3");
    let packages = doc["packages"].as_array().expect("packages");
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0]["SPDXID"], "SPDXRef-Package-libfoo");
    assert_eq!(packages[0]["licenseConcluded"], "MIT");
    assert_eq!(packages[0]["homepage"], "https://foo.example");
    assert_eq!(packages[1]["name"], "zlib");
    assert_eq!(packages[1]["versionInfo"], "1.3.1");
    let relationships = doc["relationships"].as_array().expect("relationships");
    assert_eq!(relationships.len(), 2);
    assert_eq!(relationships[0]["relatedSpdxElement"], "SPDXRef-Package-libfoo");
    assert_eq!(relationships[1]["relatedSpdxElement"], "SPDXRef-Package-zlib");
    assert!(doc["creationInfo"]["created"]
        .as_str()
        .expect("created")
        .ends_with('Z'));
}

#[test]
fn positional_arguments() {
    let td = tempdir().expect("tempdir");
    let input = td.path().join("licenses.json");
    let output = td.path().join("sbom.json");
    write(&input, REPORT).expect("write licenses.json");

    let status = sbom_generator()
        .args([&input, &output])
        .status()
        .expect("run sbom-generator");

    assert!(status.success());
    check_report_sbom(&read_json(&output));
}

#[test]
fn flag_arguments() {
    let td = tempdir().expect("tempdir");
    let input = td.path().join("licenses.json");
    let output = td.path().join("sbom.json");
    write(&input, REPORT).expect("write licenses.json");

    let status = sbom_generator()
        .arg("--licenses_info")
        .arg(&input)
        .arg("--out")
        .arg(&output)
        .status()
        .expect("run sbom-generator");

    assert!(status.success());
    check_report_sbom(&read_json(&output));
}

#[test]
fn malformed_report_writes_error_document() {
    let td = tempdir().expect("tempdir");
    let input = td.path().join("licenses.json");
    let output = td.path().join("sbom.json");
    write(&input, r#"[{"licenses": 5}]"#).expect("write licenses.json");

    let status = sbom_generator()
        .args([&input, &output])
        .status()
        .expect("run sbom-generator");

    assert!(status.success());
    let doc = read_json(&output);
    assert_eq!(doc["name"], "Error SBOM");
    assert_eq!(doc["packages"], Value::Array(vec![]));
    assert_eq!(doc["relationships"], Value::Array(vec![]));
    assert_eq!(doc["errors"].as_array().map(|x| x.len()), Some(1));
}

#[test]
fn incomplete_arguments_are_a_usage_error() {
    let td = tempdir().expect("tempdir");
    let output = sbom_generator()
        .arg("--licenses_info")
        .arg(td.path().join("licenses.json"))
        .output()
        .expect("run sbom-generator");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Must provide either --licenses_info and --out, or two positional arguments"));
}
