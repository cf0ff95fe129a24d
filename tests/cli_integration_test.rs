//! Runs the middleware-gen binary against a fixture module.

mod common;

use assert_cmd::Command;
use common::{interfaces_fixture, PACKAGE};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn command(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("middleware-gen").unwrap();
    cmd.arg("-C").arg(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_generates_go_middleware_to_stdout() {
    let temp = TempDir::new().unwrap();
    let fixture = interfaces_fixture(temp.path());

    let output = command(fixture.root())
        .args(["-i", &format!("{PACKAGE}.ImportedParamTypeInterface")])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("// Code generated by middleware-gen; DO NOT EDIT."));
    assert!(stdout.contains("package interfaces\n"));
    assert!(stdout.contains("\t\"github.com/google/uuid\"\n\t\"github.com/rs/zerolog/log\"\n\t\"go/ast\"\n"));
    assert!(stdout.contains("type importedParamTypeInterface struct {"));
    assert!(stdout.contains(
        "func (l *importedParamTypeInterface) PointerTypeParam(typ1 *ast.TypeSpec) (ret1 *ast.InterfaceType) {"
    ));
    assert!(stdout.contains("\tl.wrapper.WithoutReturnParameter(param1)\n"));
}

#[test]
fn test_json_output_to_file_with_flags() {
    let temp = TempDir::new().unwrap();
    let fixture = interfaces_fixture(temp.path());
    let out = temp.path().join("model.json");

    command(fixture.root())
        .args([
            "-i",
            &format!("{PACKAGE}.UnnammedParametersInterface"),
            "-w",
            "mw.Logged",
            "-f",
            "NewLogged",
            "-p",
            "arg",
            "-r",
            "res",
            "--format",
            "json",
            "-o",
        ])
        .arg(&out)
        .assert()
        .success();

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["wrapperPackageName"], "mw");
    assert_eq!(json["wrapperTypeName"], "Logged");
    assert_eq!(json["factoryFunctionName"], "NewLogged");
    assert_eq!(json["methods"][0]["params"][0]["name"], "arg1");
    assert_eq!(json["methods"][0]["results"][0]["name"], "res1");
}

#[test]
fn test_config_file_supplies_defaults() {
    let temp = TempDir::new().unwrap();
    let fixture = interfaces_fixture(temp.path());
    fs::write(
        fixture.root().join(".middleware-gen.toml"),
        "format = \"json\"\nfactory_function_name = \"FromConfig\"\n",
    )
    .unwrap();

    let output = command(fixture.root())
        .args(["-i", &format!("{PACKAGE}.EmptyInterface")])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["factoryFunctionName"], "FromConfig");
}

#[test]
fn test_malformed_query_fails() {
    let temp = TempDir::new().unwrap();
    let output = command(temp.path()).args(["-i", "Reader"]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--interface (-i) flag should be like path/to/package.type"));
}

#[test]
fn test_non_interface_fails() {
    let temp = TempDir::new().unwrap();
    let fixture = interfaces_fixture(temp.path());

    let output = command(fixture.root())
        .args(["-i", &format!("{PACKAGE}.Config")])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("is not an interface"));
}
