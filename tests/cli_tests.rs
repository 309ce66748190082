//! CLI integration tests using the REAL workbelt binary

mod common;

use common::{TestWorkspace, workbelt_cmd};
use predicates::prelude::*;

#[test]
fn test_help_output() {
    workbelt_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workbelt reads workbelt.yaml"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_short_help_uses_about() {
    workbelt_cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bootstrap the dependencies"));
}

#[test]
fn test_install_help_lists_options() {
    workbelt_cmd()
        .args(["install", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--autoinstall"))
        .stdout(predicate::str::contains("--open"))
        .stdout(predicate::str::contains("--no-report"));
}

#[test]
fn test_version_output() {
    workbelt_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("workbelt"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_completions_bash() {
    workbelt_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("workbelt"));
}

#[test]
fn test_unknown_command_fails() {
    workbelt_cmd().arg("uninstall").assert().failure();
}

#[test]
fn test_missing_config_exits_with_error() {
    let workspace = TestWorkspace::new();
    workspace
        .cmd()
        .args(["install", "--no-report"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_invalid_yaml_exits_with_error() {
    let workspace = TestWorkspace::with_config("systems: [unclosed\n");
    workspace
        .cmd()
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse configuration file"));
}

#[test]
fn test_config_flag_points_elsewhere() {
    let workspace = TestWorkspace::new();
    workspace.write_file(
        "tools/bootstrap.yaml",
        "name: Elsewhere\nsystems:\n  all:\n    wb-cli-elsewhere: echo hi\n",
    );
    workspace
        .cmd()
        .args(["--config", "tools/bootstrap.yaml", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Elsewhere"))
        .stdout(predicate::str::contains("wb-cli-elsewhere"));
}

#[test]
fn test_config_from_env() {
    let workspace = TestWorkspace::new();
    workspace.write_file(
        "alt.yaml",
        "name: FromEnv\nsystems:\n  all:\n    wb-cli-env: echo hi\n",
    );
    workspace
        .cmd()
        .env("WORKBELT_CONFIG", workspace.path.join("alt.yaml"))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("FromEnv"));
}
