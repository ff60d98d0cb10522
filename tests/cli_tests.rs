//! CLI surface tests: flags, exit codes, error output

mod common;

use common::TestProject;
use predicates::prelude::*;

#[test]
fn test_up_without_appfile_fails() {
    let project = TestProject::new();

    project
        .vela()
        .arg("up")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Appfile not found"));
}

#[test]
fn test_up_with_malformed_appfile_fails() {
    let project = TestProject::new();
    project.write_appfile("name: [unclosed");

    project
        .vela()
        .arg("up")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse appfile"));
}

#[test]
fn test_up_with_unknown_service_type_names_the_service() {
    let project = TestProject::new();
    project.write_appfile("name: app\nservices:\n  web:\n    type: mystery\n    image: x\n");

    project
        .vela()
        .arg("up")
        .assert()
        .failure()
        .stderr(predicate::str::contains("web"))
        .stderr(predicate::str::contains("mystery"));
}

#[test]
fn test_up_with_missing_required_parameter_fails() {
    let project = TestProject::new();
    project.write_appfile("name: app\nservices:\n  web:\n    port: 8080\n");

    project
        .vela()
        .arg("up")
        .assert()
        .failure()
        .stderr(predicate::str::contains("image"));
}

#[test]
fn test_failed_up_produces_no_audit_artifact() {
    let project = TestProject::new();
    project.write_appfile("name: app\nservices:\n  web:\n    type: mystery\n");

    project.vela().arg("up").assert().failure();
    assert!(!project.file_exists(".vela/deploy.yaml"));
}

#[test]
fn test_broken_env_file_fails_the_run() {
    let project = TestProject::new();
    project.write_appfile("name: app\nservices:\n  web:\n    image: nginx\n");
    std::fs::write(project.home.path().join("curenv"), "demo").expect("write curenv");
    std::fs::create_dir_all(project.home.path().join("envs")).expect("create envs");
    std::fs::write(project.home.path().join("envs/demo.json"), "{broken").expect("write env");

    project
        .vela()
        .arg("up")
        .assert()
        .failure()
        .stderr(predicate::str::contains("environment 'demo'"));
}

#[test]
fn test_help_shows_up_subcommand() {
    let project = TestProject::new();
    project
        .vela()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("up"));
}

#[test]
fn test_up_help_shows_file_flag() {
    let project = TestProject::new();
    project
        .vela()
        .args(["up", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--file"));
}

#[test]
fn test_up_rejects_unknown_flags() {
    let project = TestProject::new();
    project.vela().args(["up", "--force"]).assert().failure();
}

#[test]
fn test_version_command() {
    let project = TestProject::new();
    project
        .vela()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vela"));
}

#[test]
fn test_completions_bash() {
    let project = TestProject::new();
    project
        .vela()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vela"));
}

#[test]
fn test_completions_unknown_shell_fails() {
    let project = TestProject::new();
    project
        .vela()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell"));
}
