//! CLI smoke tests for kcforge.
//!
//! These tests verify that the CLI commands run without panicking and leave
//! the expected files behind. Packaging itself is skipped (`--no-jar`) so the
//! suite does not depend on a Maven installation.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the kcforge binary.
fn kcforge_cmd() -> Command {
  cargo_bin_cmd!("kcforge")
}

/// Create a temp project with a config file.
fn temp_project(config: &str) -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("kcforge.toml"), config).unwrap();
  temp
}

const MINIMAL_CONFIG: &str = r#"
[theme]
names = ["vault"]
version = "1.0.0"
"#;

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  kcforge_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  kcforge_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("kcforge"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["build", "init"] {
    kcforge_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// init
// =============================================================================

#[test]
fn init_creates_config_and_theme_dir() {
  let temp = TempDir::new().unwrap();
  let project = temp.path().join("myproject");

  kcforge_cmd().arg("init").arg(&project).assert().success();

  assert!(project.join("kcforge.toml").exists());
  assert!(project.join("theme").join("css").join("login.css").exists());
}

#[test]
fn init_fails_if_config_exists() {
  let temp = temp_project(MINIMAL_CONFIG);

  kcforge_cmd()
    .arg("init")
    .arg(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("already exists"));
}

#[test]
fn initialized_project_builds() {
  let temp = TempDir::new().unwrap();
  let project = temp.path().join("myproject");

  kcforge_cmd().arg("init").arg(&project).assert().success();

  kcforge_cmd()
    .arg("build")
    .arg(&project)
    .arg("--no-jar")
    .assert()
    .success();

  assert!(project.join("build_keycloak").join("pom.xml").exists());
}

// =============================================================================
// build
// =============================================================================

#[test]
fn build_without_jar_emits_themes_manifest_and_launcher() {
  let temp = temp_project(MINIMAL_CONFIG);

  kcforge_cmd()
    .arg("build")
    .arg(temp.path())
    .arg("--no-jar")
    .assert()
    .success()
    .stdout(predicate::str::contains("start_keycloak_testing_container.sh"));

  let build_dir = temp.path().join("build_keycloak");
  assert!(build_dir.join("pom.xml").exists());
  assert!(build_dir.join("start_keycloak_testing_container.sh").exists());
  assert!(
    build_dir
      .join("src/main/resources/theme/vault/login/theme.properties")
      .exists()
  );
  // Packaging was skipped, so no artifacts and no usage note.
  assert!(!build_dir.join("target").exists());
}

#[test]
fn build_summary_references_the_first_theme() {
  let temp = temp_project(MINIMAL_CONFIG);

  kcforge_cmd()
    .arg("build")
    .arg(temp.path())
    .arg("--no-jar")
    .assert()
    .success()
    .stdout(predicate::str::contains("Login theme: vault"));
}

#[test]
fn build_silent_suppresses_the_report() {
  let temp = temp_project(MINIMAL_CONFIG);

  kcforge_cmd()
    .arg("build")
    .arg(temp.path())
    .arg("--no-jar")
    .arg("--silent")
    .assert()
    .success()
    .stdout(predicate::str::is_empty());
}

#[test]
fn build_json_format_emits_the_summary() {
  let temp = temp_project(MINIMAL_CONFIG);

  kcforge_cmd()
    .arg("build")
    .arg(temp.path())
    .arg("--no-jar")
    .arg("--format")
    .arg("json")
    .assert()
    .success()
    .stdout(predicate::str::contains("\"bundled\": false"));
}

#[test]
fn build_honors_build_dir_override() {
  let temp = temp_project(MINIMAL_CONFIG);

  kcforge_cmd()
    .arg("build")
    .arg(temp.path())
    .arg("--no-jar")
    .arg("--build-dir")
    .arg(temp.path().join("out"))
    .assert()
    .success();

  assert!(temp.path().join("out").join("pom.xml").exists());
  assert!(!temp.path().join("build_keycloak").exists());
}

// =============================================================================
// Error Handling
// =============================================================================

#[test]
fn build_without_config_fails() {
  let temp = TempDir::new().unwrap();

  kcforge_cmd()
    .arg("build")
    .arg(temp.path())
    .arg("--no-jar")
    .assert()
    .failure()
    .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn build_with_no_themes_fails() {
  let temp = temp_project("[theme]\nnames = []\n");

  kcforge_cmd()
    .arg("build")
    .arg(temp.path())
    .arg("--no-jar")
    .assert()
    .failure()
    .stderr(predicate::str::contains("at least one theme name"));
}

#[test]
fn build_with_duplicate_themes_fails() {
  let temp = temp_project("[theme]\nnames = [\"vault\", \"vault\"]\n");

  kcforge_cmd()
    .arg("build")
    .arg(temp.path())
    .arg("--no-jar")
    .assert()
    .failure()
    .stderr(predicate::str::contains("duplicate theme name"));
}

#[test]
fn build_with_invalid_toml_fails() {
  let temp = temp_project("this is not toml {{{");

  kcforge_cmd()
    .arg("build")
    .arg(temp.path())
    .arg("--no-jar")
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to parse"));
}
