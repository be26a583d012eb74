//! End-to-end runs of the `forkline` binary.
//!
//! Each run gets an isolated config directory and working directory, so
//! only the files written here contribute config layers.
//!
//! `cargo test -p forkline-cli --test cli_tests`

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn forkline(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("forkline");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_run_resolves_and_prints_value() {
    let home = TempDir::new().unwrap();
    forkline(&home)
        .args(["run", "--value", "2"])
        .assert()
        .success()
        .stdout("4\n");
}

#[test]
fn test_run_reject_exits_with_configured_code() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("runner.toml");
    write(&config, "[runner]\nreject_exit_code = 3\n");

    forkline(&home)
        .arg("--config")
        .arg(&config)
        .args(["run", "--reject", "disk full"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "pipeline failed: Rejected: double - disk full",
        ));
}

#[test]
fn test_explicit_config_overrides_project_layer() {
    let home = TempDir::new().unwrap();
    write(
        &home.path().join(".forkline").join("config.toml"),
        "[runner]\nreject_exit_code = 3\n",
    );
    let config = home.path().join("explicit.toml");
    write(&config, "[runner]\nreject_exit_code = 1\n");

    forkline(&home)
        .args(["run", "--reject", "nope"])
        .assert()
        .code(3);

    forkline(&home)
        .arg("--config")
        .arg(&config)
        .args(["run", "--reject", "nope"])
        .assert()
        .code(1);
}

#[test]
fn test_config_prints_effective_settings() {
    let home = TempDir::new().unwrap();
    write(
        &home.path().join(".forkline").join("config.toml"),
        "[log]\nlevel = \"warn\"\n",
    );

    forkline(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("level = \"warn\""))
        .stdout(predicate::str::contains("reject_exit_code = 1"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let home = TempDir::new().unwrap();
    forkline(&home)
        .args(["--config", "absent.toml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}
