use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("prompter")
        .env("PROMPTER_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("prompter")
        .env("PROMPTER_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("[scroll]"));
    assert!(contents.contains("speed ="));
    assert!(contents.contains("# Initial font size"));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("prompter")
        .env("PROMPTER_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_generate_prints_defaults() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("prompter")
        .env("PROMPTER_HOME", dir.path())
        .args(["config", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base_delay_ms = 50"))
        .stdout(predicate::str::contains("timeout_ms = 1000"));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "[scroll\nspeed = ").unwrap();

    cargo_bin_cmd!("prompter")
        .env("PROMPTER_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("load config"));
}

#[test]
fn test_run_without_terminal_fails_cleanly() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("prompter")
        .env("PROMPTER_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}

#[test]
fn test_missing_script_file_is_reported() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("prompter")
        .env("PROMPTER_HOME", dir.path())
        .args(["--file"])
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}

#[test]
fn test_logs_go_to_requested_file() {
    let dir = tempdir().unwrap();
    let log_file = dir.path().join("run.log");

    cargo_bin_cmd!("prompter")
        .env("PROMPTER_HOME", dir.path())
        .env("PROMPTER_LOG", "debug")
        .arg("--log-file")
        .arg(&log_file)
        .args(["config", "path"])
        .assert()
        .success();

    assert!(log_file.exists());
}
