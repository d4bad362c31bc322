use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_run_flags_and_commands() {
    cargo_bin_cmd!("prompter")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--speed"))
        .stdout(predicate::str::contains("--font-size"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("prompter")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("prompter")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_speed_must_be_a_number() {
    cargo_bin_cmd!("prompter")
        .args(["--speed", "fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
