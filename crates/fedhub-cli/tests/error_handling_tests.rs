//! Tests for error handling, suggestions and exit codes.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fedhub(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fedhub").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

#[test]
fn test_same_team_game_is_rejected() {
    let temp = TempDir::new().unwrap();

    fedhub(temp.path())
        .args([
            "create",
            "games",
            "--set",
            "home_team_id=t1",
            "--set",
            "away_team_id=t1",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot oppose team 't1' to itself"))
        .stderr(predicate::str::contains("Home and away teams must be different"));

    assert!(!temp.path().join("games.json").exists());
}

#[test]
fn test_delete_missing_record_is_not_found() {
    let temp = TempDir::new().unwrap();

    fedhub(temp.path())
        .args(["delete", "teams", "no-such-team"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_missing_config_file_is_configuration_error() {
    let temp = TempDir::new().unwrap();

    fedhub(temp.path())
        .args(["--config"])
        .arg(temp.path().join("missing.toml"))
        .args(["list", "teams"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_write_to_missing_data_dir_suggests_data_dir_flag() {
    let temp = TempDir::new().unwrap();

    fedhub(&temp.path().join("absent"))
        .args(["create", "teams", "--set", "name=Derby"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--data-dir"));
}

#[test]
fn test_unknown_collection_is_usage_error() {
    let temp = TempDir::new().unwrap();

    fedhub(temp.path())
        .args(["list", "stadiums"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("stadiums"));
}

#[test]
fn test_malformed_json_is_user_error() {
    let temp = TempDir::new().unwrap();

    fedhub(temp.path())
        .args(["create", "news", "--json", "{ not json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--json"));
}
