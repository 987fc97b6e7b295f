//! End-to-end tests for the nextload binary: argument handling and exit
//! behavior for setup errors (no network involved).

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_no_arguments_shows_usage_and_fails() {
    Command::cargo_bin("nextload")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_help_lists_both_subcommands() {
    Command::cargo_bin("nextload")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("download"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_invalid_url_aborts_with_nonzero_exit() {
    Command::cargo_bin("nextload")
        .unwrap()
        .args(["list", "--url", "not-a-url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid HTTP(S) URL"));
}

#[test]
fn test_non_share_url_aborts_with_nonzero_exit() {
    Command::cargo_bin("nextload")
        .unwrap()
        .args(["download", "--url", "https://host.example/files/x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a Nextcloud share link"));
}

#[test]
fn test_invalid_glob_pattern_aborts_before_any_network_call() {
    Command::cargo_bin("nextload")
        .unwrap()
        .args([
            "list",
            "--url",
            "https://host.example/s/TOKEN",
            "--include",
            "[",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid glob pattern"));
}

#[test]
fn test_download_rejects_unknown_flags() {
    Command::cargo_bin("nextload")
        .unwrap()
        .args(["download", "--url", "https://host/s/T", "--bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bogus"));
}
