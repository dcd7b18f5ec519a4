//! Integration tests for the CredVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Credentials are supplied through `CREDVAULT_PASSWORD` and
//! `CREDVAULT_PASSPHRASE` so no test needs an interactive prompt.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the credvault binary.
fn credvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("credvault").expect("binary should exist")
}

#[test]
fn help_flag_shows_usage() {
    credvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Credential vault with passphrase-based encryption",
        ))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("store"))
        .stdout(predicate::str::contains("retrieve"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn version_flag_shows_version() {
    credvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("credvault"));
}

#[test]
fn no_args_shows_help() {
    credvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn register_store_retrieve_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().to_str().unwrap();

    credvault()
        .args(["register", "alice", "--config-dir", dir])
        .env("CREDVAULT_PASSWORD", "swordfish123")
        .assert()
        .success()
        .stdout(predicate::str::contains("registered"));

    credvault()
        .args(["store", "alice", "--config-dir", dir])
        .env("CREDVAULT_PASSWORD", "swordfish123")
        .env("CREDVAULT_PASSPHRASE", "k1")
        .write_stdin("hello world\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("cv1$"));

    credvault()
        .args(["retrieve", "alice", "0", "--config-dir", dir])
        .env("CREDVAULT_PASSWORD", "swordfish123")
        .env("CREDVAULT_PASSPHRASE", "k1")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello world"));
}

#[test]
fn retrieve_with_wrong_passphrase_fails() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().to_str().unwrap();

    credvault()
        .args(["register", "alice", "--config-dir", dir])
        .env("CREDVAULT_PASSWORD", "swordfish123")
        .assert()
        .success();

    credvault()
        .args(["store", "alice", "--config-dir", dir])
        .env("CREDVAULT_PASSWORD", "swordfish123")
        .env("CREDVAULT_PASSPHRASE", "k1")
        .write_stdin("top secret\n")
        .assert()
        .success();

    credvault()
        .args(["retrieve", "alice", "0", "--config-dir", dir])
        .env("CREDVAULT_PASSWORD", "swordfish123")
        .env("CREDVAULT_PASSPHRASE", "k2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decryption failed"));
}

#[test]
fn duplicate_registration_fails() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().to_str().unwrap();

    credvault()
        .args(["register", "alice", "--config-dir", dir])
        .env("CREDVAULT_PASSWORD", "swordfish123")
        .assert()
        .success();

    credvault()
        .args(["register", "alice", "--config-dir", dir])
        .env("CREDVAULT_PASSWORD", "swordfish123")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn login_with_wrong_password_fails() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().to_str().unwrap();

    credvault()
        .args(["register", "alice", "--config-dir", dir])
        .env("CREDVAULT_PASSWORD", "swordfish123")
        .assert()
        .success();

    credvault()
        .args(["list", "alice", "--config-dir", dir])
        .env("CREDVAULT_PASSWORD", "not-the-password")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
}

#[test]
fn retrieve_out_of_range_index_fails() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().to_str().unwrap();

    credvault()
        .args(["register", "alice", "--config-dir", dir])
        .env("CREDVAULT_PASSWORD", "swordfish123")
        .assert()
        .success();

    credvault()
        .args(["retrieve", "alice", "5", "--config-dir", dir])
        .env("CREDVAULT_PASSWORD", "swordfish123")
        .env("CREDVAULT_PASSPHRASE", "k1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No blob at index 5"));
}

#[test]
fn short_password_is_rejected_at_registration() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().to_str().unwrap();

    credvault()
        .args(["register", "alice", "--config-dir", dir])
        .env("CREDVAULT_PASSWORD", "short")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}

#[test]
fn completions_generates_script() {
    credvault()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("credvault"));
}
