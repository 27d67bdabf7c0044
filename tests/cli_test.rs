//! CLI binary integration tests using assert_cmd
//!
//! Every test points the binary at a temp credentials file and project dir.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn awsprofile(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_awsprofile"));
    cmd.env_remove("AWS_SHARED_CREDENTIALS_FILE")
        .env_remove("AWSPROFILE_NON_INTERACTIVE")
        .env("HOME", dir)
        .arg("--credentials")
        .arg(dir.join(".aws/credentials"))
        .arg("--project-dir")
        .arg(dir.join("project"));
    cmd
}

#[test]
fn test_cli_help_flag() {
    let dir = TempDir::new().unwrap();
    awsprofile(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("profile"))
        .stdout(predicate::str::contains("restore"));
}

#[test]
fn test_cli_profile_defaults_to_default() {
    let dir = TempDir::new().unwrap();
    awsprofile(dir.path())
        .arg("profile")
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile: default"));
}

#[test]
fn test_cli_profile_name_is_saved_to_project() {
    let dir = TempDir::new().unwrap();
    awsprofile(dir.path())
        .args(["profile", "staging"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile: staging"));

    let settings = fs::read_to_string(dir.path().join("project/.awsprofile.toml")).unwrap();
    assert!(settings.contains("profile = \"staging\""));

    awsprofile(dir.path())
        .arg("profile")
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile: staging"));
}

#[test]
fn test_cli_set_from_stdin_writes_credentials() {
    let dir = TempDir::new().unwrap();
    awsprofile(dir.path())
        .args(["profile", "test", "--set", "--from-stdin"])
        .write_stdin("AAA\nBBB\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added profile [test]"));

    let written = fs::read_to_string(dir.path().join(".aws/credentials")).unwrap();
    assert_eq!(
        written.trim(),
        "[test]\naws_access_key_id = AAA\naws_secret_access_key = BBB"
    );
}

#[test]
fn test_cli_existing_profile_needs_force() {
    let dir = TempDir::new().unwrap();
    let creds = dir.path().join(".aws/credentials");
    fs::create_dir_all(creds.parent().unwrap()).unwrap();
    fs::write(&creds, "[test]\naws_access_key_id = OLD\n").unwrap();

    awsprofile(dir.path())
        .args(["profile", "test", "--set", "--from-stdin"])
        .write_stdin("NEW\nSECRET\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kept existing profile [test]"));
    assert_eq!(
        fs::read_to_string(&creds).unwrap(),
        "[test]\naws_access_key_id = OLD\n"
    );

    awsprofile(dir.path())
        .args(["profile", "test", "--set", "--from-stdin", "--force"])
        .write_stdin("NEW\nSECRET\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated profile [test]"));
    assert!(fs::read_to_string(&creds).unwrap().contains("aws_access_key_id = NEW"));
    assert!(dir.path().join(".aws/credentials.1.bak").exists());
}

#[test]
fn test_cli_non_interactive_requires_stdin() {
    let dir = TempDir::new().unwrap();
    awsprofile(dir.path())
        .args(["--non-interactive", "profile", "test", "--set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from-stdin"));
}

#[test]
fn test_cli_rejects_bad_profile_name() {
    let dir = TempDir::new().unwrap();
    awsprofile(dir.path())
        .args(["profile", "bad]name"])
        .assert()
        .failure();
}

#[test]
fn test_cli_list_json_hides_values() {
    let dir = TempDir::new().unwrap();
    let creds = dir.path().join(".aws/credentials");
    fs::create_dir_all(creds.parent().unwrap()).unwrap();
    fs::write(
        &creds,
        "[default]\naws_access_key_id = AKIASECRET\n\n[dev]\nregion = x\n",
    )
    .unwrap();

    awsprofile(dir.path())
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"default\""))
        .stdout(predicate::str::contains("\"dev\""))
        .stdout(predicate::str::contains("aws_access_key_id"))
        .stdout(predicate::str::contains("AKIASECRET").not());
}

#[test]
fn test_cli_list_malformed_store_fails() {
    let dir = TempDir::new().unwrap();
    let creds = dir.path().join(".aws/credentials");
    fs::create_dir_all(creds.parent().unwrap()).unwrap();
    fs::write(&creds, "orphan = value\n").unwrap();

    awsprofile(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 1"))
        .stderr(predicate::str::contains("orphan").not());
}

#[test]
fn test_cli_restore_latest_backup() {
    let dir = TempDir::new().unwrap();
    let creds = dir.path().join(".aws/credentials");
    fs::create_dir_all(creds.parent().unwrap()).unwrap();
    fs::write(&creds, "[a]\nx = 1\n").unwrap();

    awsprofile(dir.path())
        .args(["profile", "b", "--set", "--from-stdin"])
        .write_stdin("K\nS\n")
        .assert()
        .success();
    awsprofile(dir.path())
        .arg("backups")
        .assert()
        .success()
        .stdout(predicate::str::contains("credentials.1.bak"));

    awsprofile(dir.path())
        .arg("restore")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored"));
    assert_eq!(fs::read_to_string(&creds).unwrap(), "[a]\nx = 1\n");
}

#[test]
fn test_cli_doctor_reports_missing_store() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".aws")).unwrap();
    awsprofile(dir.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("credentials file missing"));
}

#[test]
fn test_cli_rust_log_wins_over_default_level() {
    let dir = TempDir::new().unwrap();
    awsprofile(dir.path())
        .env("RUST_LOG", "info")
        .args(["profile", "test", "--set", "--from-stdin"])
        .write_stdin("AAA\nBBB\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("added profile [test]"));

    awsprofile(dir.path())
        .env_remove("RUST_LOG")
        .args(["profile", "other", "--set", "--from-stdin"])
        .write_stdin("AAA\nBBB\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("added profile").not());
}
