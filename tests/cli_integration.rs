//! Integration tests for the SiteVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The master password is always passed with `--password` or
//! `SITEVAULT_PASSWORD` so no interactive prompt is reached, and `HOME`
//! points into a temp dir so a real config file is never read.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use sitevault::vault::VaultSession;

/// Helper: get a Command pointing at the sitevault binary, isolated in `home`.
fn sitevault(home: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("sitevault").expect("binary should exist");
    cmd.env("HOME", home.path())
        .env_remove("SITEVAULT_VAULT")
        .env_remove("SITEVAULT_PASSWORD")
        .env_remove("SITEVAULT_NEW_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn vault_arg(home: &TempDir) -> String {
    home.child("vault.svf").path().display().to_string()
}

#[test]
fn help_flag_shows_usage() {
    let home = TempDir::new().unwrap();
    sitevault(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted password vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("host"));
}

#[test]
fn version_flag_shows_version() {
    let home = TempDir::new().unwrap();
    sitevault(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sitevault"));
}

#[test]
fn no_args_shows_help() {
    let home = TempDir::new().unwrap();
    sitevault(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn get_on_missing_vault_fails() {
    let home = TempDir::new().unwrap();
    let vault = vault_arg(&home);

    sitevault(&home)
        .args(["--vault", &vault, "--password", "pw", "get", "--name", "a.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No vault found"));
}

#[test]
fn get_in_missing_directory_reports_missing_vault() {
    let home = TempDir::new().unwrap();
    let vault = home.child("never-created").child("vault.svf");

    sitevault(&home)
        .args(["--password", "pw", "get", "--name", "a.com", "--vault"])
        .arg(vault.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No vault found"));

    home.child("never-created").assert(predicate::path::missing());
}

#[test]
fn piped_secret_keeps_trailing_whitespace() {
    let home = TempDir::new().unwrap();
    let vault = vault_arg(&home);

    sitevault(&home)
        .args([
            "--vault", &vault, "--password", "pw", "add", "--name", "a.com", "--url",
            "https://a.com", "--username", "ann",
        ])
        .write_stdin("ends-with-space  \n")
        .assert()
        .success();

    let session = VaultSession::open(&vault, "pw").unwrap();
    assert_eq!(session.get("a.com").unwrap().secret, "ends-with-space  ");
}

#[test]
fn generate_prints_password_of_requested_shape() {
    let home = TempDir::new().unwrap();
    let output = sitevault(&home)
        .args(["generate", "--length", "32", "--no-symbols"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let password = stdout.trim_end_matches('\n');
    assert_eq!(password.len(), 32);
    assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn add_generate_stores_random_password() {
    let home = TempDir::new().unwrap();
    let vault = vault_arg(&home);

    sitevault(&home)
        .args([
            "--vault", &vault, "--password", "pw", "add", "--name", "a.com", "--url",
            "https://a.com", "--username", "ann", "--generate", "--length", "24",
        ])
        .assert()
        .success();

    let session = VaultSession::open(&vault, "pw").unwrap();
    assert_eq!(session.get("a.com").unwrap().secret.len(), 24);
}

#[test]
fn init_reset_requires_a_different_password() {
    let home = TempDir::new().unwrap();
    let vault = vault_arg(&home);

    sitevault(&home)
        .args([
            "--vault", &vault, "--password", "old", "add", "--name", "a.com", "--url",
            "https://a.com", "--username", "ann", "--secret", "s",
        ])
        .assert()
        .success();

    // The current password in SITEVAULT_PASSWORD is not taken as the new one.
    sitevault(&home)
        .args(["--vault", &vault, "init", "--yes"])
        .env("SITEVAULT_PASSWORD", "old")
        .env("SITEVAULT_NEW_PASSWORD", "old")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must differ"));

    sitevault(&home)
        .args(["--vault", &vault, "init", "--yes"])
        .env("SITEVAULT_PASSWORD", "old")
        .env("SITEVAULT_NEW_PASSWORD", "new")
        .assert()
        .success();

    let session = VaultSession::open(&vault, "new").unwrap();
    assert_eq!(session.list_labels(), vec!["a.com"]);
}

#[test]
fn add_then_get_shows_credential() {
    let home = TempDir::new().unwrap();
    let vault = vault_arg(&home);

    sitevault(&home)
        .args([
            "--vault",
            &vault,
            "--password",
            "hunter2",
            "add",
            "--name",
            "example.com",
            "--url",
            "https://example.com",
            "--username",
            "me@x.com",
            "--secret",
            "p@ss1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added entry 'example.com'"));

    home.child("vault.svf").assert(predicate::path::exists());

    sitevault(&home)
        .args(["--vault", &vault, "get", "--name", "EXAMPLE.COM"])
        .env("SITEVAULT_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("p@ss1"))
        .stdout(predicate::str::contains("me@x.com"));

    sitevault(&home)
        .args(["--vault", &vault, "--password", "wrong", "get", "--name", "example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decryption failed"));
}

#[test]
fn import_skips_incomplete_rows() {
    let home = TempDir::new().unwrap();
    let vault = vault_arg(&home);
    let csv = home.child("export.csv");
    csv.write_str(
        "name,url,username,password\n\
         a.com,https://a.com,ann,pw1\n\
         b.com,https://b.com,,pw2\n",
    )
    .unwrap();

    sitevault(&home)
        .args(["--vault", &vault, "--password", "pw", "import"])
        .arg(csv.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 entries"));

    sitevault(&home)
        .args(["--vault", &vault, "--password", "pw", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.com"))
        .stdout(predicate::str::contains("b.com").not());
}

#[test]
fn update_without_fields_fails() {
    let home = TempDir::new().unwrap();
    sitevault(&home)
        .args(["--password", "pw", "update", "--name", "a.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to update"));
}

#[test]
fn host_answers_framed_request() {
    let home = TempDir::new().unwrap();
    let vault = vault_arg(&home);

    sitevault(&home)
        .args([
            "--vault", &vault, "--password", "pw", "add", "--name", "a.com", "--url",
            "https://a.com", "--username", "ann", "--secret", "s3cret",
        ])
        .assert()
        .success();

    let body = br#"{"site":"A.COM","password":"pw"}"#;
    let mut request = (body.len() as u32).to_le_bytes().to_vec();
    request.extend_from_slice(body);

    let output = sitevault(&home)
        .args(["--vault", &vault, "host"])
        .write_stdin(request)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = output.stdout;
    let len = u32::from_le_bytes([stdout[0], stdout[1], stdout[2], stdout[3]]) as usize;
    assert_eq!(stdout.len(), 4 + len);

    let response: serde_json::Value = serde_json::from_slice(&stdout[4..]).unwrap();
    assert_eq!(response["success"], true);
    assert_eq!(response["entry"]["name"], "a.com");
    assert_eq!(response["entry"]["password"], "s3cret");
}

#[test]
fn completions_bash_generates_script() {
    let home = TempDir::new().unwrap();
    sitevault(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sitevault"));
}

#[test]
fn import_help_shows_file_arg() {
    let home = TempDir::new().unwrap();
    sitevault(&home)
        .args(["import", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"));
}
