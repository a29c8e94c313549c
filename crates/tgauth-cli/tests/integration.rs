//! Integration tests for CLI commands.

use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

const SECRET: &str = "testsecret";
const SCENARIO: &str = "id=42&first_name=Ann&auth_date=1700000000";
const SCENARIO_HASH: &str = "d6f4d286fa31b2e4efca491392fdddc767d81c2c0265af82a15841258b5c4355";

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_tgauth"))
        .args(args)
        .env_remove("TGAUTH_BOT_TOKEN")
        .env_remove("TGAUTH_BOT_USERNAME")
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    let success = output.status.success();

    (success, stdout, stderr)
}

fn signed_query() -> String {
    format!("{}&hash={}", SCENARIO, SCENARIO_HASH)
}

#[test]
fn test_check_string_command() {
    let (success, stdout, _) = run_cli(&["check-string", "--query", SCENARIO]);
    assert!(success);
    assert_eq!(stdout, "auth_date=1700000000\nfirst_name=Ann\nid=42\n");
}

#[test]
fn test_check_string_requires_a_source() {
    let (success, _, stderr) = run_cli(&["check-string"]);
    assert!(!success);
    assert!(!stderr.is_empty());
}

#[test]
fn test_sign_command() {
    let (success, stdout, _) = run_cli(&["sign", "--query", SCENARIO, "--bot-token", SECRET]);
    assert!(success);
    assert_eq!(stdout.trim(), SCENARIO_HASH);
}

#[test]
fn test_sign_reads_token_from_env() {
    let output = Command::new(env!("CARGO_BIN_EXE_tgauth"))
        .args(["sign", "--query", SCENARIO])
        .env("TGAUTH_BOT_TOKEN", SECRET)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim(), SCENARIO_HASH);
}

#[test]
fn test_sign_append_then_verify() {
    let (success, stdout, _) = run_cli(&[
        "sign", "--query", SCENARIO, "--bot-token", SECRET, "--append",
    ]);
    assert!(success);
    let query = stdout.trim().to_string();
    assert!(query.contains(&format!("hash={}", SCENARIO_HASH)));

    let (success, stdout, _) = run_cli(&[
        "verify", "--query", &query, "--bot-token", SECRET, "--now", "1700000030",
    ]);
    assert!(success);
    assert!(stdout.contains("VERDICT"));
    assert!(stdout.contains("verified"));
}

#[test]
fn test_verify_json_output() {
    let query = signed_query();
    let (success, stdout, _) = run_cli(&[
        "verify", "--query", &query, "--bot-token", SECRET, "--now", "1700000030", "--json",
    ]);
    assert!(success);
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["id"], "42");
    assert_eq!(parsed["verdict"], "verified");
    assert_eq!(parsed["auth_time"], "2023-11-14T22:13:20Z");
    assert!(parsed.get("reason").is_none());
}

#[test]
fn test_verify_full_url_query() {
    let url = format!("https://sso.example.org/login?{}", signed_query());
    let (success, _, _) = run_cli(&[
        "verify", "--query", &url, "--bot-token", SECRET, "--now", "1700000000",
    ]);
    assert!(success);
}

#[test]
fn test_verify_rejects_tampered_field() {
    let query = signed_query().replace("Ann", "Bob");
    let (success, stdout, _) = run_cli(&[
        "verify", "--query", &query, "--bot-token", SECRET, "--now", "1700000030", "--json",
    ]);
    assert!(!success);
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["verdict"], "rejected");
    assert_eq!(parsed["reason"], "signature_mismatch");
}

#[test]
fn test_verify_rejects_expired() {
    let query = signed_query();
    let (success, stdout, _) = run_cli(&[
        "verify", "--query", &query, "--bot-token", SECRET, "--now", "1700000061", "--json",
    ]);
    assert!(!success);
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["reason"], "expired");

    // A wider window accepts the same assertion.
    let (success, _, _) = run_cli(&[
        "verify", "--query", &query, "--bot-token", SECRET, "--now", "1700000061", "--window",
        "120",
    ]);
    assert!(success);
}

#[test]
fn test_verify_rejects_bad_configuration() {
    let query = signed_query();
    let (success, _, stderr) = run_cli(&[
        "verify", "--query", &query, "--bot-token", "  ", "--now", "1700000000",
    ]);
    assert!(!success);
    assert!(stderr.contains("Error"));

    for window in ["0", "-5"] {
        let (success, _, stderr) = run_cli(&[
            "verify", "--query", &query, "--bot-token", SECRET, "--window", window,
        ]);
        assert!(!success);
        assert!(stderr.contains("Error"));
    }
}

#[test]
fn test_verify_from_form_file() {
    let temp_dir = TempDir::new().unwrap();
    let form_path = temp_dir.path().join("body.txt");
    std::fs::write(&form_path, format!("{}\n", signed_query())).unwrap();

    let (success, _, _) = run_cli(&[
        "verify",
        "--query",
        "state=abc",
        "--form",
        form_path.to_str().unwrap(),
        "--bot-token",
        SECRET,
        "--now",
        "1700000000",
    ]);
    assert!(success);
}

fn login(accounts: &str, uri: &str, allow_registration: bool) -> (bool, String, String) {
    let mut args = vec![
        "login",
        "--uri",
        uri,
        "--accounts",
        accounts,
        "--bot-username",
        "@example_bot",
        "--bot-token",
        SECRET,
        "--now",
        "1700000010",
    ];
    if allow_registration {
        args.push("--allow-registration");
    }
    run_cli(&args)
}

#[test]
fn test_login_without_assertion_shows_widget() {
    let temp_dir = TempDir::new().unwrap();
    let accounts = temp_dir.path().join("accounts.json");

    let (success, stdout, _) = login(
        accounts.to_str().unwrap(),
        "https://sso.example.org/login?state=abc&hash=stale",
        true,
    );
    assert!(success);
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["status"], "not_attempted");
    assert_eq!(parsed["widget"]["bot_username"], "example_bot");
    assert_eq!(
        parsed["widget"]["redirect_uri"],
        "https://sso.example.org/login?state=abc"
    );
    assert!(!accounts.exists());
}

#[test]
fn test_login_creates_then_finds_account() {
    let temp_dir = TempDir::new().unwrap();
    let accounts = temp_dir.path().join("accounts.json");
    let uri = format!("https://sso.example.org/login?{}", signed_query());

    let (success, stdout, _) = login(accounts.to_str().unwrap(), &uri, true);
    assert!(success);
    let first: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(first["status"], "authenticated");
    assert_eq!(first["created"], true);
    assert_eq!(first["account"]["first_name"], "Ann");
    assert_eq!(first["account"]["attributes"]["telegram_user_id"], "42");
    assert!(accounts.exists());

    let (success, stdout, _) = login(accounts.to_str().unwrap(), &uri, false);
    assert!(success);
    let second: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(second["created"], false);
    assert_eq!(second["account"]["id"], first["account"]["id"]);
}

#[test]
fn test_login_registration_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let accounts = temp_dir.path().join("accounts.json");
    let uri = format!("https://sso.example.org/login?{}", signed_query());

    let (success, stdout, stderr) = login(accounts.to_str().unwrap(), &uri, false);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("authentication failed"));
}

#[test]
fn test_login_failures_share_one_message() {
    let temp_dir = TempDir::new().unwrap();
    let accounts = temp_dir.path().join("accounts.json");
    let tampered = format!(
        "https://sso.example.org/login?{}",
        signed_query().replace("Ann", "Bob")
    );

    let (success, stdout, stderr) = login(accounts.to_str().unwrap(), &tampered, true);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Error: authentication failed"));
    assert!(!accounts.exists());
}

#[test]
fn test_login_and_verify_read_form_files_alike() {
    let temp_dir = TempDir::new().unwrap();
    let accounts = temp_dir.path().join("accounts.json");
    let form_path = temp_dir.path().join("body.txt");
    std::fs::write(&form_path, format!("{}\n", signed_query())).unwrap();
    let form = form_path.to_str().unwrap();

    let (verified, _, _) = run_cli(&[
        "verify", "--query", "state=1", "--form", form, "--bot-token", SECRET, "--now",
        "1700000000",
    ]);
    assert!(verified);

    let (success, stdout, stderr) = run_cli(&[
        "login",
        "--uri",
        "https://sso.example.org/login",
        "--form",
        form,
        "--accounts",
        accounts.to_str().unwrap(),
        "--bot-username",
        "example_bot",
        "--bot-token",
        SECRET,
        "--allow-registration",
        "--now",
        "1700000000",
    ]);
    assert!(success, "{stderr}");
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["status"], "authenticated");
    assert_eq!(parsed["created"], true);
}

#[test]
fn test_verify_rejects_incomplete_sources() {
    let temp_dir = TempDir::new().unwrap();
    let form_path = temp_dir.path().join("body.txt");
    std::fs::write(&form_path, "id=42&auth_date=1700000000\n").unwrap();

    let (success, stdout, stderr) = run_cli(&[
        "verify",
        "--query",
        "id=42",
        "--form",
        form_path.to_str().unwrap(),
        "--bot-token",
        SECRET,
    ]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("id, auth_date, hash"));
}

#[test]
fn test_sign_accepts_newline_terminated_form() {
    let temp_dir = TempDir::new().unwrap();
    let form_path = temp_dir.path().join("body.txt");
    std::fs::write(&form_path, format!("{}\r\n", SCENARIO)).unwrap();

    let (success, stdout, _) = run_cli(&[
        "sign",
        "--form",
        form_path.to_str().unwrap(),
        "--bot-token",
        SECRET,
    ]);
    assert!(success);
    assert_eq!(stdout.trim(), SCENARIO_HASH);
}
