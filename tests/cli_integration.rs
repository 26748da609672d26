//! Integration tests for the helpdesk binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct TestDesk {
    temp_dir: TempDir,
    password_hash: Option<String>,
}

impl TestDesk {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.toml"), "[auth]\nusername = \"admin\"\n").unwrap();
        Self {
            temp_dir,
            password_hash: None,
        }
    }

    fn with_password(password: &str) -> Self {
        Self {
            password_hash: Some(helpdesk::auth::hash_password(password).unwrap()),
            ..Self::new()
        }
    }

    fn data_file(&self) -> PathBuf {
        self.temp_dir.path().join("tickets.json")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("helpdesk").unwrap();
        cmd.env_remove("HELPDESK_PASSWORD")
            .env_remove("HELPDESK_AUTH__PASSWORD_HASH")
            .env_remove("RUST_LOG")
            .arg("--no-color")
            .arg("--config")
            .arg(self.temp_dir.path().join("config.toml"))
            .arg("--data")
            .arg(self.data_file());
        if let Some(hash) = &self.password_hash {
            cmd.env("HELPDESK_AUTH__PASSWORD_HASH", hash);
        }
        cmd
    }

    /// Submit a ticket and return its full ID
    fn submit(&self, name: &str, device: &str) -> String {
        let output = self
            .cmd()
            .args(["--json", "submit", "--name", name, "--phone", "555-123-4567"])
            .args(["--email", "customer@example.com", "--device", device])
            .args(["--description", "Will not power on"])
            .output()
            .unwrap();
        assert!(output.status.success(), "submit failed: {output:?}");
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        json["ticket"]["id"].as_str().unwrap().to_string()
    }
}

#[test]
fn test_submit_list_and_show() {
    let desk = TestDesk::new();
    let id = desk.submit("Alice Johnson", "iPhone 12");

    desk.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Johnson"))
        .stdout(predicate::str::contains(&id[..8]));

    desk.cmd()
        .args(["show", &id[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Will not power on"))
        .stdout(predicate::str::contains("medium"));

    let stored = fs::read_to_string(desk.data_file()).unwrap();
    assert!(stored.contains("\"deviceName\": \"iPhone 12\""));
    assert!(stored.contains("\"status\": \"new\""));
}

#[test]
fn test_submit_reports_invalid_fields() {
    let desk = TestDesk::new();
    desk.cmd()
        .args(["submit", "--name", "Bob", "--phone", " ", "--email", "bob.example.com"])
        .args(["--device", "Laptop", "--description", "Fan noise"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("phone: is required"))
        .stderr(predicate::str::contains("email: must contain exactly one '@'"));
    assert!(!desk.data_file().exists());
}

#[test]
fn test_list_filters_by_status() {
    let desk = TestDesk::new();
    desk.submit("Alice Johnson", "iPhone 12");

    desk.cmd()
        .args(["list", "--status", "resolved"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tickets found"));

    desk.cmd()
        .args(["list", "--status", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown status"));
}

#[test]
fn test_update_requires_valid_credentials() {
    let desk = TestDesk::with_password("s3cret");
    let id = desk.submit("Alice Johnson", "iPhone 12");

    desk.cmd()
        .args(["update", &id, "--status", "in-progress", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));

    desk.cmd()
        .args(["update", &id, "--status", "in-progress", "--password", "s3cret"])
        .args(["--note", "Ordered a screen"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status is now in-progress"));

    desk.cmd()
        .args(["--json", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"in-progress\""))
        .stdout(predicate::str::contains("\"author\": \"admin\""));
}

#[test]
fn test_update_checks_credentials_before_ticket_lookup() {
    let desk = TestDesk::with_password("s3cret");
    desk.submit("Alice Johnson", "iPhone 12");

    desk.cmd()
        .args(["update", "zzzzzzzz", "--priority", "high", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));

    desk.cmd()
        .args(["update", "zzzzzzzz", "--priority", "high", "--password", "s3cret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_update_rejects_illegal_transition() {
    let desk = TestDesk::with_password("s3cret");
    let id = desk.submit("Alice Johnson", "iPhone 12");

    desk.cmd()
        .env("HELPDESK_PASSWORD", "s3cret")
        .args(["update", &id, "--status", "closed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot move to closed"));
}

#[test]
fn test_update_without_configured_hash_always_fails() {
    let desk = TestDesk::new();
    let id = desk.submit("Alice Johnson", "iPhone 12");

    desk.cmd()
        .args(["update", &id, "--priority", "high", "--password", "admin123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));
}

#[test]
fn test_report_with_and_without_tickets() {
    let desk = TestDesk::new();
    desk.cmd()
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Report generation failed: No tickets available for analysis",
        ));

    desk.submit("Alice Johnson", "iPhone 12");
    desk.submit("Bob Smith", "Dell XPS");
    let report_path = desk.temp_dir.path().join("report.txt");

    desk.cmd()
        .arg("report")
        .arg("--output")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("TICKET SYSTEM ANALYSIS REPORT"))
        .stdout(predicate::str::contains("  New: 2 (100.0%)"))
        .stdout(predicate::str::contains("Report saved to:"));

    let saved = fs::read_to_string(&report_path).unwrap();
    assert!(saved.contains("DEVICE ANALYSIS"));
    assert!(saved.contains("  Laptop: 1"));
}

#[test]
fn test_analyze_export_file() {
    let desk = TestDesk::new();
    let export = desk.temp_dir.path().join("export.json");
    fs::write(
        &export,
        r#"{"success": true, "data": [
            {"status": "open", "deviceName": "Galaxy S21", "email": "a@Gmail.com",
             "phone": "555-111-2222", "createdAt": "2025-01-06T14:05:00.000Z"},
            {"status": "resolved", "deviceName": "iPhone 12", "createdAt": "not a date"}
        ]}"#,
    )
    .unwrap();

    let output = desk
        .cmd()
        .arg("analyze")
        .arg("--input")
        .arg(&export)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["result"], "report");
    assert_eq!(json["total_tickets"], 2);
    assert_eq!(json["time_analysis"]["total_analyzed"], 1);
    assert_eq!(json["summary"]["peak_hour"], 14);
    assert_eq!(json["contact_analysis"]["email_domains"][0]["value"], "gmail.com");
}

#[test]
fn test_hash_password_output_verifies() {
    let desk = TestDesk::new();
    desk.cmd()
        .args(["hash-password", "--password", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$argon2id$"));

    desk.cmd()
        .args(["hash-password", "--password", ""])
        .assert()
        .failure();
}
