//! End-to-end tests driving the compiled binary.
//!
//! Each test gets its own temp directory holding the database and the
//! session file, so tests never share state or touch the real home.

use assert_cmd::Command;
use tempfile::TempDir;

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("opsdesk").expect("binary exists");
        cmd.env("HOME", self.dir.path())
            .env("OPSDESK_DB", self.dir.path().join("opsdesk.db"))
            .env("OPSDESK_SESSION_FILE", self.dir.path().join("session.json"))
            .env_remove("OPENAI_API_KEY")
            .env_remove("OPSDESK_PASSWORD")
            .env_remove("RUST_LOG");
        cmd
    }

    /// init + register + login, the preamble most tests need.
    fn logged_in(self) -> Self {
        self.cmd().arg("init").assert().success();
        self.cmd()
            .args(["register", "alice", "--password", "hunter2"])
            .assert()
            .success();
        self.cmd()
            .args(["login", "alice", "--password", "hunter2"])
            .assert()
            .success();
        self
    }
}

#[test]
fn init_is_guarded_against_reinit() {
    let env = TestEnv::new();

    env.cmd().arg("init").assert().success();

    // Second init refuses without --force
    env.cmd().arg("init").assert().failure().code(2);

    env.cmd().args(["init", "--force"]).assert().success();
}

#[test]
fn commands_before_init_report_not_initialized() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args(["register", "alice", "--password", "pw"])
        .assert()
        .failure()
        .code(2)
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("NOT_INITIALIZED"));
}

#[test]
fn register_login_whoami_logout_flow() {
    let env = TestEnv::new();
    env.cmd().arg("init").assert().success();

    env.cmd()
        .args(["register", "alice", "--password", "hunter2"])
        .assert()
        .success();

    // Duplicate username is an auth-category failure
    let output = env
        .cmd()
        .args(["register", "alice", "--password", "other"])
        .assert()
        .failure()
        .code(5)
        .get_output()
        .clone();
    assert!(String::from_utf8_lossy(&output.stderr).contains("DUPLICATE_USER"));

    // Wrong password and unknown user both fail the same way
    env.cmd()
        .args(["login", "alice", "--password", "wrong"])
        .assert()
        .failure()
        .code(5);
    env.cmd()
        .args(["login", "mallory", "--password", "hunter2"])
        .assert()
        .failure()
        .code(5);

    env.cmd()
        .args(["login", "alice", "--password", "hunter2"])
        .assert()
        .success();

    let output = env.cmd().arg("whoami").assert().success().get_output().clone();
    assert!(String::from_utf8_lossy(&output.stdout).contains("alice"));

    env.cmd().arg("logout").assert().success();
    env.cmd().arg("whoami").assert().failure().code(5);
}

#[test]
fn record_commands_require_login() {
    let env = TestEnv::new();
    env.cmd().arg("init").assert().success();

    for args in [
        vec!["ticket", "list"],
        vec!["ticket", "create", "VPN down"],
        vec!["incident", "list"],
        vec!["dataset", "list"],
        vec!["dashboard"],
        vec!["ask", "anything"],
    ] {
        let output = env
            .cmd()
            .args(&args)
            .assert()
            .failure()
            .code(5)
            .get_output()
            .clone();
        assert!(
            String::from_utf8_lossy(&output.stderr).contains("AUTH_REQUIRED"),
            "expected AUTH_REQUIRED for {args:?}"
        );
    }
}

#[test]
fn ticket_crud_round_trip() {
    let env = TestEnv::new().logged_in();

    // stdout is piped, so output is JSON
    let output = env
        .cmd()
        .args(["ticket", "create", "VPN down", "--priority", "High"])
        .assert()
        .success()
        .get_output()
        .clone();
    let created: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("JSON output");
    let id = created["id"].as_i64().expect("id");
    assert_eq!(created["title"], "VPN down");
    assert_eq!(created["priority"], "High");

    let output = env
        .cmd()
        .args(["ticket", "list"])
        .assert()
        .success()
        .get_output()
        .clone();
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    env.cmd()
        .args(["ticket", "update", &id.to_string(), "--status", "Closed"])
        .assert()
        .success();

    let output = env
        .cmd()
        .args(["ticket", "show", &id.to_string()])
        .assert()
        .success()
        .get_output()
        .clone();
    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["status"], "Closed");

    env.cmd()
        .args(["ticket", "delete", &id.to_string()])
        .assert()
        .success();
    env.cmd()
        .args(["ticket", "show", &id.to_string()])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn invalid_priority_fails_with_suggestion() {
    let env = TestEnv::new().logged_in();

    let output = env
        .cmd()
        .args(["ticket", "create", "t", "--priority", "hgih"])
        .assert()
        .failure()
        .code(4)
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("INVALID_ARGUMENT"));
    assert!(stderr.contains("did you mean High?"));
}

#[test]
fn silent_create_prints_only_the_id() {
    let env = TestEnv::new().logged_in();

    let output = env
        .cmd()
        .args(["--silent", "ticket", "create", "quiet one"])
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "1");
}

#[test]
fn dashboard_aggregates_match_records() {
    let env = TestEnv::new().logged_in();

    env.cmd()
        .args(["ticket", "create", "a", "--priority", "High"])
        .assert()
        .success();
    env.cmd()
        .args(["ticket", "create", "b", "--priority", "High", "--status", "Closed"])
        .assert()
        .success();
    env.cmd()
        .args(["incident", "create", "Phishing", "--severity", "Critical"])
        .assert()
        .success();

    let output = env.cmd().arg("dashboard").assert().success().get_output().clone();
    let dash: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(dash["tickets"]["total"], 2);
    assert_eq!(dash["tickets"]["open"], 1);
    assert_eq!(dash["tickets"]["by_priority"]["High"], 2);
    assert_eq!(dash["incidents"]["by_severity"]["Critical"], 1);
    assert_eq!(dash["datasets"]["total"], 0);
}

#[test]
fn import_loads_fixture_rows() {
    let env = TestEnv::new().logged_in();

    let fixture = env.dir.path().join("incidents.csv");
    std::fs::write(
        &fixture,
        "incident_type,severity,status,detected_date,response_time_hours\n\
         Phishing,High,Open,2025-06-01T10:00:00,2.5\n\
         Malware,Critical,Closed,2025-06-02T09:30:00,\n",
    )
    .unwrap();

    let output = env
        .cmd()
        .args(["import", "incidents"])
        .arg(&fixture)
        .assert()
        .success()
        .get_output()
        .clone();
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["imported"], 2);

    let output = env
        .cmd()
        .args(["incident", "list"])
        .assert()
        .success()
        .get_output()
        .clone();
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 2);
    assert_eq!(listed[0]["detected_date"], "2025-06-01T10:00:00");
}

#[test]
fn ask_without_api_key_fails_offline() {
    let env = TestEnv::new().logged_in();

    let output = env
        .cmd()
        .args(["ask", "how many tickets are open?"])
        .assert()
        .failure()
        .code(7)
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("API_KEY_MISSING"));
}

#[test]
fn csv_format_lists_records() {
    let env = TestEnv::new().logged_in();

    env.cmd()
        .args(["ticket", "create", "with, comma"])
        .assert()
        .success();

    let output = env
        .cmd()
        .args(["--format", "csv", "ticket", "list"])
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("id,title,priority,status,created_date"));
    assert!(stdout.contains("\"with, comma\""));
}

#[test]
fn version_prints_package_info() {
    let env = TestEnv::new();

    let output = env.cmd().arg("version").assert().success().get_output().clone();
    let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["name"], "opsdesk-cli");
}
