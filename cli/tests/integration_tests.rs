use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "graph_shell_test_{name}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn shell() -> Command {
    Command::new(env!("CARGO_BIN_EXE_graph-shell"))
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn exec_dispatches_and_prints() {
    let output = shell()
        .args(["exec", "greet bob"])
        .output()
        .expect("failed to run graph-shell");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "Hello, bob!");
}

#[test]
fn exec_reaches_command_through_alias() {
    let output = shell()
        .args(["exec", "/hello bob"])
        .output()
        .expect("failed to run graph-shell");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "Hello, bob!");
}

#[test]
fn exec_multi_literal_math() {
    let output = shell()
        .args(["exec", "math add 2 3"])
        .output()
        .expect("failed to run graph-shell");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "2 add 3 = 5");
}

#[test]
fn exec_quoted_greedy_echo() {
    let output = shell()
        .args(["exec", "echo hello wide world"])
        .output()
        .expect("failed to run graph-shell");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "hello wide world");
}

#[test]
fn bad_input_fails_with_dispatch_error() {
    let output = shell()
        .args(["exec", "math add one 2"])
        .output()
        .expect("failed to run graph-shell");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value"), "stderr was: {stderr}");
}

#[test]
fn help_prints_generated_topic() {
    let output = shell()
        .args(["help", "math"])
        .output()
        .expect("failed to run graph-shell");
    assert!(output.status.success());
    let text = stdout_of(&output);
    assert!(text.starts_with("Integer arithmetic"));
    assert!(text.contains("Usage:"));
    assert!(text.contains("/math add <a> <b>"));
}

#[test]
fn suggest_emits_json_candidates() {
    let output = shell()
        .args(["suggest", "--json", "math "])
        .output()
        .expect("failed to run graph-shell");
    assert!(output.status.success());
    let candidates: Vec<String> =
        serde_json::from_str(stdout_of(&output).trim()).expect("valid JSON");
    assert_eq!(candidates, vec!["add", "sub", "mul"]);
}

#[test]
fn suggest_completes_command_names_first() {
    let output = shell()
        .args(["suggest", "gr"])
        .output()
        .expect("failed to run graph-shell");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "greet");
}

#[test]
fn admin_gated_without_config_and_open_with_it() {
    let denied = shell()
        .args(["exec", "admin shutdown"])
        .output()
        .expect("failed to run graph-shell");
    assert!(!denied.status.success());
    assert!(
        String::from_utf8_lossy(&denied.stderr).contains("Unknown command: admin"),
        "gated command must read as unknown"
    );

    let dir = TempDir::new("admin_config");
    let config = dir.join("session.yaml");
    fs::write(&config, "name: operator\npermissions:\n  - admin\n")
        .expect("failed to write config");

    let allowed = shell()
        .args(["--config", config.to_str().unwrap(), "exec", "admin shutdown"])
        .output()
        .expect("failed to run graph-shell");
    assert!(allowed.status.success());
    assert_eq!(stdout_of(&allowed).trim(), "shutting down");
}

#[test]
fn suggestion_override_served_for_admin_session() {
    let dir = TempDir::new("suggest_config");
    let config = dir.join("session.yaml");
    fs::write(&config, "all_permissions: true\n").expect("failed to write config");

    let output = shell()
        .args([
            "--config",
            config.to_str().unwrap(),
            "suggest",
            "admin reload ",
        ])
        .output()
        .expect("failed to run graph-shell");
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["world", "network", "scripts"]);
}
