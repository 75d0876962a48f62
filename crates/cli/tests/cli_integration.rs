use std::process::Command;

fn ghrest() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ghrest"))
}

#[test]
fn test_cli_version() {
    let output = ghrest()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ghrest"));
    assert!(stdout.contains("0.1."));
}

#[test]
fn test_cli_help_lists_commands() {
    let output = ghrest()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    for command in ["user", "repo", "issue", "pr", "webhook", "request", "fetch", "config"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn test_issue_help() {
    let output = ghrest()
        .args(["issue", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("create"));
    assert!(stdout.contains("list"));
}

#[test]
fn test_invalid_issue_state_rejected() {
    let output = ghrest()
        .args(["issue", "list", "octocat", "hello", "--state", "merged"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid issue state"));
}

#[test]
fn test_missing_token_reported() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = dir.path().join("config.yaml");

    let output = ghrest()
        .args(["--config", config.to_str().unwrap(), "user", "octocat"])
        .env_remove("GITHUB_TOKEN")
        .env_remove("GHREST_TOKEN_DEFAULT")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No token found"));
}

#[test]
fn test_invalid_command() {
    let output = ghrest()
        .arg("nonexistent")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand") || stderr.contains("error:"));
}
