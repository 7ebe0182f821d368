//! CLI integration tests

use std::process::Command;

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "nlh-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Kubernetes cluster"),
        "Should show app description"
    );
    assert!(stdout.contains("collect"), "Should show collect command");
    assert!(stdout.contains("nodes"), "Should show nodes command");
    assert!(stdout.contains("--format"), "Should show format option");
    assert!(
        stdout.contains("--kubeconfig"),
        "Should show kubeconfig option"
    );
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = Command::new("cargo")
        .args(["run", "-p", "nlh-cli", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("nlh"), "Should show binary name");
}

/// Test collect subcommand help
#[test]
fn test_collect_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "nlh-cli", "--", "collect", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Collect help should succeed");
    assert!(
        stdout.contains("--namespace"),
        "Should show namespace option"
    );
    assert!(
        stdout.contains("--container-path"),
        "Should show container-path option"
    );
    assert!(
        stdout.contains("--destination"),
        "Should show destination option"
    );
    assert!(
        stdout.contains("--concurrency"),
        "Should show concurrency option"
    );
    assert!(
        stdout.contains("--timeout-secs"),
        "Should show timeout option"
    );
    assert!(
        stdout.contains("--refresh-workloads"),
        "Should show refresh-workloads option"
    );
}

/// Test nodes subcommand help
#[test]
fn test_nodes_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "nlh-cli", "--", "nodes", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Nodes help should succeed");
}

/// Test format option values
#[test]
fn test_format_option() {
    let output = Command::new("cargo")
        .args(["run", "-p", "nlh-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("table"), "Should show table format");
    assert!(stdout.contains("json"), "Should show json format");
}

/// Test refresh-workloads option values
#[test]
fn test_refresh_workloads_values() {
    let output = Command::new("cargo")
        .args(["run", "-p", "nlh-cli", "--", "collect", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("per-node"), "Should show per-node mode");
    assert!(stdout.contains("once"), "Should show once mode");
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = Command::new("cargo")
        .args(["run", "-p", "nlh-cli", "--", "invalid-command"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid"),
        "Should show error message"
    );
}

/// Test invalid option value error handling
#[test]
fn test_invalid_refresh_mode() {
    let output = Command::new("cargo")
        .args([
            "run",
            "-p",
            "nlh-cli",
            "--",
            "collect",
            "--refresh-workloads",
            "sometimes",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Invalid mode should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid value") || stderr.contains("error"),
        "Should show error about invalid value"
    );
}
