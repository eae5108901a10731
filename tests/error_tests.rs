//! Error paths exercised against the built binary

use std::process::Command;

fn tapedeck_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tapedeck"))
}

#[test]
fn config_get_rejects_unknown_key() {
    let output = tapedeck_bin()
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("unknown") || stderr.contains("Valid"),
        "Unknown key should be rejected, stderr: {}",
        stderr
    );
}

#[test]
fn config_set_rejects_unknown_key() {
    let output = tapedeck_bin()
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("unknown") || stderr.contains("Valid"),
        "Unknown key should be rejected, stderr: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_quality() {
    let output = tapedeck_bin()
        .args(["config", "set", "quality", "lossless"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid") || stderr.contains("invalid") || stderr.contains("quality"),
        "Expected error about invalid quality, got: {}",
        stderr
    );
}

#[test]
fn config_set_rejects_bad_boolean() {
    let output = tapedeck_bin()
        .args(["config", "set", "notify", "maybe"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("true") || stderr.contains("false") || stderr.contains("boolean"),
        "Bad boolean should be rejected, stderr: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_interval() {
    let output = tapedeck_bin()
        .args(["config", "set", "keep_alive_interval", "soon"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("whole number") || stderr.contains("seconds"),
        "Expected error about invalid interval, got: {}",
        stderr
    );
}

#[test]
fn config_set_zero_interval() {
    let output = tapedeck_bin()
        .args(["config", "set", "keep_alive_interval", "0"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("at least 1 second"),
        "Expected error about zero interval, got: {}",
        stderr
    );
}

#[test]
fn config_list_without_config_file() {
    // Listing must not require the config file to exist
    let output = tapedeck_bin()
        .args(["config", "list"])
        .env("HOME", "/nonexistent")
        .env("XDG_CONFIG_HOME", "/nonexistent")
        .output()
        .expect("Failed to execute command");

    // Unset keys render as "(not set)"
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("not set") || stdout.contains("output_dir"),
        "config list should print the keys, stdout: {}",
        stdout
    );
}
