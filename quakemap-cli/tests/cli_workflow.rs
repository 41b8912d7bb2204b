//! Integration tests for the quakemap binary.
//!
//! Each test runs the compiled CLI with `HOME` pointed at a temporary
//! directory, so the config file and log stay inside the test sandbox.
//! Nothing here touches the network.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_cli(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quakemap"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command")
}

/// Assert a command succeeded.
fn assert_success(output: &Output, context: &str) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!(
            "{} failed:\nstdout: {}\nstderr: {}",
            context, stdout, stderr
        );
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_legend_prints_scale() {
    let home = TempDir::new().unwrap();
    let output = run_cli(home.path(), &["legend"]);
    assert_success(&output, "legend");

    let text = stdout(&output);
    assert!(text.contains("Magnitude"));
    assert!(text.contains("#ADFF2F"));
    assert!(text.contains("5+"));
}

#[test]
fn test_config_path_uses_home() {
    let home = TempDir::new().unwrap();
    let output = run_cli(home.path(), &["config", "path"]);
    assert_success(&output, "config path");

    let expected = home.path().join(".quakemap").join("config.ini");
    assert_eq!(stdout(&output).trim(), expected.display().to_string());
}

#[test]
fn test_config_set_get_and_list() {
    let home = TempDir::new().unwrap();

    let output = run_cli(home.path(), &["config", "set", "map.default_base", "outdoors"]);
    assert_success(&output, "config set");
    assert!(home.path().join(".quakemap/config.ini").exists());

    let output = run_cli(home.path(), &["config", "get", "map.default_base"]);
    assert_success(&output, "config get");
    assert_eq!(stdout(&output).trim(), "outdoors");

    let output = run_cli(home.path(), &["config", "get", "mapbox.access_token"]);
    assert_success(&output, "config get token");
    assert_eq!(stdout(&output).trim(), "(not set)");

    let output = run_cli(home.path(), &["config", "list"]);
    assert_success(&output, "config list");
    let text = stdout(&output);
    assert!(text.contains("[markers]"));
    assert!(text.contains("default_base = outdoors"));
}

#[test]
fn test_config_set_rejects_invalid_value() {
    let home = TempDir::new().unwrap();
    let output = run_cli(home.path(), &["config", "set", "map.zoom", "40"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("map.zoom"));
    assert!(!home.path().join(".quakemap/config.ini").exists());
}

#[test]
fn test_config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    let output = run_cli(home.path(), &["config", "get", "map.colour"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown configuration key"));
}

#[test]
fn test_render_without_token_fails_before_fetching() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("map.html");
    let output = run_cli(
        home.path(),
        &["render", "--output", out.to_str().unwrap()],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("access token"), "stderr: {stderr}");
    assert!(!out.exists());
}
