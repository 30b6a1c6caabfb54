//! Process-level CLI contract
//!
//! Spawns the built binary and asserts the stdout/stderr envelopes and exit
//! codes: usage errors exit non-zero with a JSON payload on stdout, while
//! total exhaustion keeps exit 0 (stderr carries the diagnostic) unless
//! `--strict` is passed.

use std::process::{Command, Output};

use serde_json::Value;

fn run(args: &[&str]) -> Output {
    // Point every strategy at a closed local port so runs fail fast and
    // never touch the network; ambient endpoint config is scrubbed.
    // Logs share stderr with the diagnostic payload, so they are switched
    // off to keep stderr parseable as a single JSON object.
    Command::new(env!("CARGO_BIN_EXE_tweet-harvest"))
        .args(args)
        .args(["--log-level", "off"])
        .env_remove("MIRROR_API_URL")
        .env_remove("SCRAPE_API_URL")
        .env_remove("RUST_LOG")
        .env("MIRROR_INSTANCES", "http://127.0.0.1:1")
        .env("REQUEST_TIMEOUT_SECS", "1")
        .output()
        .expect("binary should spawn")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be one JSON object")
}

fn stderr_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stderr).expect("stderr should be one JSON object")
}

#[test]
fn missing_username_prints_usage_on_stdout_and_exits_nonzero() {
    let output = run(&[]);

    assert!(!output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["error"], true);
    assert_eq!(payload["message"], "Usage: tweet-harvest <username> [limit]");
    assert!(payload.get("username").is_none());
}

#[test]
fn total_exhaustion_exits_zero_with_dual_reporting() {
    let output = run(&["jack", "3"]);

    assert!(output.status.success(), "default mode keeps exit 0");

    let report = stdout_json(&output);
    assert_eq!(report["success"], true);
    assert_eq!(report["username"], "jack");
    assert_eq!(report["count"], 0);
    assert_eq!(report["tweets"].as_array().unwrap().len(), 0);

    let diagnostic = stderr_json(&output);
    assert_eq!(diagnostic["error"], true);
    assert_eq!(diagnostic["username"], "jack");
    assert!(diagnostic["message"]
        .as_str()
        .unwrap()
        .starts_with("html_mirror:"));
}

#[test]
fn strict_mode_exits_nonzero_on_total_exhaustion() {
    let output = run(&["jack", "3", "--strict"]);

    assert!(!output.status.success());

    // stdout still carries the empty run report
    let report = stdout_json(&output);
    assert_eq!(report["success"], true);
    assert_eq!(report["count"], 0);
}
