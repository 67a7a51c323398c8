///
/// CLI Integration Tests
///
/// Runs the built `threadlab` binary via `env!("CARGO_BIN_EXE_threadlab")`,
/// feeds it arguments (and stdin for the interactive demo), and asserts on
/// stdout and exit status.
///
/// Run all:  `cargo test --test cli`
/// Run one:  `cargo test --test cli result`
///

use std::io::Write;
use std::process::{Command, Stdio};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_threadlab")
}

fn run(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(bin())
        .args(args)
        .output()
        .expect("failed to run threadlab");
    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
        output.status.success(),
    )
}

#[test]
fn result_prints_expected_sum() {
    let (stdout, _, ok) = run(&["result"]);
    assert!(ok);
    assert!(stdout.contains("[Main] waiting for result..."), "stdout: {stdout}");
    assert!(stdout.contains("result=5000050000"), "stdout: {stdout}");
}

#[test]
fn result_failure_prints_error_line_and_exits_cleanly() {
    let (stdout, _, ok) = run(&["result", "--fail"]);
    assert!(ok, "domain failure is not an infrastructure failure");
    assert!(stdout.contains("error=worker failed intentionally"), "stdout: {stdout}");
    assert!(!stdout.contains("result="), "stdout: {stdout}");
}

#[test]
fn result_negative_input_is_a_domain_error() {
    let (stdout, _, ok) = run(&["result", "--n=-5"]);
    assert!(ok);
    assert!(stdout.contains("error=input must be >= 0, got -5"), "stdout: {stdout}");
}

#[test]
fn accumulate_reports_matching_totals() {
    let (stdout, _, ok) = run(&["accumulate", "--workers", "4", "--limit", "1000"]);
    assert!(ok);
    assert!(stdout.contains("expected=2002000"), "stdout: {stdout}");
    assert!(stdout.contains("total=2002000"), "stdout: {stdout}");
}

#[test]
fn spawn_joins_every_worker() {
    let (stdout, _, ok) = run(&["spawn", "--sleep-ms", "10"]);
    assert!(ok);
    assert!(stdout.contains("[sleeper-1] created."), "stdout: {stdout}");
    assert!(stdout.contains("[sleeper-2] created."), "stdout: {stdout}");
    assert!(stdout.contains("[sleeper-1] joined."), "stdout: {stdout}");
    assert!(stdout.contains("[sleeper-2] joined."), "stdout: {stdout}");
}

#[test]
fn ticktock_quits_on_q() {
    let mut child = Command::new(bin())
        .args(["ticktock", "--tick-ms", "20", "--poll-ms", "5"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to start threadlab ticktock");

    child
        .stdin
        .as_mut()
        .expect("stdin piped")
        .write_all(b"q\n")
        .expect("failed to write to stdin");

    let output = child.wait_with_output().expect("ticktock did not exit");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[Main] Quit"), "stdout: {stdout}");
}

#[test]
fn config_file_overrides_demo_defaults() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let path = dir.path().join("threadlab.toml");
    std::fs::write(&path, "sum_n = 10\n").expect("failed to write config");

    let (stdout, _, ok) = run(&["--config", path.to_str().unwrap(), "result"]);
    assert!(ok);
    assert!(stdout.contains("result=55"), "stdout: {stdout}");
}

#[test]
fn malformed_config_exits_nonzero() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let path = dir.path().join("threadlab.toml");
    std::fs::write(&path, "sum_n = \"ten\"\n").expect("failed to write config");

    let (_, stderr, ok) = run(&["--config", path.to_str().unwrap(), "result"]);
    assert!(!ok);
    assert!(stderr.contains("Invalid config"), "stderr: {stderr}");
}
