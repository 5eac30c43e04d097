// Smoke tests for the compiled binary's headless surface. The interactive
// TUI needs a real tty, so these stick to the flag-driven paths plus the
// tty guard itself.

use assert_cmd::Command;

#[test]
fn export_writes_a_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.json");

    Command::cargo_bin("typro")
        .unwrap()
        .args(["--export", path.to_str().unwrap()])
        .assert()
        .success();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.get("stats").is_some());
    assert!(value.get("settings").is_some());
    assert!(value.get("exportDate").is_some());
}

#[test]
fn refuses_to_run_the_tui_without_a_tty() {
    // Under the test harness stdin is a pipe, so the interactive path bails
    Command::cargo_bin("typro").unwrap().assert().failure();
}

#[test]
fn help_lists_the_headless_flags() {
    let assert = Command::cargo_bin("typro")
        .unwrap()
        .arg("--help")
        .assert()
        .success();

    let help = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(help.contains("--export"));
    assert!(help.contains("--reset-stats"));
    assert!(help.contains("--clear-data"));
    assert!(help.contains("--stop-on-error"));
}
