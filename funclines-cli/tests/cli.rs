use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_funclines")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/../tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

// -- scan --

#[test]
fn scan_file_text_table() {
    cmd()
        .args(["scan", "--no-progress"])
        .arg(fixture_path("simple.c"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("LINES"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("main"))
        .stdout(predicate::str::contains("2 function(s), 0 over the limit"));
}

#[test]
fn scan_json_output() {
    let assert = cmd()
        .args(["scan", "--format", "json"])
        .arg(fixture_path("long.c"))
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "sum");
    assert_eq!(entries[0]["line_count"], 26);
    assert_eq!(entries[0]["severity"], "warning");
    assert_eq!(entries[0]["anchor_line"], 30);
}

#[test]
fn scan_annotations_output() {
    let assert = cmd()
        .args(["scan", "--format", "annotations"])
        .arg(fixture_path("simple.c"))
        .assert()
        .success();

    let output = stdout_of(&assert);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("simple.c:7: —— FUNCTION LINES : 1 ——"));
    assert!(lines[1].ends_with("simple.c:14: —— FUNCTION LINES : 3 ——"));
}

#[test]
fn scan_stdin() {
    let assert = cmd()
        .args(["scan", "-", "--format", "annotations", "--max-lines", "1"])
        .write_stdin("f(a)\n{\n  x;\n  y;\n}\n")
        .assert()
        .success();

    assert_eq!(stdout_of(&assert), "<stdin>:6: ⚠⚠ FUNCTION LINES : 2 ⚠⚠\n");
}

#[test]
fn scan_lenient_braces_flag() {
    cmd()
        .args(["scan", "--format", "json"])
        .arg(fixture_path("kr_style.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains("area").not());

    cmd()
        .args(["scan", "--format", "json", "--lenient-braces"])
        .arg(fixture_path("kr_style.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"area\""));
}

#[test]
fn scan_directory_warnings_only() {
    let assert = cmd()
        .args(["scan", "--no-progress", "--format", "json", "--warnings-only"])
        .arg(fixture_path(""))
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["sum"]);
}

#[test]
fn scan_fail_on_warning_exit_code() {
    cmd()
        .args(["scan", "--fail-on-warning"])
        .arg(fixture_path("long.c"))
        .assert()
        .code(1);

    cmd()
        .args(["scan", "--fail-on-warning"])
        .arg(fixture_path("simple.c"))
        .assert()
        .success();
}

#[test]
fn scan_missing_path_fails() {
    cmd()
        .args(["scan", "/definitely/not/here.c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path does not exist"));
}

#[test]
fn scan_rejects_zero_max_lines() {
    cmd()
        .args(["scan", "--max-lines", "0"])
        .arg(fixture_path("simple.c"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--max-lines must be at least 1"));
}

#[test]
fn scan_uses_discovered_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".funclinesrc.json"), r#"{"max_lines": 1}"#).unwrap();
    std::fs::write(dir.path().join("a.c"), "f()\n{\n  a;\n  b;\n}\n").unwrap();

    cmd()
        .args(["scan", "--format", "annotations"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("⚠⚠ FUNCTION LINES : 2 ⚠⚠"));
}

#[test]
fn scan_invalid_color_falls_back() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("colors.json");
    std::fs::write(&config, r#"{"warning_color": "not-a-color"}"#).unwrap();

    cmd()
        .args(["scan", "--config"])
        .arg(&config)
        .arg(fixture_path("simple.c"))
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid color"));
}

// -- config --

#[test]
fn config_validate_without_file() {
    let dir = TempDir::new().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No config file found"));
}

#[test]
fn config_validate_good_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("funclines.config.json"),
        r##"{"max_lines": 40, "warning_color": "#ff8800"}"##,
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config valid"));
}

#[test]
fn config_validate_bad_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"max_lines": 0}"#).unwrap();

    cmd()
        .args(["config", "validate", "--path"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config validation failed"));
}

#[test]
fn config_show_defaults() {
    let dir = TempDir::new().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_lines: 25"))
        .stdout(predicate::str::contains("neutral: gray"))
        .stdout(predicate::str::contains("warning: red"));
}
