use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use serde_json::{Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

fn questionnaire() -> Command {
    let mut cmd = Command::cargo_bin("questionnaire").expect("binary");
    cmd.env_remove("QUESTIONNAIRE_SPEC");
    cmd
}

fn script_file(steps: Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{}", steps).expect("write script");
    file
}

#[test]
fn demo_runs_from_script() {
    let script = script_file(json!(["saturday", "morning", "watch footy match", "done..."]));
    let output = questionnaire()
        .args(["run", "--script"])
        .arg(script.path())
        .output()
        .expect("run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(
        stdout.trim(),
        r#"{"day":"saturday","time":"morning","activities":["watch footy match"]}"#
    );
}

#[test]
fn scripted_back_navigation_revises_answers() {
    let temp = TempDir::new().expect("temp dir");
    let spec = temp.child("pets.json");
    spec.write_str(
        &json!({
            "questions": [
                { "key": "pet", "options": ["cat", "dog"] },
                {
                    "key": "walks",
                    "options": ["one", "two"],
                    "condition": { "keys": ["pet"], "vals": ["dog"] }
                }
            ]
        })
        .to_string(),
    )
    .expect("write spec");
    let script = temp.child("script.json");
    script
        .write_str(r#"["dog", "<back>", "cat"]"#)
        .expect("write script");

    let output = questionnaire()
        .args(["run", "--pretty", "--spec"])
        .arg(spec.path())
        .arg("--script")
        .arg(script.path())
        .output()
        .expect("run");
    assert!(output.status.success());
    let answers: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(answers, json!({ "pet": "cat" }));
}

#[test]
fn short_script_fails() {
    let script = script_file(json!(["monday"]));
    questionnaire()
        .args(["run", "--script"])
        .arg(script.path())
        .assert()
        .failure();
}

#[test]
fn run_without_terminal_requires_script() {
    questionnaire().arg("run").assert().failure();
}

#[test]
fn check_accepts_demo() {
    let output = questionnaire().arg("check").output().expect("check");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("Check result: valid (3 keys, 5 variants)"));
}

#[test]
fn check_reports_forward_references() {
    let temp = TempDir::new().expect("temp dir");
    let spec = temp.child("forward.json");
    spec.write_str(
        &json!({
            "questions": [
                {
                    "key": "dessert",
                    "options": ["cake"],
                    "condition": { "keys": ["meal"], "vals": ["dinner"] }
                },
                { "key": "meal", "options": ["lunch", "dinner"] }
            ]
        })
        .to_string(),
    )
    .expect("write spec");

    let output = questionnaire()
        .args(["check", "--spec"])
        .arg(spec.path())
        .output()
        .expect("check");
    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("dessert (variant 0) depends on 'meal'"));
}

#[test]
fn schema_prints_json() {
    let output = questionnaire().arg("schema").output().expect("schema");
    assert!(output.status.success());
    let schema: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert!(schema["properties"]["questions"].is_object());
}
