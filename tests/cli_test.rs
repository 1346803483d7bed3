//! Tests that drive the `parley` binary as a child process.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn sample_intents() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources/intents.json")
}

fn run(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_parley"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_chat_keeps_serving_after_invalid_utf8() {
    let intents = sample_intents();
    let output = run(
        &[
            "-q",
            "chat",
            "-i",
            intents.to_str().unwrap(),
            "--classifier",
            "keyword",
            "--seed",
            "1",
        ],
        b"hello\n\xff\xfe bad\nbye\n",
    );

    assert!(output.status.success());
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["intent"], "greeting");
    assert_eq!(lines[1]["error"]["code"], "io_error");
    assert_eq!(lines[2]["intent"], "farewell");
}

#[test]
fn test_train_missing_catalog_prints_error_object() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    let model = dir.path().join("model.bin");

    let output = run(
        &[
            "-q",
            "train",
            "-i",
            missing.to_str().unwrap(),
            "-m",
            model.to_str().unwrap(),
        ],
        b"",
    );

    assert_eq!(output.status.code(), Some(1));
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["error"]["code"], "catalog_load_error");
    assert!(!model.exists());
}

#[test]
fn test_train_empty_catalog_prints_error_object() {
    let dir = TempDir::new().unwrap();
    let intents = dir.path().join("intents.json");
    std::fs::write(&intents, r#"{"intents": []}"#).unwrap();
    let model = dir.path().join("model.bin");

    let output = run(
        &[
            "-q",
            "train",
            "-i",
            intents.to_str().unwrap(),
            "-m",
            model.to_str().unwrap(),
        ],
        b"",
    );

    assert_eq!(output.status.code(), Some(1));
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["error"]["code"], "empty_catalog_error");
}
