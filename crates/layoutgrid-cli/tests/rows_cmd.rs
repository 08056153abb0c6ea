//! Integration tests for the `rows` subcommand.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cmd() -> Command {
    Command::cargo_bin("layoutgrid").unwrap()
}

fn write_blocks(json: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    f.write_all(json.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

const INVOICE: &str = r#"[
    {"content": "Invoice", "type": "heading", "level": 1,
     "bbox": {"left": 0, "top": 0, "right": 120, "bottom": 30}},
    {"content": "ACME", "bbox": {"left": 100, "top": 50, "right": 180, "bottom": 70}},
    {"content": "Customer:", "bbox": {"left": 0, "top": 50, "right": 80, "bottom": 70}},
    {"content": "Total:", "bbox": {"left": 0, "top": 100, "right": 60, "bottom": 120}},
    {"content": "$10", "bbox": {"left": 80, "top": 100, "right": 120, "bottom": 120}}
]"#;

#[test]
fn rows_text_lists_lines_top_to_bottom() {
    let f = write_blocks(INVOICE);
    cmd()
        .arg("rows")
        .arg(f.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Page 1 ---"))
        .stdout(predicate::str::contains("Customer: | ACME"))
        .stdout(predicate::str::contains("Total: | $10"));
}

#[test]
fn rows_json_structure() {
    let f = write_blocks(INVOICE);
    let output = cmd()
        .arg("rows")
        .arg(f.path())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let pages: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0]["page"], 1);

    let rows = pages[0]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["items"], serde_json::json!(["Invoice"]));
    assert_eq!(rows[1]["items"], serde_json::json!(["Customer:", "ACME"]));
    assert_eq!(rows[2]["items"], serde_json::json!(["Total:", "$10"]));
    assert_eq!(rows[2]["top"], 100.0);
}

#[test]
fn rows_unknown_page_fails() {
    let f = write_blocks(INVOICE);
    cmd()
        .arg("rows")
        .arg(f.path())
        .args(["--pages", "2-3"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
