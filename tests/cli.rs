//! Integration tests for the confluence2md CLI.

#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_confluence2md"));
    cmd.env_remove("CONFLUENCE2MD_OUT_DIR");
    cmd
}

const EXPORT: &str = r#"{
    "results": [
        {"id": "1", "title": "Home Page", "space": {"key": "DOC"},
         "body": {"storage": {"value": "<h1>Welcome</h1><p>Start here.</p>", "representation": "storage"}}},
        {"id": "2", "title": "Setup", "space": {"key": "DOC"},
         "body": {"storage": {"value": "<ul><li>Install</li></ul>", "representation": "storage"}}}
    ],
    "size": 2
}"#;

#[test]
fn test_basic_stdin() {
    cli()
        .write_stdin("<h1>Title</h1><p>Content</p>")
        .assert()
        .success()
        .stdout("# Title\n\nContent\n\n");
}

#[test]
fn test_dash_reads_stdin() {
    cli()
        .arg("-")
        .write_stdin("<p>Dash test</p>")
        .assert()
        .success()
        .stdout("Dash test\n\n");
}

#[test]
fn test_file_input_and_output() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("page.xml");
    let output_path = temp_dir.path().join("page.md");
    fs::write(&input_path, "<p>Test <em>content</em></p>").unwrap();

    cli()
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&output_path).unwrap(), "Test *content*\n\n");
}

#[test]
fn test_missing_input_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    cli()
        .arg(temp_dir.path().join("missing.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.xml"));
}

#[test]
fn test_batch_writes_one_file_per_page() {
    let temp_dir = TempDir::new().unwrap();
    let export = temp_dir.path().join("export.json");
    let out_dir = temp_dir.path().join("out");
    fs::write(&export, EXPORT).unwrap();

    cli()
        .arg("--pages")
        .arg(&export)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(out_dir.join("doc_home_page.md")).unwrap(),
        "# Welcome\n\nStart here.\n\n"
    );
    assert_eq!(
        fs::read_to_string(out_dir.join("doc_setup.md")).unwrap(),
        "* Install\n\n"
    );
}

#[test]
fn test_batch_out_dir_from_env() {
    let temp_dir = TempDir::new().unwrap();
    let export = temp_dir.path().join("export.json");
    let out_dir = temp_dir.path().join("from-env");
    fs::write(&export, EXPORT).unwrap();

    cli()
        .env("CONFLUENCE2MD_OUT_DIR", &out_dir)
        .arg("--pages")
        .arg(&export)
        .assert()
        .success();

    assert!(out_dir.join("doc_setup.md").exists());
}

#[test]
fn test_batch_continues_after_page_failure() {
    let temp_dir = TempDir::new().unwrap();
    let export = temp_dir.path().join("export.json");
    let out_dir = temp_dir.path().join("out");
    fs::write(&export, EXPORT).unwrap();
    // A directory where the first page's file should go makes that write fail.
    fs::create_dir_all(out_dir.join("doc_home_page.md")).unwrap();

    cli()
        .arg("--pages")
        .arg(&export)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Home Page"));

    assert_eq!(
        fs::read_to_string(out_dir.join("doc_setup.md")).unwrap(),
        "* Install\n\n"
    );
}

#[test]
fn test_batch_rejects_invalid_export() {
    let temp_dir = TempDir::new().unwrap();
    let export = temp_dir.path().join("export.json");
    fs::write(&export, "{ not json").unwrap();

    cli()
        .arg("--pages")
        .arg(&export)
        .arg("--out-dir")
        .arg(temp_dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid page export"));
}

#[test]
fn test_input_conflicts_with_pages() {
    cli()
        .arg("page.xml")
        .arg("--pages")
        .arg("export.json")
        .assert()
        .failure();
}
