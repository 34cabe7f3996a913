//! End-to-end tests for the certex binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("certex").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn process_rejects_missing_file() {
    let mut cmd = Command::cargo_bin("certex").unwrap();
    cmd.args(["process", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn batch_rejects_empty_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("*.pdf");

    let mut cmd = Command::cargo_bin("certex").unwrap();
    cmd.args(["batch", pattern.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching PDF"));
}

#[test]
fn batch_writes_summary_and_reports_skipped_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bozuk.pdf"), b"not a pdf").unwrap();

    let pattern = dir.path().join("*.pdf");
    let table = dir.path().join("tablo.csv");
    let records_dir = dir.path().join("kayitlar");

    let mut cmd = Command::cargo_bin("certex").unwrap();
    cmd.args([
        "batch",
        pattern.to_str().unwrap(),
        "-o",
        table.to_str().unwrap(),
        "--output-dir",
        records_dir.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("bozuk.pdf"));

    // unparsable input lands in the skip report, not the table
    let contents = std::fs::read_to_string(&table).unwrap();
    assert!(contents.starts_with("No,"));
    assert_eq!(contents.lines().count(), 1);
    assert!(records_dir.exists());
    assert_eq!(std::fs::read_dir(&records_dir).unwrap().count(), 0);
}

#[test]
fn config_init_writes_json() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");

    let mut cmd = Command::cargo_bin("certex").unwrap();
    cmd.args(["config", "init", "--output", config_path.to_str().unwrap()])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&config_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json["ocr"]["languages"], "tur+eng");
}
