//! Integration tests for the billscan CLI.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const RECEIPT: &str = "\
ABC Store
GSTIN: 29ABCDE1234F1Z5
Ph: 9876543210
Invoice No: INV-2024-001
Date: 12/05/2024
Coffee 50 2 100
Sandwich 80 1 80
Subtotal 180
CGST 9
SGST 9
Total 198";

fn billscan() -> Command {
    Command::cargo_bin("billscan").unwrap()
}

#[test]
fn process_file_outputs_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    billscan()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("29ABCDE1234F1Z5"))
        .stdout(predicate::str::contains("tax_invoice"))
        .stdout(predicate::str::contains("INV-2024-001"))
        .stdout(predicate::str::contains("\"grand_total\":198"));
}

#[test]
fn process_reads_stdin() {
    billscan()
        .arg("process")
        .arg("-")
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains("ABC Store"));
}

#[test]
fn process_missing_file_fails() {
    billscan()
        .arg("process")
        .arg("no-such-file.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn process_text_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    billscan()
        .arg("process")
        .arg(&input)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vendor:"))
        .stdout(predicate::str::contains("Coffee 50 x 2 = 100"));
}

#[test]
fn process_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("receipt.txt");
    let output = dir.path().join("bill.json");
    fs::write(&input, RECEIPT).unwrap();

    billscan()
        .arg("process")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"subtotal\":180"));
}

#[test]
fn process_include_raw_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    billscan()
        .arg("process")
        .arg(&input)
        .arg("--include-raw")
        .assert()
        .success()
        .stdout(predicate::str::contains("raw_text"))
        .stdout(predicate::str::contains("structured_data"));
}

#[test]
fn structured_payload_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("payload.json");
    fs::write(
        &input,
        r#"{"document_type":"restaurant","vendor":{"name":"Hotel Annapurna","gstin":null,"phone":null},"invoice":{"number":null,"date":null},"items":[],"amounts":{"subtotal":null,"tax":null,"grand_total":450,"currency":"INR"}}"#,
    )
    .unwrap();

    billscan()
        .arg("process")
        .arg(&input)
        .arg("--structured")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hotel Annapurna"))
        .stdout(predicate::str::contains("restaurant"));
}

#[test]
fn structured_rejects_invalid_payload() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("payload.json");
    fs::write(&input, "this is not json").unwrap();

    billscan()
        .arg("process")
        .arg(&input)
        .arg("--structured")
        .assert()
        .failure()
        .stderr(predicate::str::contains("structured payload rejected"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    fs::write(dir.path().join("a.txt"), RECEIPT).unwrap();
    fs::write(dir.path().join("b.txt"), "Tea Stall\nChai 10 2 20\nTotal 20").unwrap();

    let pattern = dir.path().join("*.txt");

    billscan()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--summary")
        .assert()
        .success();

    assert!(out_dir.join("a.json").exists());
    assert!(out_dir.join("b.json").exists());

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("tax_invoice"));
    assert!(summary.contains("a.txt"));
}

#[test]
fn batch_fails_on_empty_glob() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("*.txt");

    billscan()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn config_show_prints_defaults() {
    billscan()
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("arithmetic_tolerance"));
}
