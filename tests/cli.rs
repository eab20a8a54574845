use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wattbook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wattbook").unwrap();
    cmd.env("WATTBOOK_DATA_DIR", dir.path()).env_remove("RUST_LOG");
    cmd
}

fn add_client(dir: &TempDir, name: &str, consumption: &str) {
    wattbook(dir)
        .args(["client", "add", name, "1 Grid Rd", "555-0100", "-c", consumption, "-r", "0.15"])
        .assert()
        .success();
}

#[test]
fn client_add_then_list() {
    let dir = TempDir::new().unwrap();

    wattbook(&dir)
        .args(["client", "add", "Ada Lovelace", "12 Square", "555-0100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created client: Ada Lovelace"))
        .stdout(predicate::str::contains("ID: 1"));

    wattbook(&dir)
        .args(["client", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace"));

    let len = fs::metadata(dir.path().join("data").join("clients.dat"))
        .unwrap()
        .len();
    assert_eq!(len, 200);
}

#[test]
fn empty_list() {
    let dir = TempDir::new().unwrap();
    wattbook(&dir)
        .args(["client", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No clients found."));
}

#[test]
fn negative_consumption_is_rejected() {
    let dir = TempDir::new().unwrap();
    wattbook(&dir)
        .args(["client", "add", "Ada", "addr", "555", "-c", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    assert!(!dir.path().join("data").join("clients.dat").exists());
}

#[test]
fn generate_bill_updates_client() {
    let dir = TempDir::new().unwrap();
    add_client(&dir, "Ada", "0");

    wattbook(&dir)
        .args(["bill", "generate", "1", "120", "0.15", "--due", "2024-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated bill #1"))
        .stdout(predicate::str::contains("Amount: 18.00"));

    wattbook(&dir)
        .args(["client", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("18.00"));

    wattbook(&dir)
        .args(["bill", "pay", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked as paid"));
}

#[test]
fn generate_for_unknown_client_fails() {
    let dir = TempDir::new().unwrap();
    wattbook(&dir)
        .args(["bill", "generate", "7", "1", "1", "--due", "2024-01-15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Client not found: 7"));

    assert!(!dir.path().join("data").join("billing.dat").exists());
}

#[test]
fn backup_then_restore() {
    let dir = TempDir::new().unwrap();

    // Nothing to copy yet
    wattbook(&dir).arg("backup").assert().failure();

    add_client(&dir, "Ada", "10");
    wattbook(&dir)
        .arg("backup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup completed"));

    let clients = dir.path().join("data").join("clients.dat");
    let saved = fs::read(&clients).unwrap();
    add_client(&dir, "Bob", "20");

    wattbook(&dir)
        .args(["restore", "--check"])
        .assert()
        .success();
    wattbook(&dir)
        .arg("restore")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restore completed"));

    assert_eq!(fs::read(&clients).unwrap(), saved);
}

#[test]
fn report_totals() {
    let dir = TempDir::new().unwrap();
    add_client(&dir, "Ada", "100");
    add_client(&dir, "Bob", "50");

    wattbook(&dir)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("Billing Totals"))
        .stdout(predicate::str::contains("150.00"));

    wattbook(&dir)
        .args(["report", "--csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("metric,value"))
        .stdout(predicate::str::contains("client_count,2"));
}

#[test]
fn sort_rewrites_store() {
    let dir = TempDir::new().unwrap();
    add_client(&dir, "Ada", "100");
    add_client(&dir, "Bob", "50");

    wattbook(&dir)
        .args(["client", "sort", "consumption"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sorted 2 clients by consumption."));

    let output = wattbook(&dir)
        .args(["export", "clients", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = String::from_utf8(output.stdout).unwrap();
    assert!(json.find("Bob").unwrap() < json.find("Ada").unwrap());
}

#[test]
fn audit_records_mutations() {
    let dir = TempDir::new().unwrap();
    add_client(&dir, "Ada", "1");

    wattbook(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("client #1 added: Ada"));
}

#[test]
fn menu_exits_on_zero() {
    let dir = TempDir::new().unwrap();
    wattbook(&dir)
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== WattBook ==="));
}

#[test]
fn menu_adds_client() {
    let dir = TempDir::new().unwrap();
    wattbook(&dir)
        .write_stdin("1\n1\nAda\n1 Grid Rd\n555\n120\n0.15\n0\n0\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Client added with ID 1."));

    wattbook(&dir)
        .args(["client", "find", "Ada"])
        .assert()
        .success();
}
