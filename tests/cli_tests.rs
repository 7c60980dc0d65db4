//! Binary-level tests: column validation, output formats and config handling, all against a
//! synthetic process table passed through `--proc-root`.

mod common;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;

use common::FakeProc;

/// The binary with `$HOME` pointed at an empty directory so no user config leaks in.
fn lsfd(home: &tempfile::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("lsfd");
    cmd.env("HOME", home.path());
    cmd
}

#[test]
fn unknown_column_fails_before_output() {
    let home = tempfile::tempdir().unwrap();
    let fake = FakeProc::new();
    fake.add_typical_process(1, "init");
    lsfd(&home)
        .arg("--proc-root")
        .arg(fake.root())
        .args(["-o", "BOGUS"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unknown column: BOGUS"));
}

#[test]
fn empty_column_name_fails() {
    let home = tempfile::tempdir().unwrap();
    let fake = FakeProc::new();
    lsfd(&home)
        .arg("--proc-root")
        .arg(fake.root())
        .args(["-o", "pid,,name"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn help_lists_columns() {
    let home = tempfile::tempdir().unwrap();
    lsfd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available output columns:"))
        .stdout(predicate::str::contains("FILE-DESCRIPTOR"))
        .stdout(predicate::str::contains("ASSOCIATION"));
}

#[test]
fn duplicate_columns_are_kept() {
    let home = tempfile::tempdir().unwrap();
    let fake = FakeProc::new();
    fake.add_typical_process(321, "top");
    let out = lsfd(&home)
        .arg("--proc-root")
        .arg(fake.root())
        .args(["-o", "pid,command,pid"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next().map(|l| l.split_whitespace().collect::<Vec<_>>()),
        Some(vec!["PROCESS-ID", "COMMAND", "PROCESS-ID"])
    );
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 7);
    for row in rows {
        assert_eq!(row.split_whitespace().collect::<Vec<_>>(), ["321", "top", "321"]);
    }
}

#[test]
fn empty_table_prints_header_only() {
    let home = tempfile::tempdir().unwrap();
    let fake = FakeProc::new();
    lsfd(&home)
        .arg("--proc-root")
        .arg(fake.root())
        .args(["-o", "command,pid"])
        .assert()
        .success()
        .stdout("COMMAND PROCESS-ID\n");
    lsfd(&home)
        .arg("--proc-root")
        .arg(fake.root())
        .arg("-n")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn json_output_parses() {
    let home = tempfile::tempdir().unwrap();
    let fake = FakeProc::new();
    fake.add_typical_process(55, "less");
    let out = lsfd(&home)
        .arg("--proc-root")
        .arg(fake.root())
        .args(["-J", "-r", "-o", "assoc,fd,pid,command"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let rows = value["lsfd"].as_array().unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0]["association"], "cwd");
    assert!(rows[0]["file-descriptor"].is_null());
    assert_eq!(rows[3]["file-descriptor"], 0);
    assert_eq!(rows[3]["process-id"], 55);
    assert_eq!(rows[3]["command"], "less");
}

#[test]
fn zero_threads_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let fake = FakeProc::new();
    lsfd(&home)
        .arg("--proc-root")
        .arg(fake.root())
        .args(["--threads", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--threads"));
}

#[test]
fn missing_proc_root_fails() {
    let home = tempfile::tempdir().unwrap();
    let fake = FakeProc::new();
    lsfd(&home)
        .arg("--proc-root")
        .arg(fake.root().join("missing"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn config_file_sets_columns_and_cli_overrides() {
    let home = tempfile::tempdir().unwrap();
    let fake = FakeProc::new();
    fake.add_typical_process(9, "vi");
    fs::write(
        home.path().join(".lsfd.toml"),
        "[settings]\noutput = \"command,type\"\nnoheadings = true\n",
    )
    .unwrap();

    lsfd(&home)
        .arg("--proc-root")
        .arg(fake.root())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("vi").and(predicate::str::contains("COMMAND").not()));

    lsfd(&home)
        .arg("--proc-root")
        .arg(fake.root())
        .args(["-o", "pid"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("9\n"));
}

#[test]
fn explicit_missing_config_fails() {
    let home = tempfile::tempdir().unwrap();
    let fake = FakeProc::new();
    lsfd(&home)
        .arg("--proc-root")
        .arg(fake.root())
        .arg("--config")
        .arg(home.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn unknown_config_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let fake = FakeProc::new();
    fs::write(home.path().join(".lsfd.toml"), "[settings]\ncolour = true\n").unwrap();
    lsfd(&home)
        .arg("--proc-root")
        .arg(fake.root())
        .assert()
        .failure();
}

#[test]
fn config_file_json_and_zero_threads() {
    let home = tempfile::tempdir().unwrap();
    let fake = FakeProc::new();
    fake.add_typical_process(4, "cron");
    fs::write(home.path().join(".lsfd.toml"), "[settings]\njson = true\n").unwrap();
    let out = lsfd(&home).arg("--proc-root").arg(fake.root()).output().unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["lsfd"].as_array().map(Vec::len), Some(7));

    fs::write(home.path().join(".lsfd.toml"), "[settings]\nthreads = 0\n").unwrap();
    lsfd(&home)
        .arg("--proc-root")
        .arg(fake.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("threads"));
}
