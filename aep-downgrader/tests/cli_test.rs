//! CLI integration tests
//!
//! These tests run real invocations of the binary against synthetic
//! project files written to a temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Byte signatures of confirmed versions, keyed by major version.
fn signature(version: u32) -> [u8; 6] {
    match version {
        22 => [0x5d, 0x2b, 0x0b, 0x33, 0x06, 0x3b],
        23 => [0x5e, 0x09, 0x0b, 0x3b, 0x06, 0x37],
        24 => [0x5f, 0x05, 0x0f, 0x02, 0x86, 0x34],
        25 => [0x60, 0x09, 0x0f, 0x0b, 0x06, 0x65],
        26 => [0x61, 0x02, 0x0f, 0x10, 0x06, 0x43],
        other => panic!("no signature for version {other}"),
    }
}

/// Write a synthetic project file authored by `version` into `dir`.
fn write_project(dir: &TempDir, name: &str, version: u32) -> PathBuf {
    let sig = signature(version);
    let mut head_data = [0u8; 20];
    for (i, &byte) in sig.iter().enumerate() {
        head_data[[1, 3, 4, 5, 6, 7][i]] = byte;
    }

    let mut list_data = Vec::new();
    list_data.extend_from_slice(b"Fold");
    list_data.extend_from_slice(b"head");
    list_data.extend_from_slice(&20u32.to_be_bytes());
    list_data.extend_from_slice(&head_data);

    let mut body = Vec::new();
    body.extend_from_slice(b"LIST");
    body.extend_from_slice(&(list_data.len() as u32).to_be_bytes());
    body.extend_from_slice(&list_data);

    let mut buf = Vec::new();
    buf.extend_from_slice(b"RIFX");
    buf.extend_from_slice(&((body.len() + 4) as u32).to_be_bytes());
    buf.extend_from_slice(b"Egg!");
    buf.extend_from_slice(&body);

    let path = dir.path().join(name);
    fs::write(&path, buf).expect("write project file");
    path
}

fn cmd() -> Command {
    Command::cargo_bin("aep-downgrader").expect("binary builds")
}

#[test]
fn info_reports_detected_version_and_targets() {
    let dir = TempDir::new().unwrap();
    let project = write_project(&dir, "comp.aep", 25);

    cmd()
        .arg("info")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("AE 25.x (detected)"))
        .stdout(predicate::str::contains("22, 23, 24"))
        .stdout(predicate::str::contains("LIST"));
}

#[test]
fn info_rejects_non_riff_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("not_a_project.aep");
    fs::write(&path, b"this is not a container at all").unwrap();

    cmd()
        .arg("info")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a valid project file"));
}

#[test]
fn convert_writes_downgraded_copy() {
    let dir = TempDir::new().unwrap();
    let project = write_project(&dir, "comp.aep", 25);

    cmd()
        .arg("convert")
        .arg(&project)
        .args(["--to", "24"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/1 conversions successful"));

    let output = dir.path().join("comp_AE24x.aep");
    let bytes = fs::read(&output).expect("output file exists");
    assert_eq!(bytes[33], 0x5f);
    assert_eq!(bytes[35], 0x05);
}

#[test]
fn batch_convert_isolates_failures() {
    let dir = TempDir::new().unwrap();
    let good = write_project(&dir, "good.aep", 26);
    let bad = dir.path().join("bad.aep");
    fs::write(&bad, b"garbage").unwrap();

    cmd()
        .arg("convert")
        .arg(&good)
        .arg(&bad)
        .args(["--to", "23", "--to", "24"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2/4 conversions successful"));

    assert!(dir.path().join("good_AE23x.aep").exists());
    assert!(dir.path().join("good_AE24x.aep").exists());
}

#[test]
fn convert_refuses_upgrade_target() {
    let dir = TempDir::new().unwrap();
    let project = write_project(&dir, "comp.aep", 23);

    cmd()
        .arg("convert")
        .arg(&project)
        .args(["--to", "26"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("not a downgrade"))
        .stdout(predicate::str::contains("0/1 conversions successful"));
}

#[test]
fn convert_honors_output_dir() {
    let dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let project = write_project(&dir, "comp.aep", 25);

    cmd()
        .arg("convert")
        .arg(&project)
        .args(["--to", "AE 22.x"])
        .arg("--output-dir")
        .arg(out_dir.path())
        .assert()
        .success();

    assert!(out_dir.path().join("comp_AE22x.aep").exists());
}

#[test]
fn diff_reports_signature_difference() {
    let dir = TempDir::new().unwrap();
    let a = write_project(&dir, "v25.aep", 25);
    let b = write_project(&dir, "v24.aep", 24);

    cmd()
        .arg("diff")
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains("content differs"))
        .stdout(predicate::str::contains("difference(s) found"));
}

#[test]
fn diff_of_identical_files_is_clean() {
    let dir = TempDir::new().unwrap();
    let a = write_project(&dir, "a.aep", 24);
    let b = write_project(&dir, "b.aep", 24);

    cmd()
        .arg("diff")
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains("identical at the chunk level"));
}
