//! Integration tests for the CLI interface
//!
//! Runs the binary against manifests and documents in temporary directories

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write documents into `dir` and a manifest listing them
fn setup(dir: &Path, fragment_size: usize, documents: &[(&str, &str)]) -> PathBuf {
    let mut manifest = format!("{}\n{}\n", fragment_size, documents.len());
    for (name, text) in documents {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        manifest.push_str(&format!("{}\n", path.display()));
    }
    let manifest_path = dir.join("manifest.txt");
    fs::write(&manifest_path, manifest).unwrap();
    manifest_path
}

fn prefix(dir: &TempDir) -> String {
    format!("{}/", dir.path().display())
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::cargo_bin("wordrank").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("<WORKERS>"));
}

#[test]
fn test_cli_missing_arguments() {
    let mut cmd = Command::cargo_bin("wordrank").unwrap();
    cmd.arg("4").assert().failure().code(2);
}

#[test]
fn test_valid_run_writes_ranked_csv() {
    let dir = TempDir::new().unwrap();
    let manifest = setup(
        dir.path(),
        4,
        &[
            ("short.txt", "a bb a"),
            ("example.txt", "foo bar bazzz"),
            ("empty.txt", ""),
        ],
    );
    let output = dir.path().join("out.csv");

    let mut cmd = Command::cargo_bin("wordrank").unwrap();
    cmd.args(["--strip-prefix", prefix(&dir).as_str(), "3"])
        .arg(&manifest)
        .arg(&output)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "example.txt,4.67,5,1\nshort.txt,1.33,2,1\nempty.txt,0.00,0,0\n"
    );
}

#[test]
fn test_worker_count_does_not_change_output() {
    let dir = TempDir::new().unwrap();
    let text = "the quick brown fox jumps over the lazy dog, again and again.";
    let manifest = setup(dir.path(), 5, &[("a.txt", text), ("b.txt", "lorem ipsum dolor")]);

    let mut outputs = Vec::new();
    for workers in ["1", "2", "7"] {
        let output = dir.path().join(format!("out{}.csv", workers));
        Command::cargo_bin("wordrank")
            .unwrap()
            .arg(workers)
            .arg(&manifest)
            .arg(&output)
            .assert()
            .success();
        outputs.push(fs::read_to_string(&output).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], outputs[2]);
}

#[test]
fn test_malformed_manifest_fails() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("manifest.txt");
    fs::write(&manifest, "four\n1\na.txt\n").unwrap();
    let output = dir.path().join("out.csv");

    let mut cmd = Command::cargo_bin("wordrank").unwrap();
    cmd.arg("2")
        .arg(&manifest)
        .arg(&output)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("fragment size"));
    assert!(!output.exists());
}

#[test]
fn test_zero_workers_fails() {
    let dir = TempDir::new().unwrap();
    let manifest = setup(dir.path(), 4, &[("a.txt", "abc")]);

    let mut cmd = Command::cargo_bin("wordrank").unwrap();
    cmd.arg("0")
        .arg(&manifest)
        .arg(dir.path().join("out.csv"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("worker count"));
}

#[test]
fn test_missing_document_lenient_and_strict() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let manifest = dir.path().join("manifest.txt");
    fs::write(&manifest, format!("4\n1\n{}\n", missing.display())).unwrap();
    let output = dir.path().join("out.csv");

    Command::cargo_bin("wordrank")
        .unwrap()
        .args(["--strip-prefix", prefix(&dir).as_str(), "1"])
        .arg(&manifest)
        .arg(&output)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&output).unwrap(), "missing.txt,0.00,0,0\n");

    fs::remove_file(&output).unwrap();
    Command::cargo_bin("wordrank")
        .unwrap()
        .args(["--strict", "1"])
        .arg(&manifest)
        .arg(&output)
        .assert()
        .failure()
        .code(3);
    assert!(!output.exists());
}

#[test]
fn test_word_too_long_strict_from_environment() {
    let dir = TempDir::new().unwrap();
    let manifest = setup(dir.path(), 2, &[("long.txt", "a abcdefghij b")]);
    let output = dir.path().join("out.csv");

    Command::cargo_bin("wordrank")
        .unwrap()
        .env("WORDRANK_STRICT", "true")
        .arg("2")
        .arg(&manifest)
        .arg(&output)
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("scratch window"));

    Command::cargo_bin("wordrank")
        .unwrap()
        .env("WORDRANK_STRICT", "false")
        .arg("2")
        .arg(&manifest)
        .arg(&output)
        .assert()
        .success();
    assert!(output.exists());
}

#[test]
fn test_config_file_separators() {
    let dir = TempDir::new().unwrap();
    let manifest = setup(dir.path(), 8, &[("dots.txt", "ab.cd ef")]);
    let config = dir.path().join("wordrank.toml");
    fs::write(
        &config,
        format!("separators = \" \"\nstrip_prefix = \"{}\"\n", prefix(&dir)),
    )
    .unwrap();
    let output = dir.path().join("out.csv");

    Command::cargo_bin("wordrank")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("1")
        .arg(&manifest)
        .arg(&output)
        .assert()
        .success();

    // "ab.cd" is one five-byte word when '.' is not a separator
    assert_eq!(fs::read_to_string(&output).unwrap(), "dots.txt,5.00,5,1\n");
}

#[test]
fn test_huge_fragment_size_on_small_document() {
    let dir = TempDir::new().unwrap();
    let manifest = setup(dir.path(), 1 << 40, &[("doc.txt", "hello world ok")]);
    let output = dir.path().join("out.csv");

    Command::cargo_bin("wordrank")
        .unwrap()
        .args(["--strip-prefix", prefix(&dir).as_str(), "2"])
        .arg(&manifest)
        .arg(&output)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&output).unwrap(), "doc.txt,6.00,5,2\n");
}

#[test]
fn test_unrepresentable_fragment_size_fails() {
    let dir = TempDir::new().unwrap();
    let manifest = setup(dir.path(), usize::MAX, &[("doc.txt", "hello world ok")]);
    let output = dir.path().join("out.csv");

    Command::cargo_bin("wordrank")
        .unwrap()
        .arg("2")
        .arg(&manifest)
        .arg(&output)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("fragment size"));
    assert!(!output.exists());
}

#[test]
fn test_hundred_byte_word_keeps_extrema() {
    let dir = TempDir::new().unwrap();
    let text = format!("hi {} there", "a".repeat(100));
    let manifest = setup(dir.path(), 4096, &[("doc.txt", text.as_str())]);
    let output = dir.path().join("out.csv");

    Command::cargo_bin("wordrank")
        .unwrap()
        .args(["--strip-prefix", prefix(&dir).as_str(), "1"])
        .arg(&manifest)
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("doc.txt,"), "{}", csv);
    assert!(csv.ends_with(",100,1\n"), "{}", csv);
}
