//! Integration tests for the `tomlconv` binary.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`.
#![allow(deprecated)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const DOCUMENT: &str = "title = \"demo\"\n[server]\nports = [8001, 8002]\n";

fn tomlconv() -> Command {
    Command::cargo_bin("tomlconv").unwrap()
}

#[test]
fn stdin_to_json() {
    tomlconv()
        .args(["--to", "json"])
        .write_stdin(DOCUMENT)
        .assert()
        .success()
        .stdout(r#"{"title":"demo","server":{"ports":[8001,8002]}}"#.to_owned() + "\n");
}

#[test]
fn stdin_to_xml() {
    tomlconv()
        .args(["-t", "xml"])
        .write_stdin(DOCUMENT)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<xml><table><title><![CDATA[demo]]></title>"));
}

#[test]
fn php_with_custom_indent() {
    tomlconv()
        .args(["-t", "php", "--indent", "2"])
        .write_stdin("a = 1\n")
        .assert()
        .success()
        .stdout("array(\n  'a' => 1,\n)\n");
}

#[test]
fn single_mode() {
    tomlconv()
        .args(["-t", "json", "--mode", "single"])
        .write_stdin("[ 'a', 'b' ]")
        .assert()
        .success()
        .stdout("[\"a\",\"b\"]\n");
}

#[test]
fn pretty_json() {
    tomlconv()
        .args(["-t", "json", "--pretty", "--indent", "2"])
        .write_stdin("a = 1\n")
        .assert()
        .success()
        .stdout("{\n  \"a\": 1\n}\n");
}

#[test]
fn file_to_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("config.toml");
    let output = dir.path().join("config.json");
    std::fs::write(&input, DOCUMENT).unwrap();

    tomlconv()
        .arg(&input)
        .args(["-t", "json", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with(r#"{"title":"demo""#));
}

#[test]
fn empty_stdin_fails() {
    tomlconv()
        .args(["-t", "json"])
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input provided on stdin"));
}

#[test]
fn missing_file_fails() {
    tomlconv()
        .args(["/definitely/not/here.toml", "-t", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input file"));
}

#[test]
fn parse_error_reports_kind() {
    tomlconv()
        .args(["-t", "json"])
        .write_stdin("key = [1, 2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to convert stdin"))
        .stderr(predicate::str::contains("missing closing bracket"));
}

#[test]
fn size_limit() {
    tomlconv()
        .args(["-t", "json", "--max-size", "4"])
        .write_stdin(DOCUMENT)
        .assert()
        .failure()
        .stderr(predicate::str::contains("max size exceeded"));
}

#[test]
fn unknown_format_rejected() {
    tomlconv()
        .args(["-t", "yaml"])
        .write_stdin(DOCUMENT)
        .assert()
        .failure();
}
