//! Integration tests for the `noot` command line driver.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn sample(name: &str) -> String {
    format!("{}/samples/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("noot-{}-{}", std::process::id(), name))
}

#[test]
fn writes_graph_to_output() {
    let output = scratch("add.dot");

    let mut cmd = Command::cargo_bin("noot").unwrap();
    cmd.arg(sample("add.noot"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 1 top-level declarations."))
        .stderr(predicate::str::contains("Wrote "));

    let dot = fs::read_to_string(&output).unwrap();
    fs::remove_file(&output).unwrap();

    assert!(dot.starts_with("strict digraph {\nnode [shape=box]\n\"add\"\n"));
    // root and function share a name, the function node is renamed
    assert!(dot.contains("\"add\" -> \"add_2\"\n"));
}

#[test]
fn root_name_flag() {
    let output = scratch("named.dot");

    let mut cmd = Command::cargo_bin("noot").unwrap();
    cmd.arg(sample("nested.noot"))
        .args(["--name", "program", "--output"])
        .arg(&output)
        .assert()
        .success();

    let dot = fs::read_to_string(&output).unwrap();
    fs::remove_file(&output).unwrap();

    assert!(dot.contains("\"program\" -> \"outer\"\n"));
    assert!(dot.contains("\"program\" -> \"main\"\n"));
}

#[test]
fn token_dump() {
    let output = scratch("tokens.dot");

    let mut cmd = Command::cargo_bin("noot").unwrap();
    cmd.arg(sample("add.noot"))
        .arg("--tokens")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("1:1\tIDENT\tfunc\n"))
        .stderr(predicate::str::contains("1:9\tLPAREN\t(\n"))
        .stderr(predicate::str::contains("\tEOF\tEOF\n"));

    fs::remove_file(&output).unwrap();
}

#[test]
fn parse_error_exits_with_failure() {
    let output = scratch("bad.dot");

    let mut cmd = Command::cargo_bin("noot").unwrap();
    cmd.arg(sample("bad_args.noot"))
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Parse error at line 1, column 11: expected IDENT, got LBRACE '{'",
        ));

    assert!(!output.exists());
}

#[test]
fn missing_input_file() {
    let mut cmd = Command::cargo_bin("noot").unwrap();
    cmd.arg(sample("does_not_exist.noot"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: I/O error"));
}
