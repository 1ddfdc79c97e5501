// tests/integration_cli.rs - exit codes and store round trips through the binary
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const HELLO: &str = r#"class Hello {
    void greet(String name) {
        System.out.println("hi " + name);
    }
}
"#;
const HOWDY: &str = r#"class Howdy {
    void wave(String who) {
        System.out.println("hi " + who);
    }
}
"#;

fn plagcheck(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plagcheck"))
        .current_dir(dir)
        .args(["--db", "subs.db"])
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn workspace() -> TempDir {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("Hello.java"), HELLO).unwrap();
    fs::write(d.path().join("Howdy.java"), HOWDY).unwrap();
    d
}

#[test]
fn test_insert_compare_and_threshold() {
    let d = workspace();
    let out = plagcheck(d.path(), &["insert", "--owner", "ann", "--lab", "1", "Hello.java"]);
    assert_eq!(out.status.code(), Some(0));

    let out = plagcheck(
        d.path(),
        &["compare", "--owner", "bob", "--lab", "1", "--format", "json", "Howdy.java"],
    );
    assert_eq!(out.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["best"]["owner"], "ann");
    assert_eq!(report["best"]["percentage"], 100);

    let out = plagcheck(
        d.path(),
        &["compare", "--owner", "bob", "--lab", "1", "--threshold", "90", "Howdy.java"],
    );
    assert_eq!(out.status.code(), Some(4));
}

#[test]
fn test_compare_without_candidates_is_not_an_error() {
    let d = workspace();
    let out = plagcheck(
        d.path(),
        &["compare", "--owner", "bob", "--lab", "7", "--format", "json", "Howdy.java"],
    );
    assert_eq!(out.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(report.get("best").is_none());
}

#[test]
fn test_duplicate_and_missing_submissions() {
    let d = workspace();
    let insert = ["insert", "--owner", "ann", "--lab", "1", "Hello.java"];
    assert_eq!(plagcheck(d.path(), &insert).status.code(), Some(0));
    assert_eq!(plagcheck(d.path(), &insert).status.code(), Some(2));

    let out = plagcheck(d.path(), &["delete", "--owner", "zoe", "--lab", "1"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error:"));
}

#[test]
fn test_source_round_trip() {
    let d = workspace();
    plagcheck(d.path(), &["insert", "--owner", "ann", "--lab", "2", "Hello.java"]);
    let out = plagcheck(d.path(), &["source", "--owner", "ann", "--lab", "2"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("class Hello"));
}

#[test]
fn test_unparseable_submission() {
    let d = workspace();
    fs::write(d.path().join("Broken.java"), "class Broken {").unwrap();
    let out = plagcheck(d.path(), &["insert", "--owner", "ann", "--lab", "1", "Broken.java"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_direct_score() {
    let d = workspace();
    let out = plagcheck(d.path(), &["score", "Howdy.java", "Hello.java", "--format", "json"]);
    assert_eq!(out.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["percentage"], 100);
    assert_eq!(report["equal"], true);
}
