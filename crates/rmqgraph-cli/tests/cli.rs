use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn rmqgraph(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rmqgraph"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn rmqgraph")
}

#[test]
fn missing_file_prints_usage_and_fails() {
    let out = rmqgraph(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage:"), "{stderr}");
    assert!(stderr.contains("--order-first"), "{stderr}");
}

#[test]
fn dot_goes_to_stdout_and_diagnostics_to_stderr() {
    let path = fixture("shop.json");
    let out = rmqgraph(&[path.to_str().unwrap()]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stdout.starts_with("digraph G {"));
    assert!(!stdout.contains("not found"));
    assert_eq!(
        stderr.lines().collect::<Vec<_>>(),
        vec!["billing exchange not found", "missing.dlx exchange not found"]
    );
}

#[test]
fn output_flag_writes_file() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("shop.gv");
    let path = fixture("shop.json");

    let out = rmqgraph(&[
        "-f",
        "GV",
        "-o",
        target.to_str().unwrap(),
        "--order-first",
        "orders",
        path.to_str().unwrap(),
    ]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.starts_with("digraph G {"));
    assert!(written.find("Q: orders<").unwrap() < written.find("E: orders.dlx").unwrap());
}

#[test]
fn unsupported_format_fails() {
    let path = fixture("shop.json");
    let out = rmqgraph(&["--format", "docx", path.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("docx"));
}

#[test]
fn unreadable_input_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let out = rmqgraph(&[missing.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[cfg(unix)]
#[test]
fn diagnostics_are_reported_when_the_engine_fails() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let engine = dir.path().join("dot");
    fs::write(&engine, "#!/bin/sh\necho 'Error: out of memory' >&2\nexit 1\n").unwrap();
    fs::set_permissions(&engine, fs::Permissions::from_mode(0o755)).unwrap();

    let path = fixture("shop.json");
    let out = Command::new(env!("CARGO_BIN_EXE_rmqgraph"))
        .args(["-f", "svg", path.to_str().unwrap()])
        .env("PATH", dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn rmqgraph");

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("billing exchange not found"), "{stderr}");
    assert!(stderr.contains("missing.dlx exchange not found"), "{stderr}");
    assert!(stderr.contains("out of memory"), "{stderr}");
}
