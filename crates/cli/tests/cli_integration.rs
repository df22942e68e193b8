use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

const DECLS: &str = r#"{
  "parameters": [
    { "name": "src", "description": "Source file" },
    { "name": "rest", "description": "More files", "kind": "multi" }
  ],
  "options": [
    { "short": "o", "full": "out", "valueDescription": "FILE", "description": "Output file" },
    { "short": "v", "full": "verbose", "description": "Chatty output" }
  ]
}"#;

fn make_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before UNIX_EPOCH")
        .as_nanos();
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("argspec-integ-{prefix}-{pid}-{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn write_decls(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("argspec.json");
    fs::write(&path, contents).expect("failed to write declarations");
    path
}

fn argspec() -> Command {
    Command::new(env!("CARGO_BIN_EXE_argspec"))
}

fn stdout_json(out: &Output) -> serde_json::Value {
    serde_json::from_slice(&out.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}):\n{}",
            String::from_utf8_lossy(&out.stdout)
        )
    })
}

#[test]
fn help_works() {
    let out = argspec()
        .arg("--help")
        .output()
        .expect("failed to run argspec --help");
    assert!(
        out.status.success(),
        "argspec --help failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("parse") && stdout.contains("usage") && stdout.contains("check"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn parse_prints_matches_as_json() {
    let dir = make_temp_dir("parse-ok");
    let decls = write_decls(&dir, DECLS);

    let out = argspec()
        .arg("parse")
        .arg("--spec")
        .arg(&decls)
        .args(["--", "a.txt", "-v", "b.txt", "--out=x", "c.txt"])
        .output()
        .expect("failed to run argspec parse");
    assert!(
        out.status.success(),
        "argspec parse failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    assert_eq!(
        stdout_json(&out),
        serde_json::json!({
            "verbose": "on",
            "out": "x",
            "src": "a.txt",
            "rest": ["b.txt", "c.txt"],
        })
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn parse_reports_errors_and_fails() {
    let dir = make_temp_dir("parse-errors");
    let decls = write_decls(&dir, DECLS);

    let out = argspec()
        .current_dir(&dir)
        .args(["parse", "--compact", "--", "--bogus", "--out="])
        .output()
        .expect("failed to run argspec parse");
    assert_eq!(out.status.code(), Some(1), "expected exit code 1");
    assert_eq!(
        stdout_json(&out),
        serde_json::json!({
            "*errors": [
                "Missing value for option: out",
                "Missing parameter: src",
                "Unrecognized option: --bogus",
            ],
            "*leftover": ["--bogus"],
        })
    );
    assert!(decls.is_file());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn help_and_usage_render_declarations() {
    let dir = make_temp_dir("help");
    let decls = write_decls(&dir, DECLS);

    let out = argspec()
        .args(["usage", "-s"])
        .arg(&decls)
        .output()
        .expect("failed to run argspec usage");
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim_end(),
        "[options] <src> [rest*]"
    );

    let out = argspec()
        .args(["help", "-n", "copy", "-s"])
        .arg(&decls)
        .output()
        .expect("failed to run argspec help");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.starts_with("Usage: copy [options] <src> [rest*]"),
        "unexpected help output:\n{stdout}"
    );
    assert!(stdout.contains("-o, --out=<FILE>  Output file"), "{stdout}");
    assert!(stdout.contains("-v, --verbose     Chatty output"), "{stdout}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn check_rejects_option_without_short_name() {
    let dir = make_temp_dir("check-bad");
    let decls = write_decls(
        &dir,
        r#"{ "options": [ { "full": "verbose", "description": "Chatty" } ] }"#,
    );

    let out = argspec()
        .args(["check", "--spec"])
        .arg(&decls)
        .output()
        .expect("failed to run argspec check");
    assert!(!out.status.success(), "check should fail");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("short name and a full name"), "{stderr}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_declaration_file_is_an_error() {
    let dir = make_temp_dir("missing");

    let out = argspec()
        .current_dir(&dir)
        .arg("check")
        .output()
        .expect("failed to run argspec check");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("declaration file not found"), "{stderr}");

    let _ = fs::remove_dir_all(&dir);
}
