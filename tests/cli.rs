use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(name);
    path
}

fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("ogzents-{}-{}", std::process::id(), name));
    path
}

fn run_with_stdin(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ogzents"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_minimal_output_on_stdout() {
    let data = std::fs::read(fixture("v30_two_ents.ogz")).unwrap();
    let output = run_with_stdin(&[], &data);
    assert!(output.status.success());
    assert_eq!(output.stdout.len(), 36 + 5 + 2 + 2 + 2 + 24 * 2);
    assert_eq!(&output.stdout[..4], b"OCTA");
    // entity records are copied verbatim
    assert_eq!(&output.stdout[47..], &data[51..99]);
}

#[test]
fn test_ents_report() {
    let output = Command::new(env!("CARGO_BIN_EXE_ogzents"))
        .arg("--ents")
        .arg(fixture("v30_two_ents.ogz"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "     0: type:  1, attrs:   1   2   3   4   5, pos: 16.000000 32.000000 48.000000",
            "     1: type:  5, attrs:   0   0   0   0   0, pos: -16.000000 0.000000 8.000000",
        ]
    );
}

#[test]
fn test_version_game_and_vars_report() {
    let output = Command::new(env!("CARGO_BIN_EXE_ogzents"))
        .args(["--version", "--vars", "--game"])
        .arg(fixture("v33_vars.ogz"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        text,
        "OGZ file format version: 33\n  maptitle = \\f2Castle \\f7Siege\n  skylight = 8355711\n  fogdensity = 0.25\ngame: fps\n"
    );
}

#[test]
fn test_bad_magic_fails() {
    let mut data = std::fs::read(fixture("v30_two_ents.ogz")).unwrap();
    data[0] = b'X';
    let output = run_with_stdin(&[], &data);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("wrong magic"), "{}", stderr);
}

#[test]
fn test_truncated_input_reports_entity() {
    let data = std::fs::read(fixture("v30_two_ents.ogz")).unwrap();
    let output = run_with_stdin(&[], &data[..90]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("entity at pos 1"), "{}", stderr);
}

#[test]
fn test_trim_copies_consumed_prefix() {
    let data = std::fs::read(fixture("v33_vars.ogz")).unwrap();
    let trim_path = scratch_path("trim.ogz");
    let output = run_with_stdin(&["--trim", trim_path.to_str().unwrap()], &data);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let trimmed = std::fs::read(&trim_path).unwrap();
    std::fs::remove_file(&trim_path).unwrap();
    assert_eq!(trimmed, &data[..236]);
}

#[test]
fn test_trim_with_report() {
    let data = std::fs::read(fixture("v15_old.ogz")).unwrap();
    let trim_path = scratch_path("trim-report.ogz");
    let output = run_with_stdin(&["--game", "--trim", trim_path.to_str().unwrap()], &data);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "game: fps\n");

    let trimmed = std::fs::read(&trim_path).unwrap();
    std::fs::remove_file(&trim_path).unwrap();
    assert_eq!(trimmed, &data[..66]);
}

#[test]
fn test_failed_trim_leaves_no_file() {
    let data = std::fs::read(fixture("v33_vars.ogz")).unwrap();
    let trim_path = scratch_path("trim-failed.ogz");
    let output = run_with_stdin(&["--trim", trim_path.to_str().unwrap()], &data[..100]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!trim_path.exists());
}

#[test]
fn test_output_file() {
    let out_path = scratch_path("minimal.ogz");
    let output = Command::new(env!("CARGO_BIN_EXE_ogzents"))
        .arg(fixture("v29_no_ents.ogz"))
        .arg("-o")
        .arg(&out_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let minimal = std::fs::read(&out_path).unwrap();
    std::fs::remove_file(&out_path).unwrap();
    assert_eq!(minimal.len(), 47);
    assert_eq!(&minimal[16..20], &0i32.to_le_bytes());
}

#[test]
fn test_missing_input_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_ogzents"))
        .arg(fixture("does-not-exist.ogz"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}
