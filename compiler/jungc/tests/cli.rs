//! End-to-end tests for the `jung` binary.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

fn jung() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jung"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn script(name: &str, source: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("jungc_cli_{}_{name}.jung", std::process::id()));
    if let Err(e) = fs::write(&path, source) {
        panic!("cannot write {}: {e}", path.display());
    }
    path
}

fn run_script(name: &str, source: &str) -> Output {
    let path = script(name, source);
    let output = match jung().arg(&path).output() {
        Ok(output) => output,
        Err(e) => panic!("cannot run jung: {e}"),
    };
    let _ = fs::remove_file(path);
    output
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn version_flag() {
    for flag in ["--version", "-v"] {
        let output = match jung().arg(flag).output() {
            Ok(output) => output,
            Err(e) => panic!("cannot run jung: {e}"),
        };
        assert!(output.status.success());
        assert_eq!(stdout(&output), "jung v0.1.0\n");
    }
}

#[test]
fn help_flag() {
    let output = match jung().arg("--help").output() {
        Ok(output) => output,
        Err(e) => panic!("cannot run jung: {e}"),
    };
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage: jung [file]"));
}

#[test]
fn runs_a_script() {
    let output = run_script(
        "hello",
        "let names = [\"ada\", \"grace\"]\nfor n in names { print \"hi ${n}\" }\n",
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "hi ada\nhi grace\n");
    assert_eq!(stderr(&output), "");
}

#[test]
fn runtime_error_exits_with_one() {
    let output = run_script("boom", "print \"start\"\nlet x = 1\nprint x / 0\n");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "start\n");
    assert_eq!(
        stderr(&output),
        "jung runtime error [line 3]: division by zero\n"
    );
}

#[test]
fn parse_error_exits_with_one() {
    let output = run_script("syntax", "let = 5\n");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("jung: line 1:"));
}

#[test]
fn uncaught_throw_is_reported() {
    let output = run_script("throw", "throw \"nope\"\n");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "jung runtime error [line 1]: uncaught exception: nope\n"
    );
}

#[test]
fn exit_code_is_forwarded() {
    let output = run_script("exit", "print \"bye\"\nexit(7)\nprint \"unreachable\"\n");
    assert_eq!(output.status.code(), Some(7));
    assert_eq!(stdout(&output), "bye\n");
    assert_eq!(stderr(&output), "");
}

#[test]
fn missing_file() {
    let output = match jung().arg("/no/such/file.jung").output() {
        Ok(output) => output,
        Err(e) => panic!("cannot run jung: {e}"),
    };
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("jung: cannot read '/no/such/file.jung'"));
}

#[test]
fn repl_session_over_stdin() {
    let mut child = match jung()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => panic!("cannot spawn jung: {e}"),
    };
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(b"let x = 20\nx + 1\nprint \"p\"\nmissing\nexit\n") {
            panic!("cannot write stdin: {e}");
        }
    }
    let output = match child.wait_with_output() {
        Ok(output) => output,
        Err(e) => panic!("jung did not finish: {e}"),
    };
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("jung> 21\n"), "{out}");
    assert!(out.contains("p\n"), "{out}");
    assert_eq!(
        stderr(&output),
        "jung runtime error [line 1]: undefined variable 'missing'\n"
    );
}
