use std::fs;
use std::path::{Path, PathBuf};

use super::{interpreter, output, parse_ok, run_err};
use crate::{EvalError, Interpreter, Value};
use pretty_assertions::assert_eq;

fn temp_module(name: &str, source: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("jung_{}_{name}.jung", std::process::id()));
    if let Err(e) = fs::write(&path, source) {
        panic!("cannot write {}: {e}", path.display());
    }
    path
}

fn path_literal(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

#[test]
fn import_runs_once() {
    let module = temp_module(
        "once",
        "print \"loading\"\nlet shared = 41\nfn answer() { return shared + 1 }\n",
    );
    let p = path_literal(&module);
    let src = format!("import \"{p}\"\nimport \"{p}\"\nprint answer()\nprint shared");
    assert_eq!(output(&src), "loading\n42\n41\n");
    let _ = fs::remove_file(module);
}

#[test]
fn import_defines_classes() {
    let module = temp_module("class", "class Unit { fn constructor() { this.ok = true } }\n");
    let p = path_literal(&module);
    assert_eq!(output(&format!("import \"{p}\"\nprint new Unit().ok")), "true\n");
    let _ = fs::remove_file(module);
}

#[test]
fn missing_import_file() {
    let err = run_err("import \"/definitely/not/here.jung\"");
    assert!(err.message.starts_with("cannot open import file '/definitely/not/here.jung'"));
    assert_eq!(err.line, Some(1));
}

#[test]
fn import_with_syntax_error() {
    let module = temp_module("broken", "let = 1\n");
    let p = path_literal(&module);
    let err = run_err(&format!("import \"{p}\""));
    assert!(err.message.starts_with(&format!("in import '{p}'")));
    let _ = fs::remove_file(module);
}

#[test]
fn host_defined_globals_are_visible() {
    let (mut interp, handler) = interpreter();
    interp.define_global("greeting", Value::from("hello"));
    let program = parse_ok("print greeting + \"!\"\nlet made = 5");
    if let Err(e) = interp.run(&program) {
        panic!("run failed: {e}");
    }
    assert_eq!(handler.get_output(), "hello!\n");
    assert_eq!(interp.lookup("made"), Some(Value::Number(5.0)));
}

#[test]
fn state_persists_across_runs() {
    let (mut interp, handler) = interpreter();
    for src in ["let n = 1", "fn inc() { n += 1 }", "inc()\nprint n"] {
        if let Err(e) = interp.run(&parse_ok(src)) {
            panic!("run failed: {e}");
        }
    }
    assert_eq!(handler.get_output(), "2\n");
}

#[test]
fn scoped_interpreter_unwinds() {
    let mut interp = Interpreter::new();
    {
        let mut scoped = match interp.scoped() {
            Ok(scoped) => scoped,
            Err(e) => panic!("push failed: {e}"),
        };
        scoped.define_global("g", Value::Bool(true));
        scoped.env.define("temp", Value::Null);
        assert!(scoped.lookup("temp").is_some());
    }
    assert!(interp.lookup("temp").is_none());
    assert_eq!(interp.lookup("g"), Some(Value::Bool(true)));
}

#[test]
fn json_round_trip_through_natives() {
    let src = r#"
let data = jsonParse("{\"name\": \"ada\", \"tags\": [1, 2.5, null, true]}")
print data.name
print data.tags
print jsonStringify({a: [1, "x"], b: null})
try { jsonParse("not json") } catch (e) { print e.length > 0 }
"#;
    assert_eq!(
        output(src),
        "ada\n[1, 2.5, null, true]\n{\"a\":[1,\"x\"],\"b\":null}\ntrue\n"
    );
}

#[test]
fn scope_limit_is_configurable() {
    let mut interp = Interpreter::builder().max_scope_depth(3).build();
    let program = parse_ok("if true { if true { if true { print 1 } } }");
    let result: Result<(), EvalError> = interp.run(&program);
    match result {
        Ok(()) => panic!("expected scope overflow"),
        Err(e) => assert!(e.message.starts_with("scope overflow")),
    }
}
