use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

fn kelp() -> Command {
    Command::cargo_bin("kelp").unwrap()
}

const LOOP_IR: &str = r#"{
    "op": "loop",
    "bindings": [{"name": "i", "init": {"op": "constant", "type": "number", "value": 0}}],
    "result": {
        "op": "if",
        "test": {"op": "invoke", "callee": {"op": "var", "name": "<"},
                 "params": [{"op": "var", "name": "i"}, {"op": "constant", "type": "number", "value": 5}]},
        "consequent": {"op": "recur", "params": [
            {"op": "invoke", "callee": {"op": "var", "name": "+"},
             "params": [{"op": "var", "name": "i"}, {"op": "constant", "type": "number", "value": 1}]}
        ]},
        "alternate": {"op": "var", "name": "i"}
    }
}"#;

#[test]
fn test_lower_file_to_stdout() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("loop.json");
    fs::write(&input, LOOP_IR).unwrap();

    let output = kelp().arg("lower").arg(&input).output().unwrap();
    assert!(output.status.success());

    let program: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(program["type"], json!("Program"));
    let function = &program["body"][0]["expression"]["callee"];
    assert_eq!(function["body"]["body"][1]["type"], json!("DoWhileStatement"));
}

#[test]
fn test_lower_stdin_with_options_to_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.json");

    kelp()
        .args(["lower", "-", "--with-options", "--source-map", "main.kelp", "--quotes", "single", "-o"])
        .arg(&out)
        .write_stdin(r#"[{"op": "keyword", "name": "ready"}]"#)
        .assert()
        .success();

    let document: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(document["program"]["body"][0]["expression"]["value"], json!("ready"));
    assert_eq!(document["options"]["sourceMap"], json!("main.kelp"));
    assert_eq!(document["options"]["format"]["quotes"], json!("single"));
}

#[test]
fn test_lower_with_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("printer.json");
    fs::write(&config, r#"{"compact": true, "indentStyle": "tabs"}"#).unwrap();

    let output = kelp()
        .args(["lower", "-", "--with-options", "--config"])
        .arg(&config)
        .write_stdin(r#"{"op": "nil"}"#)
        .output()
        .unwrap();
    assert!(output.status.success());

    let document: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document["options"]["format"]["compact"], json!(true));
    assert_eq!(document["options"]["format"]["indent"]["style"], json!("\t"));
}

#[test]
fn test_pretty_output_spans_lines() {
    kelp()
        .args(["lower", "-", "--pretty"])
        .write_stdin(r#"{"op": "var", "name": "x"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"body\""));
}

#[test]
fn test_lowering_error_reports_location() {
    kelp()
        .args(["lower", "-"])
        .write_stdin(
            r#"{"op": "invoke", "callee": {"op": "var", "name": "mod"}, "params": [],
                "loc": {"start": {"line": 3, "column": 4}, "end": {"line": 3, "column": 9}}}"#,
        )
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Wrong number of arguments (0) passed to mod",
        ))
        .stderr(predicate::str::contains("--> 3:4"));
}

#[test]
fn test_invalid_ir_fails() {
    kelp()
        .args(["lower", "-"])
        .write_stdin(r#"{"op": "quasiquote"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid IR"));
}

#[test]
fn test_translate_names() {
    kelp()
        .args(["translate", "list->vector", "number?", "fooBar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("listToVector"))
        .stdout(predicate::str::contains("isNumber"))
        .stdout(predicate::str::contains("fooBar"));
}

#[test]
fn test_resolve_paths() {
    kelp()
        .args(["resolve", "a.b.c", "a.b.d.e"])
        .assert()
        .success()
        .stdout("./d/e\n");

    kelp()
        .args(["resolve", "a.b", "x.y"])
        .assert()
        .success()
        .stdout("x/y\n");
}

#[test]
fn test_source_map_requires_envelope() {
    kelp()
        .args(["lower", "-", "--source-map", "main.kelp"])
        .write_stdin(r#"{"op": "nil"}"#)
        .assert()
        .failure();
}
