use kelp_core::ir::read_forms;
use kelp_core::{Expression, Program, Statement};
use kelp_emit::{Emitter, EmitterConfig, JsonEmitter, OutputFormat, OutputStyle, QuoteStyle};
use serde_json::{json, Value};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CaptureWriter {
    fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                buffer: buffer.clone(),
            },
            buffer,
        )
    }
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer.lock().unwrap();
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured(buffer: &Arc<Mutex<Vec<u8>>>) -> Value {
    let bytes = buffer.lock().unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn test_emit_into_shared_writer() {
    let (mut writer, buffer) = CaptureWriter::new();
    let program = Program::new(vec![Statement::var("answer", Some(Expression::number(42)))]);

    JsonEmitter::default().emit(&program, &mut writer).unwrap();

    assert_eq!(
        captured(&buffer),
        json!({
            "type": "Program",
            "body": [{
                "type": "VariableDeclaration",
                "declarations": [{
                    "type": "VariableDeclarator",
                    "id": {"type": "Identifier", "name": "answer"},
                    "init": {"type": "Literal", "value": 42}
                }],
                "kind": "var"
            }]
        })
    );
}

#[test]
fn test_envelope_carries_printer_options() {
    let (mut writer, buffer) = CaptureWriter::new();
    let config = EmitterConfig {
        quotes: QuoteStyle::Single,
        compact: true,
        comment: true,
        ..EmitterConfig::default()
    };

    JsonEmitter::new(config)
        .with_format(OutputFormat::WithOptions)
        .with_style(OutputStyle::Pretty)
        .emit(&Program::new(vec![]), &mut writer)
        .unwrap();

    let document = captured(&buffer);
    assert_eq!(document["program"], json!({"type": "Program", "body": []}));
    assert_eq!(
        document["options"],
        json!({
            "format": {"indent": {"style": "  "}, "quotes": "single", "compact": true},
            "comment": true
        })
    );
}

#[test]
fn test_program_locations_survive_emission() {
    let forms = read_forms(
        r#"{"op": "var", "name": "x", "loc": {"start": {"line": 1, "column": 0}, "end": {"line": 1, "column": 1}}}"#,
    )
    .unwrap();
    let mut program = Program::new(vec![Statement::expression(
        Expression::identifier("x").with_loc(forms[0].loc.clone()),
    )]);
    program.loc = forms[0].loc.clone();

    let output = JsonEmitter::default().emit_to_string(&program).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["loc"]["end"]["column"], json!(1));
    assert_eq!(value["body"][0]["loc"]["start"]["line"], json!(1));
}
