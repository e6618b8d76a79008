use kelp_core::estree::Expression;
use kelp_core::ir::{read_forms, Invoke};
use kelp_core::SourceLocation;
use kelp_lower::ir_to_estree::{install_arithmetic_operator, Arity};
use kelp_lower::{lower_program, LowerError, SpecialForms, Writer};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn lower_json(source: Value, forms: &SpecialForms) -> Result<Value, LowerError> {
    let nodes = read_forms(&source.to_string()).unwrap();
    let program = lower_program(&nodes, forms)?;
    Ok(serde_json::to_value(program).unwrap())
}

#[test]
fn test_module_from_analyzer_output() {
    let source = json!([
        {
            "op": "ns",
            "name": "demo.greet",
            "require": [{"ns": "demo.text", "refer": [{"name": "upper-case"}]}]
        },
        {
            "op": "def",
            "export": true,
            "var": {"op": "var", "name": "greet!"},
            "init": {
                "op": "fn",
                "name": "greet!",
                "methods": [{
                    "params": [{"name": "who"}],
                    "arity": 1,
                    "result": {
                        "op": "invoke",
                        "callee": {"op": "var", "name": "+"},
                        "params": [
                            {"op": "constant", "type": "string", "value": "Hello, "},
                            {"op": "invoke", "callee": {"op": "var", "name": "upper-case"},
                             "params": [{"op": "var", "name": "who"}]}
                        ]
                    }
                }]
            }
        }
    ]);

    let program = lower_json(source, &SpecialForms::builtin()).unwrap();
    let body = program["body"].as_array().unwrap();
    assert_eq!(body.len(), 4);

    assert_eq!(
        body[1]["declarations"][0]["init"]["arguments"][0],
        json!({"type": "Literal", "value": "./text"})
    );
    assert_eq!(
        body[1]["declarations"][0]["id"],
        json!({"type": "Identifier", "name": "demo_text"})
    );

    assert_eq!(
        body[2]["declarations"][0]["id"],
        json!({"type": "Identifier", "name": "upperCase"})
    );

    let def = &body[3]["declarations"][0];
    assert_eq!(def["id"]["name"], json!("greet"));
    assert_eq!(def["init"]["left"]["object"]["name"], json!("exports"));

    let function = &def["init"]["right"];
    assert_eq!(function["type"], json!("FunctionExpression"));
    assert_eq!(
        function["body"]["body"][0],
        json!({
            "type": "ReturnStatement",
            "argument": {
                "type": "BinaryExpression",
                "operator": "+",
                "left": {"type": "Literal", "value": "Hello, "},
                "right": {
                    "type": "CallExpression",
                    "callee": {"type": "Identifier", "name": "upperCase"},
                    "arguments": [{"type": "Identifier", "name": "who"}]
                }
            }
        })
    );
}

#[test]
fn test_macro_layer_registers_special_form() {
    let mut forms = SpecialForms::builtin();
    forms.register("aget", |writer: &Writer<'_>, invoke: &Invoke, loc: Option<&SourceLocation>| {
        let mut params = writer.write_all(&invoke.params)?.into_iter();
        let target = params
            .next()
            .ok_or_else(|| LowerError::arity("aget", 0, loc))?;
        Ok(params
            .fold(target, Expression::index)
            .with_loc(loc.cloned()))
    });

    let source = json!({
        "op": "invoke",
        "callee": {"op": "var", "name": "aget"},
        "params": [
            {"op": "var", "name": "grid"},
            {"op": "var", "name": "row"},
            {"op": "constant", "type": "number", "value": 0}
        ]
    });

    let program = lower_json(source.clone(), &forms).unwrap();
    assert_eq!(
        program["body"][0]["expression"],
        json!({
            "type": "MemberExpression",
            "object": {
                "type": "MemberExpression",
                "object": {"type": "Identifier", "name": "grid"},
                "property": {"type": "Identifier", "name": "row"},
                "computed": true
            },
            "property": {"type": "Literal", "value": 0},
            "computed": true
        })
    );

    // without the registration it is an ordinary call
    let plain = lower_json(source, &SpecialForms::builtin()).unwrap();
    assert_eq!(plain["body"][0]["expression"]["type"], json!("CallExpression"));
}

#[test]
fn test_reinstalled_operator_overrides_builtin() {
    let mut forms = SpecialForms::builtin();
    install_arithmetic_operator(
        &mut forms,
        "mod",
        kelp_core::estree::BinaryOperator::Remainder,
        1,
        Arity::AtLeast(2),
    );

    let source = json!({
        "op": "invoke",
        "callee": {"op": "var", "name": "mod"},
        "params": [
            {"op": "var", "name": "a"},
            {"op": "var", "name": "b"},
            {"op": "var", "name": "c"}
        ]
    });
    let program = lower_json(source.clone(), &forms).unwrap();
    assert_eq!(program["body"][0]["expression"]["operator"], json!("%"));

    assert!(matches!(
        lower_json(source, &SpecialForms::builtin()),
        Err(LowerError::ArityMismatch { got: 3, .. })
    ));
}

#[test]
fn test_empty_special_forms_disable_inlining() {
    let source = json!({
        "op": "invoke",
        "callee": {"op": "var", "name": "+"},
        "params": [{"op": "constant", "type": "number", "value": 1}]
    });
    let program = lower_json(source, &SpecialForms::empty()).unwrap();
    assert_eq!(
        program["body"][0]["expression"],
        json!({
            "type": "CallExpression",
            "callee": {"type": "Identifier", "name": "sum"},
            "arguments": [{"type": "Literal", "value": 1}]
        })
    );
}

#[test]
fn test_error_location_from_ir() {
    let source = json!({
        "op": "invoke",
        "callee": {"op": "var", "name": "not"},
        "params": [],
        "loc": {"start": {"line": 7, "column": 3}, "end": {"line": 7, "column": 8}, "source": "core.kelp"}
    });
    let err = lower_json(source, &SpecialForms::builtin()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Wrong number of arguments (0) passed to not at core.kelp:7:3"
    );
}

#[test]
fn test_lowering_shared_forms_across_threads() {
    let forms = std::sync::Arc::new(SpecialForms::builtin());
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let forms = forms.clone();
            std::thread::spawn(move || {
                let source = json!({
                    "op": "invoke",
                    "callee": {"op": "var", "name": "*"},
                    "params": [{"op": "constant", "type": "number", "value": n}]
                });
                lower_json(source, &forms).unwrap()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let program = handle.join().unwrap();
        assert_eq!(program["body"][0]["expression"]["right"]["value"], json!(n));
    }
}
