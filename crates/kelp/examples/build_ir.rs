use kelp::core::ir::FnMethod;
use kelp::{lower_program, Emitter, JsonEmitter, Node, OutputStyle, SpecialForms};

fn main() -> anyhow::Result<()> {
    println!("Building factorial IR...\n");

    // (def factorial (fn factorial [n] (loop [i n acc 1] (if (<= i 1) acc (recur (- i 1) (* acc i))))))
    let body = Node::loop_(
        vec![("i", Node::var("n")), ("acc", Node::constant(1))],
        vec![],
        Some(Node::if_(
            Node::call("<=", vec![Node::var("i"), Node::constant(1)]),
            Node::var("acc"),
            Node::recur(vec![
                Node::call("-", vec![Node::var("i"), Node::constant(1)]),
                Node::call("*", vec![Node::var("acc"), Node::var("i")]),
            ]),
        )),
    );
    let factorial = Node::fn_(Some("factorial"), vec![FnMethod::new(&["n"], vec![], Some(body))]);
    let program = lower_program(
        &[Node::call("print!", vec![Node::invoke(factorial, vec![Node::constant(10)])])],
        &SpecialForms::builtin(),
    )?;

    println!("=== ESTree ===");
    let emitter = JsonEmitter::default().with_style(OutputStyle::Pretty);
    print!("{}", emitter.emit_to_string(&program)?);
    Ok(())
}
