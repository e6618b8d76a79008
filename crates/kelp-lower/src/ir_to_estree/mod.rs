/*! Lower analyzed Kelp IR to ESTree.
 *
 * The analyzer hands over a tree of symbolic-expression forms where everything is an expression:
 * `do` has a value, `if` has a value, `throw` has a value. JavaScript disagrees. This pass decides,
 * form by form, what becomes an expression, what becomes a statement, and what has to be wrapped
 * in an immediately invoked function so a statement can stand where a value is expected. Operators
 * with a JavaScript counterpart are inlined through the special-form table instead of calling the
 * runtime library.
 */

mod errors;
mod expression_writer;
mod function_writer;
mod identifier;
mod loop_writer;
mod namespace_writer;
mod operators;
mod special_forms;
mod structural_writer;
mod writer;


use kelp_core::{Node, Program, SourceLocation, Statement};
use tracing::debug;

pub use errors::{LowerError, Result};
pub use identifier::{module_identifier, translate_identifier, translate_path};
pub use loop_writer::{tail_recurs, LoopSignal, RecurFrame};
pub use namespace_writer::resolve;
pub use operators::{
    install_arithmetic_operator, install_bitwise_operator, install_builtins,
    install_comparison_operator, install_identity_tests, install_logical_operator,
    install_unary_operator, Arity,
};
pub use special_forms::{SpecialForms, SpecialWriter};
pub use writer::Writer;

/// Lowers every top-level form in statement position into one program.
pub fn lower_program(forms: &[Node], special_forms: &SpecialForms) -> Result<Program> {
    let writer = Writer::new(special_forms);
    let mut body = Vec::with_capacity(forms.len());

    for form in forms {
        debug!("lowering top-level {}", form.op());
        body.extend(writer.write_statement(form)?);
    }

    let mut program = Program::new(body);
    program.loc = SourceLocation::merge_all(forms.iter().map(|form| form.loc.as_ref()));
    Ok(program)
}

/// Lowers a single top-level form with a fresh writer.
pub fn lower_form(form: &Node, special_forms: &SpecialForms) -> Result<Vec<Statement>> {
    Writer::new(special_forms).write_statement(form)
}
