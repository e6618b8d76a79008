/*! Lower Kelp IR into ESTree.
 *
 * The analyzer's output is shaped for a Lisp: expression-oriented, operator-agnostic, with tail
 * calls spelled `recur`. The printer wants ESTree. This crate is the one place where those two
 * worlds meet, so every JavaScript-specific decision lives here: identifier mangling, statement
 * hoisting, overload dispatch, loop encoding and module imports.
 */

pub mod ir_to_estree;

pub use ir_to_estree::{
    lower_form, lower_program, resolve, translate_identifier, LowerError, SpecialForms, Writer,
};
