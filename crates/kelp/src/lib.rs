/*! Unified interface for the Kelp JavaScript backend.
 *
 * Single import for the whole backend: reading analyzer IR, lowering it to ESTree with the builtin
 * or an extended special-form table, and emitting the result for the printer.
 */

pub use kelp_core as core;
pub use kelp_emit as emit;
pub use kelp_lower as lower;

pub use kelp_core::{ir::read_forms, Expression, Node, NodeKind, Program, SourceLocation, Statement};

pub use kelp_emit::{Emitter, EmitterConfig, JsonEmitter, OutputFormat, OutputStyle};

pub use kelp_lower::{lower_program, resolve, translate_identifier, LowerError, SpecialForms};

use anyhow::Result;

/// Reads IR JSON and lowers it with the builtin special forms.
pub fn compile(ir: &str) -> Result<Program> {
    compile_with(ir, &SpecialForms::builtin())
}

pub fn compile_with(ir: &str, special_forms: &SpecialForms) -> Result<Program> {
    let forms = read_forms(ir)?;
    Ok(lower_program(&forms, special_forms)?)
}

/// [`compile`], then emission as a JSON string.
pub fn compile_to_json(ir: &str, emitter: &JsonEmitter) -> Result<String> {
    emitter.emit_to_string(&compile(ir)?)
}
