/*! Node models shared by the Kelp compiler backend.
 *
 * The analyzer speaks a symbolic-expression IR; the printer speaks ESTree. This crate owns both
 * vocabularies plus the source locations that travel from one to the other, so the lowering can be
 * a pure function between them.
 */

pub mod estree;
pub mod ir;
pub mod source_location;

pub use estree::{Expression, Program, Statement};
pub use ir::{Node, NodeKind};
pub use source_location::{Position, SourceLocation};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IrError {
    #[error("Invalid IR: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IR contains no forms")]
    NoForms,
}

pub type Result<T> = std::result::Result<T, IrError>;
