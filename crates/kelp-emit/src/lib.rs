/*! Hand lowered programs to the JavaScript printer.
 *
 * Kelp does not print JavaScript itself. The printer is an external ESTree code generator, so the
 * last step of compilation is a faithful JSON document: the program, and optionally the printer
 * options that control indentation, quoting, comments and source maps.
 */

pub mod config;
pub mod emitter;
pub mod output;

pub use config::{EmitterConfig, IndentStyle, QuoteStyle};
pub use emitter::{EmitHelper, EmitResult, Emitter, JsonEmitter};
pub use output::{OutputFormat, OutputStyle};
