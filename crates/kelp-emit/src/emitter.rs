use crate::config::EmitterConfig;
use crate::output::{OutputFormat, OutputStyle};
use anyhow::Result;
use kelp_core::{Program, SourceLocation};
use serde_json::json;
use std::io::Write;

pub type EmitResult = Result<()>;

pub trait Emitter {
    type Item;

    fn emit<W: Write>(&self, item: &Self::Item, writer: &mut W) -> EmitResult;

    fn emit_to_string(&self, item: &Self::Item) -> Result<String> {
        let mut buffer = Vec::new();
        self.emit(item, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Writes a lowered program as ESTree JSON for the external printer.
#[derive(Debug, Clone, Default)]
pub struct JsonEmitter {
    pub config: EmitterConfig,
    pub format: OutputFormat,
    pub style: OutputStyle,
}

impl JsonEmitter {
    pub fn new(config: EmitterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }
}

impl Emitter for JsonEmitter {
    type Item = Program;

    fn emit<W: Write>(&self, program: &Program, writer: &mut W) -> EmitResult {
        let document = match self.format {
            OutputFormat::Program => serde_json::to_value(program)?,
            OutputFormat::WithOptions => json!({
                "program": program,
                "options": self.config.printer_options(),
            }),
        };

        match self.style {
            OutputStyle::Compact => serde_json::to_writer(&mut *writer, &document)?,
            OutputStyle::Pretty => serde_json::to_writer_pretty(&mut *writer, &document)?,
        }
        writeln!(writer)?;
        Ok(())
    }
}

pub struct EmitHelper;

impl EmitHelper {
    /// `error: message` followed by ` --> location` when one is known.
    pub fn write_diagnostic<W: Write>(
        writer: &mut W,
        use_colors: bool,
        severity: &str,
        message: &str,
        loc: Option<&SourceLocation>,
    ) -> EmitResult {
        if use_colors {
            use colored::Colorize;
            let label = match severity {
                "error" => severity.red().bold().to_string(),
                "warning" => severity.yellow().bold().to_string(),
                _ => severity.cyan().to_string(),
            };
            writeln!(writer, "{}: {}", label, message.bold())?;
            if let Some(loc) = loc {
                writeln!(writer, "  {} {}", "-->".blue(), loc)?;
            }
        } else {
            writeln!(writer, "{}: {}", severity, message)?;
            if let Some(loc) = loc {
                writeln!(writer, "  --> {}", loc)?;
            }
        }
        Ok(())
    }
}
