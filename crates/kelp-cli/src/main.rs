mod logging;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kelp")]
#[command(about = "Kelp - lower analyzed s-expression IR to ESTree")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower an IR JSON file (or `-` for stdin) to ESTree JSON.
    Lower {
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,

        /// Wrap the program as `{program, options}` for the printer.
        #[arg(long)]
        with_options: bool,

        /// Printer options as a JSON file.
        #[arg(long, requires = "with_options")]
        config: Option<PathBuf>,

        #[arg(long, requires = "with_options")]
        source_map: Option<String>,

        #[arg(long, value_enum, requires = "with_options")]
        quotes: Option<Quotes>,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the JavaScript identifier for each source name.
    Translate { names: Vec<String> },

    /// Print the module path one namespace uses to require another.
    Resolve {
        requirer: String,
        requirement: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Quotes {
    Single,
    Double,
    Auto,
}

impl From<Quotes> for kelp_emit::QuoteStyle {
    fn from(quotes: Quotes) -> Self {
        match quotes {
            Quotes::Single => kelp_emit::QuoteStyle::Single,
            Quotes::Double => kelp_emit::QuoteStyle::Double,
            Quotes::Auto => kelp_emit::QuoteStyle::Auto,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lower {
            input,
            output,
            pretty,
            with_options,
            config,
            source_map,
            quotes,
            verbose,
        } => {
            logging::init(verbose);
            cmd_lower(
                input,
                output,
                pretty,
                with_options,
                config,
                source_map,
                quotes,
                verbose,
            )
        }
        Commands::Translate { names } => cmd_translate(names),
        Commands::Resolve {
            requirer,
            requirement,
        } => {
            println!("{}", kelp_lower::resolve(&requirer, &requirement));
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_lower(
    input: PathBuf,
    output: Option<PathBuf>,
    pretty: bool,
    with_options: bool,
    config: Option<PathBuf>,
    source_map: Option<String>,
    quotes: Option<Quotes>,
    verbose: bool,
) -> Result<()> {
    use colored::*;
    use kelp_emit::{EmitHelper, Emitter, EmitterConfig, JsonEmitter, OutputFormat, OutputStyle};
    use kelp_lower::{LowerError, SpecialForms};
    use std::fs;
    use std::io::IsTerminal;
    use std::time::Instant;
    use tracing::info;

    if verbose {
        eprintln!("{}", " Kelp Lowering".bright_blue().bold());
        eprintln!("{}", "=".repeat(50).bright_blue());
        eprintln!(" Input: {}", input.display());
        if let Some(ref out) = output {
            eprintln!(" Output: {}", out.display());
        }
        eprintln!();
    }

    let start = Instant::now();

    let ir = if input.as_os_str() == "-" {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(&input)?
    };

    let mut emitter_config = match config {
        Some(path) => serde_json::from_str::<EmitterConfig>(&fs::read_to_string(&path)?)?,
        None => EmitterConfig::default(),
    };
    if let Some(source) = source_map {
        emitter_config = emitter_config.with_source_map(source);
    }
    if let Some(quotes) = quotes {
        emitter_config.quotes = quotes.into();
    }

    let forms = kelp_core::ir::read_forms(&ir)?;
    info!("read {} top-level forms", forms.len());

    let special_forms = SpecialForms::builtin();
    let program = match kelp_lower::lower_program(&forms, &special_forms) {
        Ok(program) => program,
        Err(err) => {
            let mut stderr = std::io::stderr();
            let use_colors = stderr.is_terminal();
            EmitHelper::write_diagnostic(
                &mut stderr,
                use_colors,
                "error",
                &err.to_string(),
                LowerError::loc(&err),
            )?;
            return Err(anyhow!("Lowering failed"));
        }
    };

    let emitter = JsonEmitter::new(emitter_config)
        .with_format(if with_options {
            OutputFormat::WithOptions
        } else {
            OutputFormat::Program
        })
        .with_style(if pretty {
            OutputStyle::Pretty
        } else {
            OutputStyle::Compact
        });
    let document = emitter.emit_to_string(&program)?;

    if let Some(output_path) = output {
        fs::write(&output_path, &document)?;
        if verbose {
            let elapsed = start.elapsed();
            eprintln!(
                "\n {} Lowering successful!",
                "SUCCESS:".bright_green().bold()
            );
            eprintln!("   Time: {:.3}s", elapsed.as_secs_f64());
            eprintln!("   Output: {}", output_path.display());
        }
    } else {
        print!("{}", document);
    }

    Ok(())
}

fn cmd_translate(names: Vec<String>) -> Result<()> {
    use colored::*;

    if names.is_empty() {
        return Err(anyhow!("No names given"));
    }

    for name in names {
        let id = kelp_lower::translate_identifier(&name);
        if id == name {
            println!("{}", id);
        } else {
            println!("{} {} {}", name.dimmed(), "->".dimmed(), id.bright_green());
        }
    }
    Ok(())
}
