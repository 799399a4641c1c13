//! FFI binding generator driver
//!
//! Loads a declaration file, lowers every declared function to the native
//! call boundary and prints the resulting prototypes and call expressions.

mod declarations;
mod render;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use declarations::load_declarations;
use ffigen_common::{Diagnostic, ErrorReporter, GeneratorError};
use ffigen_lower::GenerationMode;
use log::info;
use render::{render_all, RenderOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ffigen")]
#[command(about = "FFI binding generator")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower the functions of a declaration file
    Lower {
        /// Input declaration file (JSON)
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generation mode used for call expressions
        #[arg(long, value_enum, default_value_t = Mode::Normal)]
        mode: Mode,

        /// Ignore the declared binding and emit full native types
        #[arg(long)]
        no_binding: bool,

        /// Also emit the plain overload of functions with array modifiers
        #[arg(long)]
        base_overloads: bool,
    },

    /// Check a declaration file without emitting anything
    Check {
        /// Input declaration file (JSON)
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Normal,
    Alternative,
}

impl From<Mode> for GenerationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Normal => GenerationMode::Normal,
            Mode::Alternative => GenerationMode::Alternative,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::init();
    }

    match cli.command {
        Commands::Lower { input, output, mode, no_binding, base_overloads } => {
            let options = RenderOptions { mode: mode.into(), base_overloads };
            lower_command(&input, output, options, no_binding)
        }
        Commands::Check { input } => check_command(&input),
    }
}

fn lower_command(
    input: &Path,
    output: Option<PathBuf>,
    options: RenderOptions,
    no_binding: bool,
) -> Result<()> {
    let file = load_declarations(input)?;
    let functions = file.build_functions()?;
    let binding = if no_binding { None } else { file.binding.as_ref() };
    info!("lowering {} functions from {}", functions.len(), input.display());

    let mut reporter = ErrorReporter::new();
    let text = render_all(&functions, binding, options, &mut reporter);

    if reporter.has_errors() {
        reporter.print_diagnostics();
        bail!("lowering failed: {}", reporter.summary());
    }

    match output {
        Some(path) => {
            fs::write(&path, &text)?;
            info!("wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn check_command(input: &Path) -> Result<()> {
    let file = load_declarations(input)?;
    let types = file.resolve_types()?;
    let mut reporter = ErrorReporter::new();

    for decl in &file.functions {
        match decl.build(&types) {
            Ok(function) => {
                for mode in [GenerationMode::Normal, GenerationMode::Alternative] {
                    if let Err(err) = function.native_call(file.binding.as_ref(), mode) {
                        let err = GeneratorError::from(err);
                        reporter.report(Diagnostic::from(&err));
                        break;
                    }
                }
                if function.has_unsafe_method && file.binding.is_none() {
                    reporter.warning(
                        format!("`{}` declares an unsafe variant but the file has no binding", function.name),
                        None,
                    );
                }
            }
            Err(err) => {
                reporter.report(Diagnostic::from(&err));
            }
        }
    }

    reporter.print_diagnostics();
    if reporter.has_errors() {
        bail!("{}", reporter.summary());
    }
    println!("{}: {}", input.display(), reporter.summary());
    Ok(())
}
