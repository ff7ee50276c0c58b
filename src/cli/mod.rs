//! Command-line interface for stencil.
//!
//! ## Commands
//!
//! - `tokens <file>` - Print the token stream
//! - `check <file>` - Compile and report the first diagnostic, if any
//! - `render <file>` - Compile and render with JSON data
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::TemplateConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a diagnostic through miette's reporter.
    pub fn diagnostic(err: impl miette::Diagnostic + Send + Sync + 'static) -> Self {
        Self::failure(format!("{:?}", miette::Report::new(err)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Compile and render stencil templates
#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(version = VERSION)]
#[command(about = "Compile and render stencil templates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options that change how a template is compiled or rendered.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RenderOptions {
    /// Do not HTML-escape `{{ ... }}` output
    #[arg(long = "no-autoescape")]
    pub no_autoescape: bool,
    /// Drop the first newline after each `%}`
    #[arg(long = "trim-blocks")]
    pub trim_blocks: bool,
    /// Fail on undefined variables
    #[arg(long)]
    pub strict: bool,
}

impl RenderOptions {
    pub fn to_config(&self) -> TemplateConfig {
        TemplateConfig::new()
            .with_autoescape(!self.no_autoescape)
            .with_trim_blocks(self.trim_blocks)
            .with_strict_variables(self.strict)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream of a template
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Drop the first newline after each `%}`
        #[arg(long = "trim-blocks")]
        trim_blocks: bool,
    },

    /// Compile a template and report the first error
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        options: RenderOptions,
    },

    /// Compile and render a template
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// JSON file with the template data (an object)
        #[arg(long, value_name = "JSON FILE")]
        data: Option<PathBuf>,
        #[command(flatten)]
        options: RenderOptions,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Tokens { file, trim_blocks } => commands::print_tokens(&file, trim_blocks),
        Command::Check { file, options } => commands::check_file(&file, &options.to_config()),
        Command::Render { file, data, options } => {
            commands::render_file(&file, data.as_deref(), &options.to_config())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
