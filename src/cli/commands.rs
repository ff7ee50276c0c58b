//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use serde_json::Value;
use stencil_syntax::lexer::{self, LexerConfig};

use crate::config::TemplateConfig;
use crate::template::{Environment, Template};

use super::{CliError, CliResult, ExitCode};

/// Maximum template or data file size (10 MB).
const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// Read a file, refusing anything larger than `MAX_SOURCE_SIZE`.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE`
pub fn read_source(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "File '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))
}

/// Template name used in diagnostics: the path as given.
fn template_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn compile(path: &Path, config: &TemplateConfig) -> CliResult<Template> {
    let source = read_source(path)?;
    Environment::with_config(config.clone())
        .compile(&template_name(path), &source)
        .map_err(CliError::diagnostic)
}

/// Print one token per line.
pub fn print_tokens(path: &Path, trim_blocks: bool) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let config = LexerConfig::new().with_trim_blocks(trim_blocks);
    let tokens = lexer::lex(&template_name(path), &source, config).map_err(CliError::diagnostic)?;
    for tok in &tokens {
        println!("{}", tok);
    }
    Ok(ExitCode::SUCCESS)
}

/// Compile only; print `ok` on success.
pub fn check_file(path: &Path, config: &TemplateConfig) -> CliResult<ExitCode> {
    compile(path, config)?;
    println!("ok");
    Ok(ExitCode::SUCCESS)
}

/// Compile and render to stdout.
pub fn render_file(path: &Path, data_path: Option<&Path>, config: &TemplateConfig) -> CliResult<ExitCode> {
    let template = compile(path, config)?;
    let data = match data_path {
        Some(data_path) => load_data(data_path)?,
        None => Value::Null,
    };
    let output = template.execute_json(&data).map_err(CliError::diagnostic)?;
    print!("{}", output);
    Ok(ExitCode::SUCCESS)
}

fn load_data(path: &Path) -> CliResult<Value> {
    let text = read_source(path)?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::failure(format!("Invalid JSON in '{}': {}", path.display(), e)))
}
