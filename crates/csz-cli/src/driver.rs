//! Reads the input, compiles it and writes the result.

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

use csz::CompileOptions;

use crate::args::CliArgs;
use crate::config::{CszConfig, load_config};

/// Options for this invocation: config file first, flags on top.
pub fn resolve_options(args: &CliArgs) -> Result<CompileOptions> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => CszConfig::default(),
    };
    Ok(config.resolve(args))
}

pub fn read_input(args: &CliArgs) -> Result<String> {
    match args.input.as_deref() {
        Some(path) if !args.reads_stdin() => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}

/// Display name of the input for error messages.
fn input_name(args: &CliArgs) -> String {
    match args.input.as_deref() {
        Some(path) if !args.reads_stdin() => path.display().to_string(),
        _ => "<stdin>".to_string(),
    }
}

pub fn compile_source(args: &CliArgs, source: &str) -> Result<String> {
    let options = resolve_options(args)?;
    debug!(tab_width = options.tab_width, quote = ?options.quote, "resolved options");
    csz::compile(source, &options).with_context(|| format!("failed to compile {}", input_name(args)))
}

pub fn write_output(path: &Path, code: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, format!("{code}\n"))
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Run one compilation end to end.
pub fn run(args: &CliArgs) -> Result<()> {
    let source = read_input(args)?;
    let code = compile_source(args, &source)?;
    match &args.out_file {
        Some(path) => {
            write_output(path, &code)?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{code}").context("failed to write stdout")?;
        }
    }
    Ok(())
}
