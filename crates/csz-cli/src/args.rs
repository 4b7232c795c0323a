use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use csz::QuoteStyle;

/// CLI arguments for the csz binary.
#[derive(Parser, Debug)]
#[command(
    name = "csz",
    version,
    about = "Transpile a CoffeeScript node tree into JavaScript"
)]
pub struct CliArgs {
    /// JSON node dump to compile. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Write the output to this file instead of stdout.
    #[arg(short = 'o', long = "out-file", alias = "outFile")]
    pub out_file: Option<PathBuf>,

    /// JSON file with `tabWidth` and `quote` defaults.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // ==================== Formatting ====================
    /// Spaces per indentation level.
    #[arg(long = "tab-width", alias = "tabWidth")]
    pub tab_width: Option<usize>,

    /// Quote character for string literals.
    #[arg(long, value_enum, ignore_case = true)]
    pub quote: Option<Quote>,
}

impl CliArgs {
    /// True when the source comes from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input
            .as_deref()
            .is_none_or(|path| path.as_os_str() == "-")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Quote {
    Single,
    Double,
}

impl From<Quote> for QuoteStyle {
    fn from(quote: Quote) -> Self {
        match quote {
            Quote::Single => Self::Single,
            Quote::Double => Self::Double,
        }
    }
}
