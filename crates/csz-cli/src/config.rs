//! Formatting defaults read from a JSON config file.
//!
//! ```json
//! { "tabWidth": 4, "quote": "single" }
//! ```
//!
//! Both keys are optional. Command-line flags override whatever the file
//! sets.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use csz::{CompileOptions, QuoteStyle};

use crate::args::CliArgs;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CszConfig {
    #[serde(default)]
    pub tab_width: Option<usize>,
    #[serde(default)]
    pub quote: Option<QuoteStyle>,
}

impl CszConfig {
    /// Layer `self` over the defaults, then the command-line flags over that.
    pub fn resolve(&self, args: &CliArgs) -> CompileOptions {
        let mut options = CompileOptions::default();
        if let Some(tab_width) = args.tab_width.or(self.tab_width) {
            options = options.with_tab_width(tab_width);
        }
        if let Some(quote) = args.quote.map(QuoteStyle::from).or(self.quote) {
            options = options.with_quote(quote);
        }
        options
    }
}

pub fn parse_config(source: &str) -> Result<CszConfig> {
    let config = serde_json::from_str(source).context("failed to parse config JSON")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<CszConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}
