//! Compile options.
//!
//! The core only receives these; choosing them is the caller's business
//! (CLI flags, a config file, or a test harness).

use serde::{Deserialize, Serialize};

/// Quote character used for emitted string literals.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    Single,
    #[default]
    Double,
}

impl QuoteStyle {
    pub const fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }

    /// The quote character that does not need escaping under this style.
    pub const fn other(self) -> char {
        match self {
            Self::Single => '"',
            Self::Double => '\'',
        }
    }
}

/// Output formatting options passed through the whole pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileOptions {
    /// Spaces per indentation level.
    pub tab_width: usize,
    /// Quote style for string literals.
    pub quote: QuoteStyle,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            tab_width: 2,
            quote: QuoteStyle::Double,
        }
    }
}

impl CompileOptions {
    pub fn with_quote(mut self, quote: QuoteStyle) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// One level of indentation as a string.
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.tab_width)
    }
}

#[cfg(test)]
#[path = "../tests/options.rs"]
mod tests;
