//! Tracing configuration.
//!
//! Supports three output formats controlled by `CSZ_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Which nodes went to the fallback compiler, as a tree
//! CSZ_LOG=debug CSZ_LOG_FORMAT=tree csz tree.json
//!
//! # Everything, machine-readable
//! CSZ_LOG=trace CSZ_LOG_FORMAT=json csz tree.json
//!
//! # Fine-grained filtering
//! CSZ_LOG="csz_emitter::lowering=trace,csz_emitter::passes=debug" csz tree.json
//! ```
//!
//! The subscriber is only initialised when `CSZ_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a `CSZ_LOG_FORMAT` value. Unknown values fall back to text.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("CSZ_LOG_FORMAT").unwrap_or_default())
    }
}

/// `CSZ_LOG` takes precedence over `RUST_LOG`; both use the `RUST_LOG`
/// directive syntax.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("CSZ_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `CSZ_LOG` nor `RUST_LOG` is set. All output goes
/// to stderr so it never mixes with compiled code on stdout.
pub fn init_tracing() {
    let has_csz_log = std::env::var("CSZ_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_csz_log && !has_rust_log {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
