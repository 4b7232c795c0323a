//! Error taxonomy for a compilation run.
//!
//! Every detected problem is fatal: there is no warning tier and no partial
//! output. Mapping code returns `TranspileResult` and propagates with `?`.

use thiserror::Error;

pub type TranspileResult<T> = Result<T, TranspileError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranspileError {
    /// The classifier or a sub-mapper has no rule for this node shape.
    ///
    /// `target` names the conversion that was attempted (`value`,
    /// `Expression`, `ObjectPatternItem`, ...).
    #[error("can't convert node of type: {kind} to {target} - not recognized")]
    Unsupported { kind: String, target: &'static str },

    /// Structurally valid input the target language cannot legally express.
    #[error("{message}")]
    IllegalSource { message: String },

    /// The front-end could not produce an input tree.
    #[error("front-end error: {message}")]
    Frontend { message: String },

    /// The legacy fallback compiler rejected a delegated node.
    #[error("fallback compiler failed on {kind}: {message}")]
    Fallback { kind: String, message: String },

    /// Input nesting exceeded `limits::MAX_AST_DEPTH`.
    #[error("input nesting exceeds the maximum depth of {limit}")]
    DepthLimit { limit: u32 },
}

impl TranspileError {
    pub fn unsupported(kind: impl Into<String>, target: &'static str) -> Self {
        Self::Unsupported {
            kind: kind.into(),
            target,
        }
    }

    pub fn illegal(message: impl Into<String>) -> Self {
        Self::IllegalSource {
            message: message.into(),
        }
    }

    pub fn frontend(message: impl Into<String>) -> Self {
        Self::Frontend {
            message: message.into(),
        }
    }

    /// True for errors caused by source the target language cannot express,
    /// as opposed to input the engine does not understand.
    pub const fn is_illegal_source(&self) -> bool {
        matches!(self, Self::IllegalSource { .. })
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics.rs"]
mod tests;
