//! Compilation pipeline.
//!
//! ```text
//! source --Frontend--> Node --Lowerer--> JsNode --passes--> JsNode --IrPrinter--> text
//! ```
//!
//! Every stage is fatal on error; there is no partial output.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use csz_ast::{Frontend, JsonFrontend, Node};
use csz_common::{CompileOptions, TranspileResult};

use crate::ir::JsNode;
use crate::ir_printer::IrPrinter;
use crate::legacy::{BuiltinLegacyCompiler, LegacyCompiler};
use crate::lowering::Lowerer;
use crate::passes;

/// Runs of semicolons left where a fragment's own `;` meets a statement end.
static REPEATED_SEMICOLONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r";{2,}").expect("valid regex"));

/// Map `root` to a target program with all passes applied and helper
/// definitions prepended.
#[tracing::instrument(level = "debug", skip_all, fields(root = root.kind()))]
pub fn lower(
    root: &Node,
    options: &CompileOptions,
    legacy: &dyn LegacyCompiler,
) -> TranspileResult<JsNode> {
    let mut lowerer = Lowerer::new(options, legacy, root);
    let mut statements = lowerer.lower_program(root)?;
    passes::run_all(&mut statements);

    let helpers = lowerer.into_helpers();
    if !helpers.is_empty() {
        let mut program = helpers.definitions();
        debug!(helpers = program.len(), "prepending helper definitions");
        program.append(&mut statements);
        statements = program;
    }
    Ok(JsNode::Program(statements))
}

/// Transpile an input tree with the built-in fallback compiler.
pub fn transpile(root: &Node, options: &CompileOptions) -> TranspileResult<String> {
    transpile_with(root, options, &BuiltinLegacyCompiler)
}

#[tracing::instrument(level = "info", skip_all)]
pub fn transpile_with(
    root: &Node,
    options: &CompileOptions,
    legacy: &dyn LegacyCompiler,
) -> TranspileResult<String> {
    let program = lower(root, options, legacy)?;
    let code = IrPrinter::print(&program, options);
    let code = REPEATED_SEMICOLONS.replace_all(&code, ";").into_owned();
    info!(bytes = code.len(), "transpiled");
    Ok(code)
}

/// Compile a JSON node dump.
pub fn compile(source: &str, options: &CompileOptions) -> TranspileResult<String> {
    compile_with(source, options, &JsonFrontend)
}

/// Compile source text through `frontend`.
pub fn compile_with(
    source: &str,
    options: &CompileOptions,
    frontend: &dyn Frontend,
) -> TranspileResult<String> {
    let root = frontend.parse(source)?;
    transpile(&root, options)
}

#[cfg(test)]
#[path = "../tests/pipeline.rs"]
mod tests;
