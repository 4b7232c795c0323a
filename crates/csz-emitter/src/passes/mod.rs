//! Structural post-passes over the mapped program.
//!
//! The lowerer builds the target tree in one top-down walk. A few rewrites
//! need the finished tree (a whole function body, or every case of a
//! `switch`) and run afterwards, in this order:
//!
//! 1. `declarations` - turn first assignments into `var` declarations and
//!    hoist declarations for names first assigned inside an expression
//! 2. `super_calls` - give derived constructors the `super(...)` call the
//!    target requires
//! 3. `switch_breaks` - end every non-final, non-terminated case in `break`
//!
//! `returns` is not a tree-wide pass; the lowerer applies it to every
//! function body it builds.

pub mod declarations;
pub mod returns;
pub mod super_calls;
pub mod switch_breaks;

use crate::ir::JsNode;

/// Run every tree-wide pass over a program body.
pub fn run_all(program: &mut Vec<JsNode>) {
    declarations::insert_declarations(program);
    super_calls::insert_super_calls(program);
    switch_breaks::insert_switch_breaks(program);
}
