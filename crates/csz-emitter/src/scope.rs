//! Lexical scope tracking and fresh-name generation.
//!
//! `ScopeStack` is an explicit stack of binding frames pushed on entry to a
//! function, method, catch clause or loop head and popped on exit. Lookup
//! walks the stack from the innermost frame outward; nothing is derived from
//! the shape of the output tree.

use rustc_hash::FxHashSet;

/// One frame of bindings.
#[derive(Debug, Default)]
pub struct Frame {
    names: FxHashSet<String>,
    /// Function-level frame that receives hoisted declarations.
    hoisting: bool,
}

impl Frame {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub const fn is_hoisting(&self) -> bool {
        self.hoisting
    }
}

/// Stack of binding frames, innermost last.
#[derive(Debug)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    /// A stack holding only the program frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame {
                names: FxHashSet::default(),
                hoisting: true,
            }],
        }
    }

    pub fn push(&mut self, hoisting: bool) {
        self.frames.push(Frame {
            names: FxHashSet::default(),
            hoisting,
        });
    }

    /// Pop the innermost frame. The program frame is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind `name` in the innermost frame.
    pub fn declare(&mut self, name: impl Into<String>) {
        if let Some(frame) = self.frames.last_mut() {
            frame.names.insert(name.into());
        }
    }

    /// Bind `name` in the nearest function-level frame.
    pub fn declare_hoisted(&mut self, name: impl Into<String>) {
        if let Some(frame) = self.frames.iter_mut().rev().find(|frame| frame.hoisting) {
            frame.names.insert(name.into());
        }
    }

    /// True when any enclosing frame binds `name`.
    pub fn is_bound(&self, name: &str) -> bool {
        self.frames.iter().rev().any(|frame| frame.contains(name))
    }
}

/// Generator for synthesized identifiers.
///
/// Seeded with every identifier of the input program so a synthesized name
/// never captures or shadows a user binding.
#[derive(Debug, Default)]
pub struct NameGenerator {
    taken: FxHashSet<String>,
}

impl NameGenerator {
    pub const fn new(taken: FxHashSet<String>) -> Self {
        Self { taken }
    }

    /// Reserve a name derived from `base`: `base`, `base1`, `base2`, ...
    pub fn fresh(&mut self, base: &str) -> String {
        let name = self.unused(base);
        self.taken.insert(name.clone());
        name
    }

    /// First name derived from `base` that is not taken, without reserving
    /// it. Used for parameters and locals of synthesized functions, which
    /// only need to avoid input names.
    pub fn unused(&self, base: &str) -> String {
        if !self.taken.contains(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}{n}"))
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }
}

#[cfg(test)]
#[path = "../tests/scope.rs"]
mod tests;
