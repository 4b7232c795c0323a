//! Per-call mapping context.
//!
//! Threaded by value through every mapping call and overridden at the call
//! site with the `with_*` methods. Mutable state (scopes, helpers, names)
//! lives on the `Lowerer`, not here.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapContext<'a> {
    /// Pattern (assignment target) position rather than value position.
    pub left: bool,
    /// Name of the enclosing class method, `constructor` inside a
    /// constructor. `None` outside methods and inside plain nested functions.
    pub method: Option<&'a str>,
    /// The enclosing class has a superclass.
    pub is_subclass: bool,
    /// Inside an arrow nested in `method`. `arguments` there is the
    /// method's, not the arrow's.
    pub in_arrow: bool,
}

impl<'a> MapContext<'a> {
    #[must_use]
    pub const fn with_left(self) -> Self {
        Self { left: true, ..self }
    }

    /// Value position.
    #[must_use]
    pub const fn value(self) -> Self {
        Self {
            left: false,
            ..self
        }
    }

    /// Body of the method `name` of a class.
    #[must_use]
    pub const fn for_method(self, name: &'a str, is_subclass: bool) -> Self {
        Self {
            left: false,
            method: Some(name),
            is_subclass,
            in_arrow: false,
        }
    }

    /// Body of a bound function; keeps the enclosing method.
    #[must_use]
    pub const fn for_arrow(self) -> Self {
        Self {
            left: false,
            in_arrow: true,
            ..self
        }
    }

    /// Body of a plain (unbound) function: `super` has no method to refer to.
    #[must_use]
    pub const fn for_plain_function(self) -> Self {
        Self {
            left: false,
            method: None,
            is_subclass: false,
            in_arrow: false,
        }
    }

    pub fn in_constructor(&self) -> bool {
        self.method == Some("constructor")
    }
}
