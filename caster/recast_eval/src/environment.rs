//! Environment for name scoping in the evaluator.
//!
//! Scopes form an `Rc`-shared chain so that function values can capture
//! their defining frame by reference: a lookup through a captured chain
//! sees bindings created after the capture, and frames stay alive for as
//! long as any function value closes over them.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use recast_ir::Name;

use crate::value::Value;

/// A single-threaded scope wrapper for reference-counted interior
/// mutability.
///
/// Wraps `Rc<RefCell<T>>` and enforces that scope allocations go through
/// the `LocalScope::new()` factory. These scopes are intentionally `Rc`,
/// not `Arc`: the evaluator is single-threaded by design.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    /// Create a new `LocalScope` wrapping the given value.
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Borrow the inner value immutably.
    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the inner value mutably.
    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Check whether two wrappers share the same allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

/// A single frame of name bindings.
pub struct Scope {
    /// Bindings in this frame (`FxHashMap` for faster hashing with `Name`
    /// keys).
    bindings: FxHashMap<Name, Value>,
    /// Parent frame (lexical scoping).
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    /// Create a new empty frame with no parent.
    pub fn new() -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: None,
        }
    }

    /// Create a new frame chained to a parent.
    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind a name in this frame, overwriting any existing binding here.
    /// Outer frames are never touched.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Look up a name, walking frames innermost-first.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.bindings.get(&name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bindings may cycle back through captured scopes; print keys only.
        f.debug_struct("Scope")
            .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// Environment for the evaluator.
///
/// Holds the current frame and the module frame. The module frame is the
/// process-wide bottom of every chain: it is created once at program
/// start, and activation frames for calls chain to the callee's captured
/// scope, whose chain bottoms out in the same module frame.
pub struct Environment {
    /// Current (innermost) frame.
    current: LocalScope<Scope>,
    /// Module-level frame (always at the bottom of the chain).
    module: LocalScope<Scope>,
}

impl Environment {
    /// Create a new environment with a single module frame.
    pub fn new() -> Self {
        let module = LocalScope::new(Scope::new());
        Environment {
            current: module.clone(),
            module,
        }
    }

    /// Bind a name in the current frame.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.current.borrow_mut().define(name, value);
    }

    /// Look up a name, walking the chain innermost-first.
    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.current.borrow().lookup(name)
    }

    /// Look up a name in the module frame only.
    pub fn lookup_module(&self, name: Name) -> Option<Value> {
        self.module.borrow().bindings.get(&name).cloned()
    }

    /// Capture the current frame for a function defined here.
    ///
    /// The returned reference shares the live frame: bindings created
    /// after the capture are visible through it.
    #[must_use]
    pub fn capture(&self) -> LocalScope<Scope> {
        self.current.clone()
    }

    /// Create the activation environment for a call.
    ///
    /// The fresh frame chains to the callee's *captured* scope, not to the
    /// caller's chain (lexical, not dynamic, scoping).
    #[must_use]
    pub fn activation(&self, captured: &LocalScope<Scope>) -> Environment {
        Environment {
            current: LocalScope::new(Scope::with_parent(captured.clone())),
            module: self.module.clone(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use recast_ir::StringInterner;

    #[test]
    fn test_scope_define_lookup() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let mut scope = Scope::new();
        scope.define(x, Value::int(42));
        assert_eq!(scope.lookup(x), Some(Value::int(42)));
    }

    #[test]
    fn test_scope_shadowing() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let parent = LocalScope::new(Scope::new());
        parent.borrow_mut().define(x, Value::int(1));

        let mut child = Scope::with_parent(parent);
        child.define(x, Value::int(2));

        // Child's binding shadows parent's
        assert_eq!(child.lookup(x), Some(Value::int(2)));
    }

    #[test]
    fn test_define_never_rebinds_outer_frame() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let parent = LocalScope::new(Scope::new());
        parent.borrow_mut().define(x, Value::int(1));

        let mut child = Scope::with_parent(parent.clone());
        child.define(x, Value::int(2));

        assert_eq!(parent.borrow().lookup(x), Some(Value::int(1)));
    }

    #[test]
    fn test_activation_resolves_through_captured_chain() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let mut env = Environment::new();
        env.define(x, Value::int(99));

        let captured = env.capture();
        let activation = env.activation(&captured);
        assert_eq!(activation.lookup(x), Some(Value::int(99)));
    }

    #[test]
    fn test_capture_returns_the_same_frame() {
        let env = Environment::new();
        let first = env.capture();
        let second = env.capture();
        assert!(LocalScope::ptr_eq(&first, &second));
    }

    #[test]
    fn test_capture_shares_live_frame() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let mut env = Environment::new();
        let captured = env.capture();

        // Binding created after the capture is visible through it.
        env.define(x, Value::int(7));
        assert_eq!(captured.borrow().lookup(x), Some(Value::int(7)));
    }

    #[test]
    fn test_activation_frame_is_private_to_the_call() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let env = Environment::new();
        let captured = env.capture();
        let mut activation = env.activation(&captured);
        activation.define(x, Value::int(5));

        assert_eq!(env.lookup(x), None);
    }

    #[test]
    fn test_lookup_module_skips_local_frames() {
        let interner = StringInterner::new();
        let x = interner.intern("x");

        let mut env = Environment::new();
        env.define(x, Value::int(1));

        let captured = env.capture();
        let mut activation = env.activation(&captured);
        activation.define(x, Value::int(2));

        assert_eq!(activation.lookup(x), Some(Value::int(2)));
        assert_eq!(activation.lookup_module(x), Some(Value::int(1)));
    }
}
