//! Runtime values for the recast evaluator.
//!
//! The value set is a fixed, closed tagged union: integers, function
//! values, class descriptors, and instances. Construction goes through
//! factory methods; `type_name()` names values for diagnostics.
//!
//! Reference variants (`Function`, `Instance`, `Class`) share their data
//! behind `Rc` and compare by identity. The evaluator is single-threaded,
//! so reference counting is `Rc`, not `Arc`.

use std::fmt;
use std::rc::Rc;

use recast_ir::{FunctionDef, Name, Stmt};

use crate::environment::{LocalScope, Scope};
use crate::object::{ClassValue, InstanceValue};

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// Integer value.
    Int(i64),
    /// Function value (closure).
    Function(FunctionValue),
    /// Object instance.
    Instance(InstanceValue),
    /// Class descriptor.
    Class(ClassValue),
}

impl Value {
    /// Create an integer value.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// Try to read an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Function(_) => "function",
            Value::Instance(_) => "instance",
            Value::Class(_) => "class",
        }
    }
}

impl PartialEq for Value {
    /// Integers compare structurally; reference variants compare by
    /// identity (two clones of one function value are equal, two separate
    /// definitions are not).
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => FunctionValue::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => InstanceValue::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => ClassValue::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Function(func) => fmt::Debug::fmt(func, f),
            Value::Instance(instance) => fmt::Debug::fmt(instance, f),
            Value::Class(class) => fmt::Debug::fmt(class, f),
        }
    }
}

/// Shared function data.
struct FunctionData {
    name: Name,
    params: Rc<[Name]>,
    body: Rc<[Stmt]>,
    /// Defining frame, captured by reference at definition time.
    captured: LocalScope<Scope>,
}

/// Function value: parameter list, body, and captured defining scope.
///
/// Data is `Rc`-shared: an instance attribute and a module binding may
/// hold the same function value, and both keep the captured frame alive.
#[derive(Clone)]
pub struct FunctionValue(Rc<FunctionData>);

impl FunctionValue {
    /// Create a function value from its definition and the scope active
    /// at the definition site.
    pub fn new(def: &FunctionDef, captured: LocalScope<Scope>) -> Self {
        FunctionValue(Rc::new(FunctionData {
            name: def.name,
            params: Rc::clone(&def.params),
            body: Rc::clone(&def.body),
            captured,
        }))
    }

    /// Function name.
    pub fn name(&self) -> Name {
        self.0.name
    }

    /// Declared parameter names, in order.
    pub fn params(&self) -> &[Name] {
        &self.0.params
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.0.params.len()
    }

    /// Body statements (shared).
    pub fn body(&self) -> Rc<[Stmt]> {
        Rc::clone(&self.0.body)
    }

    /// Captured defining scope.
    pub fn captured(&self) -> &LocalScope<Scope> {
        &self.0.captured
    }

    /// Check whether two function values share the same data.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The captured scope may contain this function; omit it.
        f.debug_struct("FunctionValue")
            .field("name", &self.0.name)
            .field("params", &self.0.params)
            .finish_non_exhaustive()
    }
}
