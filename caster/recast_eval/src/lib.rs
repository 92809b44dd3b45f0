//! Recast Eval - object/attribute resolution and call-binding evaluator.
//!
//! This crate executes parsed programs with exact dynamic-object
//! semantics: closures, first-class function values, instance-vs-class
//! attribute resolution, and late (call-time) method binding.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Value`: closed tagged union of runtime values
//! - `Environment`: name scoping with `Rc`-shared frames
//! - `object::get_attr` / `object::set_attr`: two-tier attribute
//!   resolution, instance storage before class storage
//! - `Interpreter`: tree-walking execution; the call dispatcher decides
//!   receiver binding from the callee's provenance
//!
//! # Semantics pinned here
//!
//! An instance-level write permanently shadows the class's attribute of
//! the same name for that instance, and a shadowed callee is invoked as a
//! plain function, with no receiver injection, even when the class still
//! defines a method of that name. The built-in `fixtures` exercise
//! exactly these rules.

mod environment;
pub mod errors;
pub mod fixtures;
mod interpreter;
mod object;
mod operators;
mod print_handler;
mod stack;
mod value;

pub use environment::{Environment, LocalScope, Scope};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_RECURSION_LIMIT};
pub use object::{get_attr, set_attr, AttrOrigin, ClassValue, InstanceValue};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler,
    StdoutPrintHandler,
};
pub use stack::ensure_sufficient_stack;
pub use value::{FunctionValue, Value};
