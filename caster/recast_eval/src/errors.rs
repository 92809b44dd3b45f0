//! Evaluation error types.
//!
//! `EvalErrorKind` provides typed error categories; factory functions are
//! the construction path and populate the structured payload. All errors
//! are detected synchronously at the offending operation and propagate to
//! the top level unrecovered; there is no retry or best-effort mode.

use std::fmt;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
///
/// Each variant carries the structured data for its condition, enabling
/// programmatic matching instead of string parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// A name lookup exhausted the environment chain.
    NameNotFound { name: String },

    /// An attribute was found neither in the instance's own storage nor
    /// in its class's storage.
    AttributeNotFound { attribute: String },

    /// An operand had the wrong type for the operation.
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    /// A call supplied the wrong number of arguments.
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// The callee is not a function or class value.
    NotCallable { type_name: &'static str },

    /// Checked integer arithmetic overflowed.
    IntegerOverflow { operation: &'static str },

    /// Call depth exceeded the configured recursion limit.
    StackOverflow { depth: usize },

    /// A function body completed without a return or final expression.
    MissingReturn { name: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameNotFound { name } => write!(f, "name not found: {name}"),
            Self::AttributeNotFound { attribute } => {
                write!(f, "attribute not found: {attribute}")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                if name.is_empty() {
                    write!(f, "expected {expected} {arg_word}, got {got}")
                } else {
                    write!(f, "{name} expects {expected} {arg_word}, got {got}")
                }
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::IntegerOverflow { operation } => {
                write!(f, "integer overflow in {operation}")
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum recursion depth exceeded (limit: {depth})")
            }
            Self::MissingReturn { name } => {
                write!(f, "function {name} produced no value")
            }
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        Self { kind }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for EvalError {}

// Factory functions

/// Name lookup exhausted the environment chain.
pub fn name_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NameNotFound {
        name: name.to_string(),
    })
}

/// Attribute missing from both instance and class storage.
pub fn attribute_not_found(attribute: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AttributeNotFound {
        attribute: attribute.to_string(),
    })
}

/// Operand type does not fit the operation.
pub fn type_mismatch(expected: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { expected, got })
}

/// Wrong number of call arguments.
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Callee is not a function or class value.
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

/// Checked integer arithmetic overflowed.
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

/// Call depth exceeded the recursion limit.
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

/// Function body completed without producing a value.
pub fn missing_return(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingReturn {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_not_found_message() {
        let err = name_not_found("base_init");
        assert_eq!(err.to_string(), "name not found: base_init");
    }

    #[test]
    fn test_attribute_not_found_message() {
        let err = attribute_not_found("contents");
        assert_eq!(err.to_string(), "attribute not found: contents");
    }

    #[test]
    fn test_arity_mismatch_pluralization() {
        let one = arity_mismatch("id", 1, 2);
        assert_eq!(one.to_string(), "id expects 1 argument, got 2");
        let many = arity_mismatch("foo", 3, 2);
        assert_eq!(many.to_string(), "foo expects 3 arguments, got 2");
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = type_mismatch("int", "function");
        assert_eq!(err.to_string(), "type mismatch: expected int, got function");
    }

    #[test]
    fn test_not_callable_message() {
        let err = not_callable("int");
        assert_eq!(err.to_string(), "int is not callable");
    }

    #[test]
    fn test_error_kind_is_matchable() {
        let err = recursion_limit_exceeded(1000);
        assert!(matches!(
            err.kind,
            EvalErrorKind::StackOverflow { depth: 1000 }
        ));
    }
}
