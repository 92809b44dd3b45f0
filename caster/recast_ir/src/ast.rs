//! Expression nodes.
//!
//! All children are arena indices, not boxes.

use std::fmt;

use super::{ExprId, Name};

/// Binary operator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    /// Addition: `a + b`
    Add,
    /// Subtraction: `a - b`
    Sub,
    /// Multiplication: `a * b`
    Mul,
}

impl BinaryOp {
    /// Source symbol for diagnostics.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Expression node.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Expr {
    /// Integer literal: `42`
    Int(i64),

    /// Variable reference
    Ident(Name),

    /// Binary operation: `left op right`
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// Call: `callee(args...)`
    ///
    /// The callee is an arbitrary expression; the dispatcher inspects its
    /// kind to decide receiver binding.
    Call { callee: ExprId, args: Vec<ExprId> },

    /// Attribute access: `receiver.field`
    Field { receiver: ExprId, field: Name },
}
