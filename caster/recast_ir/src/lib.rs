//! Recast IR - program representation for the recast semantics evaluator.
//!
//! The caster's parsing front end is an external collaborator; programs
//! arrive here already structured. This crate provides:
//!
//! - `Name` / `StringInterner`: compact interned identifiers
//! - `ExprArena` / `ExprId`: contiguous expression storage, no `Box<Expr>`
//! - `Expr`, `Stmt`, `ClassDef`, `FunctionDef`: the node types
//! - `Program` / `ProgramBuilder`: whole-program construction

mod arena;
mod ast;
mod interner;
mod name;
mod program;
mod stmt;

pub use arena::{ExprArena, ExprId};
pub use ast::{BinaryOp, Expr};
pub use interner::StringInterner;
pub use name::Name;
pub use program::{Program, ProgramBuilder};
pub use stmt::{ClassDef, ClassMember, FunctionDef, Stmt};
