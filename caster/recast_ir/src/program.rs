//! Whole-program construction.
//!
//! The caster's parsing front end produces structured programs; this
//! module is its stand-in. `ProgramBuilder` interns names, allocates
//! expressions, and assembles the statement list in one pass.

use super::{
    BinaryOp, ClassDef, ClassMember, Expr, ExprArena, ExprId, FunctionDef, Name, StringInterner,
    Stmt,
};

/// A complete program: interner, expression arena, and top-level body.
///
/// The top-level body executes in the module frame; `Print` statements are
/// the program's only external effect.
pub struct Program {
    pub interner: StringInterner,
    pub arena: ExprArena,
    pub body: Vec<Stmt>,
}

/// Builder assembling a `Program`.
///
/// Expression constructors allocate into the arena and return ids;
/// statement constructors return `Stmt` values so they can be nested into
/// function and class bodies before being pushed at top level.
pub struct ProgramBuilder {
    interner: StringInterner,
    arena: ExprArena,
    body: Vec<Stmt>,
}

impl ProgramBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        ProgramBuilder {
            interner: StringInterner::new(),
            arena: ExprArena::new(),
            body: Vec::new(),
        }
    }

    /// Intern an identifier.
    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Integer literal expression.
    pub fn int(&mut self, value: i64) -> ExprId {
        self.arena.alloc(Expr::Int(value))
    }

    /// Variable reference expression.
    pub fn ident(&mut self, name: &str) -> ExprId {
        let name = self.name(name);
        self.arena.alloc(Expr::Ident(name))
    }

    /// Binary operation expression.
    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.arena.alloc(Expr::Binary { op, left, right })
    }

    /// Addition expression.
    pub fn add(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.binary(BinaryOp::Add, left, right)
    }

    /// Call expression.
    pub fn call(&mut self, callee: ExprId, args: Vec<ExprId>) -> ExprId {
        self.arena.alloc(Expr::Call { callee, args })
    }

    /// Attribute access expression.
    pub fn field(&mut self, receiver: ExprId, field: &str) -> ExprId {
        let field = self.name(field);
        self.arena.alloc(Expr::Field { receiver, field })
    }

    /// Binding assignment statement.
    pub fn assign(&self, name: &str, value: ExprId) -> Stmt {
        Stmt::Assign {
            name: self.name(name),
            value,
        }
    }

    /// Attribute assignment statement.
    pub fn assign_field(&self, receiver: ExprId, field: &str, value: ExprId) -> Stmt {
        Stmt::AssignField {
            receiver,
            field: self.name(field),
            value,
        }
    }

    /// Function definition.
    pub fn function_def(&self, name: &str, params: &[&str], body: Vec<Stmt>) -> FunctionDef {
        let params = params.iter().map(|p| self.name(p)).collect();
        FunctionDef::new(self.name(name), params, body)
    }

    /// Function definition statement.
    pub fn def(&self, name: &str, params: &[&str], body: Vec<Stmt>) -> Stmt {
        Stmt::Def(self.function_def(name, params, body))
    }

    /// Class definition statement.
    pub fn class(&self, name: &str, members: Vec<ClassMember>) -> Stmt {
        Stmt::Class(ClassDef {
            name: self.name(name),
            members,
        })
    }

    /// Class-level attribute member.
    pub fn attr_member(&self, name: &str, value: ExprId) -> ClassMember {
        ClassMember::Attr {
            name: self.name(name),
            value,
        }
    }

    /// Return statement.
    pub fn ret(&self, value: ExprId) -> Stmt {
        Stmt::Return(value)
    }

    /// Expression statement.
    pub fn expr_stmt(&self, value: ExprId) -> Stmt {
        Stmt::Expr(value)
    }

    /// Print statement.
    pub fn print(&self, value: ExprId) -> Stmt {
        Stmt::Print(value)
    }

    /// Push a statement onto the top-level body.
    pub fn push(&mut self, stmt: Stmt) {
        self.body.push(stmt);
    }

    /// Finish, yielding the assembled program.
    pub fn finish(self) -> Program {
        Program {
            interner: self.interner,
            arena: self.arena,
            body: self.body,
        }
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_assembles_program() {
        let mut b = ProgramBuilder::new();
        let ten = b.int(10);
        let stmt = b.assign("x", ten);
        b.push(stmt);
        let x = b.ident("x");
        let print = b.print(x);
        b.push(print);

        let program = b.finish();
        assert_eq!(program.body.len(), 2);
        assert_eq!(program.arena.len(), 2);
        let x = program.interner.intern("x");
        assert!(matches!(
            &program.body[0],
            Stmt::Assign { name, .. } if *name == x
        ));
    }

    #[test]
    fn test_builder_interns_identifiers_once() {
        let mut b = ProgramBuilder::new();
        let first = b.ident("foo");
        let second = b.ident("foo");
        let program = b.finish();
        let foo = program.interner.intern("foo");
        assert_eq!(program.arena.get(first), &Expr::Ident(foo));
        assert_eq!(program.arena.get(second), &Expr::Ident(foo));
    }

    #[test]
    fn test_function_def_arity() {
        let b = ProgramBuilder::new();
        let def = b.function_def("f", &["a", "b"], vec![]);
        assert_eq!(def.arity(), 2);
    }
}
