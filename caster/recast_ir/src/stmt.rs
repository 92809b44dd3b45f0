//! Statement nodes.

use std::rc::Rc;

use super::{ExprId, Name};

/// Statement node.
#[derive(Clone, Debug)]
pub enum Stmt {
    /// Binding assignment: `name = value`
    ///
    /// Binds in the current (innermost) frame; never rebinds outer frames.
    Assign { name: Name, value: ExprId },

    /// Attribute assignment: `receiver.field = value`
    ///
    /// Always writes the receiver instance's own storage.
    AssignField {
        receiver: ExprId,
        field: Name,
        value: ExprId,
    },

    /// Function definition: `def name(params): body`
    Def(FunctionDef),

    /// Class definition: `class name: members`
    Class(ClassDef),

    /// Return from the enclosing function: `return value`
    Return(ExprId),

    /// Expression statement; its value is the implicit result of a
    /// function body that falls off the end.
    Expr(ExprId),

    /// Print the value of an expression, followed by a newline.
    Print(ExprId),
}

/// A function definition.
///
/// Parameter list and body are shared (`Rc`) so that the function value
/// created at definition time references them without cloning.
#[derive(Clone, Debug)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Rc<[Name]>,
    pub body: Rc<[Stmt]>,
}

impl FunctionDef {
    /// Create a function definition.
    pub fn new(name: Name, params: Vec<Name>, body: Vec<Stmt>) -> Self {
        FunctionDef {
            name,
            params: params.into(),
            body: body.into(),
        }
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A class definition.
///
/// Class bodies hold attribute initializers and method definitions only,
/// so class-level storage is fully populated at definition time and never
/// mutated afterwards.
#[derive(Clone, Debug)]
pub struct ClassDef {
    pub name: Name,
    pub members: Vec<ClassMember>,
}

/// A single member of a class body.
#[derive(Clone, Debug)]
pub enum ClassMember {
    /// Class-level attribute: `name = value`
    ///
    /// The initializer is evaluated once, at class-definition time, in the
    /// environment enclosing the class definition.
    Attr { name: Name, value: ExprId },

    /// Method definition.
    Method(FunctionDef),
}
