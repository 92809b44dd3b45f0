//! Tree-walking evaluator for recast programs.
//!
//! # Architecture
//!
//! - `Environment`: name scoping with `Rc`-shared frames
//! - `object::get_attr` / `object::set_attr`: two-tier attribute resolution
//! - `evaluate_binary`: direct enum-based operator dispatch
//! - `call.rs`: the call dispatcher, including the receiver-binding decision
//!
//! The top-level body executes in the module frame, created by `run()` and
//! dropped with the interpreter. Expression evaluation recurses under
//! `ensure_sufficient_stack`; user-level call depth is bounded separately
//! by the recursion limit.

mod builder;
mod call;


pub use builder::InterpreterBuilder;

use rustc_hash::FxHashMap;

use recast_ir::{ClassMember, Expr, ExprArena, ExprId, Name, Program, Stmt, StringInterner};

use crate::environment::Environment;
use crate::errors::{attribute_not_found, name_not_found, type_mismatch, EvalError, EvalResult};
use crate::object::{get_attr, set_attr, ClassValue};
use crate::operators::evaluate_binary;
use crate::print_handler::SharedPrintHandler;
use crate::stack::ensure_sufficient_stack;
use crate::value::{FunctionValue, Value};

/// Default user-level recursion limit.
pub const DEFAULT_RECURSION_LIMIT: usize = 1000;

/// Control flow out of a statement.
///
/// `Next` carries the statement's value when it has one (expression
/// statements); a function body that falls off the end yields the value of
/// its final statement.
enum Flow {
    Next(Option<Value>),
    Return(Value),
}

/// Tree-walking interpreter.
///
/// Borrows the program's interner and arena; owns the environment and the
/// print handler.
pub struct Interpreter<'a> {
    interner: &'a StringInterner,
    arena: &'a ExprArena,
    body: &'a [Stmt],
    env: Environment,
    print_handler: SharedPrintHandler,
    call_depth: usize,
    recursion_limit: usize,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter with default configuration (stdout printing).
    pub fn new(program: &'a Program) -> Self {
        InterpreterBuilder::new(program).build()
    }

    /// Execute the program's top-level body in the module frame.
    ///
    /// A top-level `return` ends execution. Any evaluation error aborts
    /// the remaining statements and propagates to the caller.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self) -> Result<(), EvalError> {
        let body = self.body;
        self.exec_block(body)?;
        Ok(())
    }

    /// Look up a module-level binding by source name.
    ///
    /// Intended for embedders and tests inspecting final program state.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.env.lookup_module(self.interner.intern(name))
    }

    /// Execute a statement sequence, tracking the implicit result.
    fn exec_block(&mut self, stmts: &[Stmt]) -> Result<Flow, EvalError> {
        let mut last = None;
        for stmt in stmts {
            match self.exec_stmt(stmt)? {
                Flow::Next(value) => last = value,
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }
        Ok(Flow::Next(last))
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, EvalError> {
        match stmt {
            Stmt::Assign { name, value } => {
                let value = self.eval_expr(*value)?;
                self.env.define(*name, value);
                Ok(Flow::Next(None))
            }
            Stmt::AssignField {
                receiver,
                field,
                value,
            } => {
                let value = self.eval_expr(*value)?;
                let receiver = self.eval_expr(*receiver)?;
                match receiver {
                    Value::Instance(instance) => {
                        set_attr(&instance, *field, value);
                        Ok(Flow::Next(None))
                    }
                    other => Err(type_mismatch("instance", other.type_name())),
                }
            }
            Stmt::Def(def) => {
                let func = FunctionValue::new(def, self.env.capture());
                self.env.define(def.name, Value::Function(func));
                Ok(Flow::Next(None))
            }
            Stmt::Class(def) => {
                let mut attrs = FxHashMap::default();
                for member in &def.members {
                    match member {
                        ClassMember::Attr { name, value } => {
                            let value = self.eval_expr(*value)?;
                            attrs.insert(*name, value);
                        }
                        ClassMember::Method(method) => {
                            // Methods capture the scope enclosing the class
                            // definition; the class body is not a frame.
                            let func = FunctionValue::new(method, self.env.capture());
                            attrs.insert(method.name, Value::Function(func));
                        }
                    }
                }
                let class = ClassValue::new(def.name, attrs);
                self.env.define(def.name, Value::Class(class));
                Ok(Flow::Next(None))
            }
            Stmt::Return(value) => {
                let value = self.eval_expr(*value)?;
                Ok(Flow::Return(value))
            }
            Stmt::Expr(value) => {
                let value = self.eval_expr(*value)?;
                Ok(Flow::Next(Some(value)))
            }
            Stmt::Print(value) => {
                let value = self.eval_expr(*value)?;
                self.print_handler.println(&self.format_value(&value));
                Ok(Flow::Next(None))
            }
        }
    }

    /// Evaluate an expression, growing the stack when recursion runs deep.
    fn eval_expr(&mut self, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(id))
    }

    fn eval_expr_inner(&mut self, id: ExprId) -> EvalResult {
        let arena = self.arena;
        match arena.get(id) {
            Expr::Int(n) => Ok(Value::int(*n)),
            Expr::Ident(name) => self.lookup_name(*name),
            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(*left)?;
                let right = self.eval_expr(*right)?;
                evaluate_binary(left, right, *op)
            }
            Expr::Call { callee, args } => self.eval_call(*callee, args),
            Expr::Field { receiver, field } => {
                let receiver = self.eval_expr(*receiver)?;
                self.read_attr(&receiver, *field)
            }
        }
    }

    /// Resolve a name through the environment chain.
    fn lookup_name(&self, name: Name) -> EvalResult {
        self.env
            .lookup(name)
            .ok_or_else(|| name_not_found(self.interner.lookup(name)))
    }

    /// Read an attribute off a value.
    ///
    /// Instances resolve two-tier; classes resolve their own storage (a
    /// function read off a class directly is a plain function, with no
    /// receiver to inject).
    fn read_attr(&self, receiver: &Value, field: Name) -> EvalResult {
        match receiver {
            Value::Instance(instance) => get_attr(instance, field)
                .map(|(value, _)| value)
                .ok_or_else(|| attribute_not_found(self.interner.lookup(field))),
            Value::Class(class) => class
                .get(field)
                .ok_or_else(|| attribute_not_found(self.interner.lookup(field))),
            _ => Err(attribute_not_found(self.interner.lookup(field))),
        }
    }

    /// Render a value for `print`.
    fn format_value(&self, value: &Value) -> String {
        match value {
            Value::Int(n) => n.to_string(),
            Value::Function(func) => {
                format!("<function {}>", self.interner.lookup(func.name()))
            }
            Value::Class(class) => {
                format!("<class {}>", self.interner.lookup(class.name()))
            }
            Value::Instance(instance) => {
                format!("<{} instance>", self.interner.lookup(instance.class().name()))
            }
        }
    }
}
