//! Call dispatch for the interpreter.
//!
//! The binding decision is made here, at the call site, from the callee's
//! provenance, never from the function value itself:
//!
//! - plain-name callee: plain call, arguments as written;
//! - attribute callee resolved from *class* storage: the owning instance
//!   is prepended as the first argument (bound-method call);
//! - attribute callee resolved from *instance* storage: plain call, even
//!   when the class defines a method of the same name. Instance-level
//!   attributes are not bound methods; a shadowing function with a
//!   different arity is called with exactly the written arguments.

use recast_ir::{Expr, ExprId};

use super::{Flow, Interpreter};
use crate::errors::{
    arity_mismatch, attribute_not_found, missing_return, not_callable, recursion_limit_exceeded,
    EvalError, EvalResult,
};
use crate::object::{get_attr, AttrOrigin, ClassValue, InstanceValue};
use crate::value::{FunctionValue, Value};

impl Interpreter<'_> {
    /// Evaluate a call expression.
    #[tracing::instrument(level = "debug", skip_all)]
    pub(super) fn eval_call(&mut self, callee: ExprId, args: &[ExprId]) -> EvalResult {
        let arena = self.arena;
        if let Expr::Field { receiver, field } = arena.get(callee) {
            let receiver = self.eval_expr(*receiver)?;
            return match &receiver {
                Value::Instance(instance) => {
                    let Some((target, origin)) = get_attr(instance, *field) else {
                        return Err(attribute_not_found(self.interner.lookup(*field)));
                    };
                    let argv = self.eval_args(args)?;
                    match (target, origin) {
                        (Value::Function(func), AttrOrigin::Class) => {
                            tracing::trace!("bound-method call: receiver injected");
                            self.call_bound(instance, &func, &argv)
                        }
                        (Value::Function(func), AttrOrigin::Instance) => {
                            tracing::trace!("instance-attribute call: plain");
                            self.call_function(&func, &argv)
                        }
                        (other, _) => Err(not_callable(other.type_name())),
                    }
                }
                Value::Class(class) => {
                    let Some(target) = class.get(*field) else {
                        return Err(attribute_not_found(self.interner.lookup(*field)));
                    };
                    let argv = self.eval_args(args)?;
                    self.call_value(&target, &argv)
                }
                _ => Err(attribute_not_found(self.interner.lookup(*field))),
            };
        }

        let callee = self.eval_expr(callee)?;
        let argv = self.eval_args(args)?;
        self.call_value(&callee, &argv)
    }

    fn eval_args(&mut self, args: &[ExprId]) -> Result<Vec<Value>, EvalError> {
        args.iter().map(|arg| self.eval_expr(*arg)).collect()
    }

    /// Call a value as a plain callee: no implicit argument is injected.
    pub fn call_value(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(func, args),
            Value::Class(class) => self.instantiate(class, args),
            other => Err(not_callable(other.type_name())),
        }
    }

    /// Bound-method call: the receiver is prepended to the arguments.
    pub fn call_bound(
        &mut self,
        receiver: &InstanceValue,
        func: &FunctionValue,
        args: &[Value],
    ) -> EvalResult {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(Value::Instance(receiver.clone()));
        argv.extend_from_slice(args);
        self.call_function(func, &argv)
    }

    /// Invoke a function value with exactly `args`.
    ///
    /// Arity is checked before binding; the activation frame chains to the
    /// callee's captured scope, not to the caller's chain.
    pub fn call_function(&mut self, func: &FunctionValue, args: &[Value]) -> EvalResult {
        if args.len() != func.arity() {
            return Err(arity_mismatch(
                self.interner.lookup(func.name()),
                func.arity(),
                args.len(),
            ));
        }
        self.check_recursion_limit()?;

        let activation = self.env.activation(func.captured());
        let saved = std::mem::replace(&mut self.env, activation);
        self.call_depth += 1;
        for (param, value) in func.params().iter().zip(args) {
            self.env.define(*param, value.clone());
        }
        let body = func.body();
        let flow = self.exec_block(&body);
        self.call_depth -= 1;
        self.env = saved;

        match flow? {
            Flow::Return(value) | Flow::Next(Some(value)) => Ok(value),
            Flow::Next(None) => Err(missing_return(self.interner.lookup(func.name()))),
        }
    }

    /// Construct an instance of a class.
    ///
    /// Single-level classes have no initializer in scope, so construction
    /// takes no arguments.
    fn instantiate(&mut self, class: &ClassValue, args: &[Value]) -> EvalResult {
        if !args.is_empty() {
            return Err(arity_mismatch(
                self.interner.lookup(class.name()),
                0,
                args.len(),
            ));
        }
        Ok(Value::Instance(InstanceValue::new(class.clone())))
    }

    fn check_recursion_limit(&self) -> Result<(), EvalError> {
        if self.call_depth >= self.recursion_limit {
            return Err(recursion_limit_exceeded(self.recursion_limit));
        }
        Ok(())
    }
}
