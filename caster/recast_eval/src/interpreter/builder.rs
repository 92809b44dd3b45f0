//! `InterpreterBuilder` for creating `Interpreter` instances.

use recast_ir::Program;

use super::{Interpreter, DEFAULT_RECURSION_LIMIT};
use crate::environment::Environment;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for creating `Interpreter` instances with various
/// configurations.
pub struct InterpreterBuilder<'a> {
    program: &'a Program,
    print_handler: Option<SharedPrintHandler>,
    recursion_limit: Option<usize>,
}

impl<'a> InterpreterBuilder<'a> {
    /// Create a new builder for a program.
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            print_handler: None,
            recursion_limit: None,
        }
    }

    /// Set the print handler.
    ///
    /// Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the user-level recursion limit.
    #[must_use]
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            interner: &self.program.interner,
            arena: &self.program.arena,
            body: &self.program.body,
            env: Environment::new(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_depth: 0,
            recursion_limit: self.recursion_limit.unwrap_or(DEFAULT_RECURSION_LIMIT),
        }
    }
}
