mod budget;
mod builtins;
mod eval_expr;
mod eval_stmt;
mod methods;
mod output;

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::RuntimeError;
use crate::parser::ast::Program;
use crate::runtime::environment::Environment;

pub(crate) use budget::StepBudget;
pub(crate) use output::Output;

/// The tree-walk interpreter for settle scripts.
pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) output: Rc<RefCell<Output>>,
    pub(crate) budget: Rc<StepBudget>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::new_with_echo(false)
    }

    /// With `echo`, every output line is also printed to stdout as it is
    /// produced.
    pub fn new_with_echo(echo: bool) -> Self {
        Self {
            env: Environment::new(),
            output: Rc::new(RefCell::new(Output::new(echo))),
            budget: Rc::new(StepBudget::default()),
        }
    }

    pub fn set_max_steps(&mut self, max: usize) {
        self.budget.set_limit(max);
    }

    /// Run a parsed program. The step budget applies per run and also covers
    /// the handler runs the program triggers.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        self.budget.reset();
        for stmt in &program.body {
            self.eval_stmt(stmt)?;
        }
        Ok(())
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Captured output lines (from `log` handlers and `print`).
    pub fn output(&self) -> Vec<String> {
        self.output.borrow().lines().to_vec()
    }

    pub fn take_output(&mut self) -> Vec<String> {
        self.output.borrow_mut().take()
    }
}
