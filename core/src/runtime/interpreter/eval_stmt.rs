use tracing::trace;

use super::Interpreter;
use crate::errors::RuntimeError;
use crate::parser::ast::Stmt;

impl Interpreter {
    pub(crate) fn eval_stmt(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        if !self.budget.charge() {
            return self.budget.check();
        }
        match stmt {
            Stmt::Let { name, init } => {
                let binding = self.eval_expr(init)?;
                trace!(name = %name, kind = binding.kind(), "binding defined");
                self.env.define(name.clone(), binding);
            }
            Stmt::Expr(expr) => {
                self.eval_expr(expr)?;
            }
        }
        // Handlers fired by this statement may have used up the budget.
        self.budget.check()
    }
}
