mod expression;
mod statement;

pub use expression::Expr;
pub use statement::Stmt;

/// A complete script: a list of top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}
