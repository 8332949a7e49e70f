use super::Expr;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let { name: String, init: Expr },
    Expr(Expr),
}
