use crate::runtime::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Array(Vec<Expr>),
    Ident(String),
    Member {
        object: Box<Expr>,
        property: String,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Source-like name used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Expr::Literal(value) => value.to_nested_string(),
            Expr::Array(_) => "array literal".to_string(),
            Expr::Ident(name) => name.clone(),
            Expr::Member { object, property } => format!("{}.{property}", object.describe()),
            Expr::Call { callee, .. } => format!("{}(...)", callee.describe()),
        }
    }
}
