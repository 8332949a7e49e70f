use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum RuntimeError {
    #[error("'{name}' is not defined")]
    UndefinedVariable { name: String },

    #[error("'{name}' is not a function")]
    NotAFunction { name: String },

    #[error("'{name}' expected {expected} arguments but got {got}")]
    ArityMismatch {
        name: String,
        expected: String,
        got: usize,
    },

    #[error("type error: {message}")]
    TypeError { message: String },

    #[error("step limit of {limit} steps exceeded")]
    #[diagnostic(help("raise the limit with Engine::with_max_steps or --max-steps"))]
    StepLimitExceeded { limit: usize },
}
