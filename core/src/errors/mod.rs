mod runtime_error;
mod syntax_error;

pub use runtime_error::RuntimeError;
pub use syntax_error::SyntaxError;

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for evaluating settle scripts.
#[derive(Debug, Error, Diagnostic)]
pub enum SettleError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("could not read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
