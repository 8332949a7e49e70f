//! Deferred/promise coordination with `once`/`memory` callback lists, plus a
//! small scenario-script language for driving deferreds from text.

pub mod context;
pub mod diagnostics;
pub mod embedding;
pub mod engine;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod runtime;

pub use context::{BindingSnapshot, Context};
pub use embedding::{Args, Callback, Function};
pub use engine::Engine;
pub use runtime::deferred::{CallbackList, Deferred, Flags, Promise, State, when};
pub use runtime::value::Value;

use errors::SettleError;

/// Convenience function to run a script end-to-end.
pub fn run(source: &str) -> Result<Context, SettleError> {
    let mut ctx = Context::new();
    ctx.eval(source)?;
    Ok(ctx)
}
