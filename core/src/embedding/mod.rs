pub mod callback;
pub mod function_args;

pub use callback::{Callback, Function};
pub use function_args::Args;
