pub mod deferred;
pub mod environment;
pub mod interpreter;
pub mod value;
