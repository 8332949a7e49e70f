use crate::embedding::Callback;
use crate::runtime::deferred::{Deferred, Promise};
use crate::runtime::value::Value;

/// Functions available without a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Deferred,
    When,
    Log,
    Print,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "deferred" => Some(Builtin::Deferred),
            "when" => Some(Builtin::When),
            "log" => Some(Builtin::Log),
            "print" => Some(Builtin::Print),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Deferred => "deferred",
            Builtin::When => "when",
            Builtin::Log => "log",
            Builtin::Print => "print",
        }
    }
}

/// Anything a script expression can evaluate to.
#[derive(Debug, Clone)]
pub enum Binding {
    Value(Value),
    Deferred(Deferred),
    Promise(Promise),
    Handler(Callback),
    Builtin(Builtin),
    Method { receiver: Box<Binding>, name: String },
}

impl Binding {
    pub fn kind(&self) -> &'static str {
        match self {
            Binding::Value(_) => "value",
            Binding::Deferred(_) => "deferred",
            Binding::Promise(_) => "promise",
            Binding::Handler(_) => "handler",
            Binding::Builtin(_) => "builtin",
            Binding::Method { .. } => "method",
        }
    }

    /// Text written by `print`.
    pub fn describe(&self) -> String {
        match self {
            Binding::Value(value) => value.to_string(),
            Binding::Deferred(deferred) => format!("Deferred {{ <{}> }}", deferred.state()),
            Binding::Promise(promise) => format!("Promise {{ <{}> }}", promise.state()),
            Binding::Handler(_) => "handler".to_string(),
            Binding::Builtin(builtin) => format!("function {}()", builtin.name()),
            Binding::Method { receiver, name } => format!("{}.{name}", receiver.kind()),
        }
    }
}
