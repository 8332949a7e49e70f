use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::errors::SettleError;
use crate::runtime::deferred::{Deferred, Promise, State};
use crate::runtime::environment::Binding;
use crate::runtime::interpreter::Interpreter;
use crate::runtime::value::Value;

/// One named binding as reported by [`Context::snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingSnapshot {
    pub name: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// A script evaluation context whose bindings persist across `eval` calls.
pub struct Context {
    interpreter: Interpreter,
}

impl Context {
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
        }
    }

    pub fn new_with_echo(echo: bool) -> Self {
        Self {
            interpreter: Interpreter::new_with_echo(echo),
        }
    }

    pub fn set_max_steps(&mut self, max: usize) {
        self.interpreter.set_max_steps(max);
    }

    pub fn eval(&mut self, source: &str) -> Result<(), SettleError> {
        let tokens = crate::lexer::lex(source)?;
        let program = crate::parser::parse(tokens)?;
        self.interpreter.run(&program)?;
        Ok(())
    }

    pub fn eval_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SettleError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| SettleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.eval(&source)
    }

    /// Exposes a host-owned deferred to scripts under `name`.
    pub fn set_deferred(&mut self, name: impl Into<String>, deferred: Deferred) {
        self.interpreter
            .env_mut()
            .define(name, Binding::Deferred(deferred));
    }

    /// Exposes a promise to scripts under `name`; scripts can subscribe to
    /// it but not settle it.
    pub fn set_promise(&mut self, name: impl Into<String>, promise: Promise) {
        self.interpreter
            .env_mut()
            .define(name, Binding::Promise(promise));
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: Value) {
        self.interpreter.env_mut().define(name, Binding::Value(value));
    }

    pub fn deferred(&self, name: &str) -> Option<Deferred> {
        match self.interpreter.env().lookup(name)? {
            Binding::Deferred(deferred) => Some(deferred.clone()),
            _ => None,
        }
    }

    /// The promise bound to `name`, or the promise of a deferred bound there.
    pub fn promise(&self, name: &str) -> Option<Promise> {
        match self.interpreter.env().lookup(name)? {
            Binding::Deferred(deferred) => Some(deferred.promise()),
            Binding::Promise(promise) => Some(promise.clone()),
            _ => None,
        }
    }

    pub fn value(&self, name: &str) -> Option<Value> {
        match self.interpreter.env().lookup(name)? {
            Binding::Value(value) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn output(&self) -> Vec<String> {
        self.interpreter.output()
    }

    pub fn take_output(&mut self) -> Vec<String> {
        self.interpreter.take_output()
    }

    /// Every binding in name order, with the state of deferreds and promises.
    pub fn snapshot(&self) -> Vec<BindingSnapshot> {
        self.interpreter
            .env()
            .iter()
            .map(|(name, binding)| BindingSnapshot {
                name: name.to_string(),
                kind: binding.kind(),
                state: match binding {
                    Binding::Deferred(deferred) => Some(deferred.state()),
                    Binding::Promise(promise) => Some(promise.state()),
                    _ => None,
                },
                value: match binding {
                    Binding::Value(value) => Some(value.clone()),
                    _ => None,
                },
            })
            .collect()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
