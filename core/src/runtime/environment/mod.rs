mod binding;

use std::collections::BTreeMap;

use crate::errors::RuntimeError;

pub use binding::{Binding, Builtin};

/// Global bindings of a script. `let` may rebind an existing name.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: BTreeMap<String, Binding>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, binding: Binding) {
        self.bindings.insert(name.into(), binding);
    }

    /// Resolves a name, falling back to the builtins.
    pub fn get(&self, name: &str) -> Result<Binding, RuntimeError> {
        if let Some(binding) = self.bindings.get(name) {
            return Ok(binding.clone());
        }
        Builtin::lookup(name)
            .map(Binding::Builtin)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
            })
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(name, binding)| (name.as_str(), binding))
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}
