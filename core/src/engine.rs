use crate::context::Context;

/// Builder for script contexts sharing one configuration.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    max_steps: Option<usize>,
    echo: bool,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the steps a single `eval` may take. Every statement and every run
    /// of a script-created handler costs one step.
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = Some(max);
        self
    }

    /// Prints output lines to stdout as they are produced.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn new_context(&self) -> Context {
        let mut ctx = Context::new_with_echo(self.echo);
        if let Some(max) = self.max_steps {
            ctx.set_max_steps(max);
        }
        ctx
    }
}
