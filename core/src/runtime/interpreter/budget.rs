use std::cell::Cell;

use crate::errors::RuntimeError;

/// Step allowance shared by the interpreter and every handler it creates.
///
/// Statements and handler runs each cost one step. Handlers keep charging
/// when they fire outside `eval`; the count resets at the start of each run.
#[derive(Debug, Default)]
pub(crate) struct StepBudget {
    limit: Cell<Option<usize>>,
    used: Cell<usize>,
    exhausted: Cell<bool>,
}

impl StepBudget {
    pub(crate) fn set_limit(&self, limit: usize) {
        self.limit.set(Some(limit));
    }

    pub(crate) fn reset(&self) {
        self.used.set(0);
        self.exhausted.set(false);
    }

    /// Takes one step. Returns `false` once the limit has been passed; the
    /// caller must then skip its work.
    pub(crate) fn charge(&self) -> bool {
        if self.exhausted.get() {
            return false;
        }
        let used = self.used.get() + 1;
        self.used.set(used);
        if self.limit.get().is_some_and(|limit| used > limit) {
            self.exhausted.set(true);
            return false;
        }
        true
    }

    pub(crate) fn check(&self) -> Result<(), RuntimeError> {
        match self.limit.get() {
            Some(limit) if self.exhausted.get() => Err(RuntimeError::StepLimitExceeded { limit }),
            _ => Ok(()),
        }
    }
}
