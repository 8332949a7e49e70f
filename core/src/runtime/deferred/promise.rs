use std::rc::Rc;

use super::{Shared, State};
use crate::embedding::Callback;

/// Read-only view of a [`Deferred`](super::Deferred).
///
/// A promise can subscribe to the outcome and inspect the state, but can
/// never settle it. Clones refer to the same deferred and compare equal.
#[derive(Clone)]
pub struct Promise {
    shared: Rc<Shared>,
}

impl Promise {
    pub(super) fn new(shared: Rc<Shared>) -> Self {
        Self { shared }
    }

    pub(super) fn shared(&self) -> &Shared {
        &self.shared
    }

    /// Called with the resolution arguments. Runs immediately when already
    /// resolved.
    pub fn done(&self, callback: impl Into<Callback>) -> &Self {
        self.done_all([callback.into()])
    }

    pub fn done_all<I>(&self, callbacks: I) -> &Self
    where
        I: IntoIterator<Item = Callback>,
    {
        self.shared.resolution.add(callbacks);
        self
    }

    /// Called with the rejection arguments. Runs immediately when already
    /// rejected.
    pub fn fail(&self, callback: impl Into<Callback>) -> &Self {
        self.fail_all([callback.into()])
    }

    pub fn fail_all<I>(&self, callbacks: I) -> &Self
    where
        I: IntoIterator<Item = Callback>,
    {
        self.shared.rejection.add(callbacks);
        self
    }

    /// Called for every notification. A late subscriber receives the most
    /// recent notification right away.
    pub fn progress(&self, callback: impl Into<Callback>) -> &Self {
        self.progress_all([callback.into()])
    }

    pub fn progress_all<I>(&self, callbacks: I) -> &Self
    where
        I: IntoIterator<Item = Callback>,
    {
        self.shared.progress.add(callbacks);
        self
    }

    /// Called on settlement, whichever way it goes.
    pub fn always(&self, callback: impl Into<Callback>) -> &Self {
        self.always_all([callback.into()])
    }

    pub fn always_all<I>(&self, callbacks: I) -> &Self
    where
        I: IntoIterator<Item = Callback>,
    {
        let callbacks: Vec<Callback> = callbacks.into_iter().collect();
        self.done_all(callbacks.iter().cloned());
        self.fail_all(callbacks)
    }

    /// Registers up to three callback groups, positionally: done, fail,
    /// progress. A group may be empty (`None` or an empty collection).
    ///
    /// # Panics
    ///
    /// Panics when given more than three groups.
    pub fn then<I, G>(&self, groups: I) -> &Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = Callback>,
    {
        let groups: Vec<G> = groups.into_iter().collect();
        assert!(
            groups.len() <= 3,
            "Promise::then takes at most three callback groups, got {}",
            groups.len()
        );

        let mut groups = groups.into_iter();
        if let Some(done) = groups.next() {
            self.done_all(done);
        }
        if let Some(fail) = groups.next() {
            self.fail_all(fail);
        }
        if let Some(progress) = groups.next() {
            self.progress_all(progress);
        }
        self
    }

    /// Alias of [`then`](Promise::then).
    pub fn pipe<I, G>(&self, groups: I) -> &Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = Callback>,
    {
        self.then(groups)
    }

    pub fn state(&self) -> State {
        self.shared.state.get()
    }

    /// Whether both promises view the same deferred.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl PartialEq for Promise {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Promise {}

impl std::fmt::Debug for Promise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Promise")
            .field("state", &self.state())
            .finish()
    }
}
