//! Deferred objects: one-shot outcomes with late-subscription replay.
//!
//! A [`Deferred`] is driven to a terminal state by its owner through
//! [`resolve`](Deferred::resolve) or [`reject`](Deferred::reject) and can
//! report intermediate progress through [`notify`](Deferred::notify). Other
//! code observes it through the read-only [`Promise`] view, and
//! [`when`] joins several promises into one.

mod callbacks;
mod promise;
mod state;
mod when;

use std::cell::Cell;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::embedding::{Args, Callback};

pub use callbacks::{CallbackList, Flags};
pub use promise::Promise;
pub use state::State;
pub use when::when;

/// State shared by a deferred and every promise view of it.
pub(crate) struct Shared {
    state: Cell<State>,
    resolution: CallbackList,
    rejection: CallbackList,
    progress: CallbackList,
}

impl Shared {
    fn new() -> Rc<Self> {
        let shared = Rc::new(Self {
            state: Cell::new(State::Pending),
            resolution: CallbackList::new(Flags::ONCE_MEMORY),
            rejection: CallbackList::new(Flags::ONCE_MEMORY),
            progress: CallbackList::new(Flags::MEMORY),
        });

        // Registered first so user callbacks always observe the settled state.
        shared
            .resolution
            .add([settle_callback(Rc::downgrade(&shared), State::Resolved)]);
        shared
            .rejection
            .add([settle_callback(Rc::downgrade(&shared), State::Rejected)]);
        shared
    }

    fn settle(&self, state: State) {
        self.state.set(state);
        self.resolution.disable();
        self.rejection.disable();
        self.progress.lock();
        debug!(state = %state, "deferred settled");
    }
}

fn settle_callback(shared: Weak<Shared>, state: State) -> Callback {
    Callback::from_fn(move |_| {
        if let Some(shared) = shared.upgrade() {
            shared.settle(state);
        }
    })
}

/// The mutable side of an eventual outcome.
///
/// Cloning a `Deferred` yields another handle to the same outcome.
#[derive(Clone)]
pub struct Deferred {
    promise: Promise,
}

impl Deferred {
    pub fn new() -> Self {
        Self {
            promise: Promise::new(Shared::new()),
        }
    }

    /// A deferred that is already resolved with `args`.
    pub fn resolved(args: impl Into<Args>) -> Self {
        let deferred = Self::new();
        deferred.resolve(args);
        deferred
    }

    /// A deferred that is already rejected with `args`.
    pub fn rejected(args: impl Into<Args>) -> Self {
        let deferred = Self::new();
        deferred.reject(args);
        deferred
    }

    /// Settles as resolved and runs the done callbacks. Ignored once settled.
    pub fn resolve(&self, args: impl Into<Args>) -> &Self {
        self.shared().resolution.fire(args);
        self
    }

    /// Settles as rejected and runs the fail callbacks. Ignored once settled.
    pub fn reject(&self, args: impl Into<Args>) -> &Self {
        self.shared().rejection.fire(args);
        self
    }

    /// Runs the progress callbacks once. Ignored once settled.
    pub fn notify(&self, args: impl Into<Args>) -> &Self {
        self.shared().progress.fire(args);
        self
    }

    /// The read-only view of this deferred. Every call returns the same view.
    pub fn promise(&self) -> Promise {
        self.promise.clone()
    }

    pub fn state(&self) -> State {
        self.promise.state()
    }

    pub fn done(&self, callback: impl Into<Callback>) -> &Self {
        self.promise.done(callback);
        self
    }

    pub fn done_all<I>(&self, callbacks: I) -> &Self
    where
        I: IntoIterator<Item = Callback>,
    {
        self.promise.done_all(callbacks);
        self
    }

    pub fn fail(&self, callback: impl Into<Callback>) -> &Self {
        self.promise.fail(callback);
        self
    }

    pub fn fail_all<I>(&self, callbacks: I) -> &Self
    where
        I: IntoIterator<Item = Callback>,
    {
        self.promise.fail_all(callbacks);
        self
    }

    pub fn progress(&self, callback: impl Into<Callback>) -> &Self {
        self.promise.progress(callback);
        self
    }

    pub fn progress_all<I>(&self, callbacks: I) -> &Self
    where
        I: IntoIterator<Item = Callback>,
    {
        self.promise.progress_all(callbacks);
        self
    }

    pub fn always(&self, callback: impl Into<Callback>) -> &Self {
        self.promise.always(callback);
        self
    }

    pub fn always_all<I>(&self, callbacks: I) -> &Self
    where
        I: IntoIterator<Item = Callback>,
    {
        self.promise.always_all(callbacks);
        self
    }

    /// See [`Promise::then`].
    pub fn then<I, G>(&self, groups: I) -> &Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = Callback>,
    {
        self.promise.then(groups);
        self
    }

    pub fn pipe<I, G>(&self, groups: I) -> &Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = Callback>,
    {
        self.then(groups)
    }

    fn shared(&self) -> &Shared {
        self.promise.shared()
    }
}

impl Default for Deferred {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Deferred {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred")
            .field("state", &self.state())
            .finish()
    }
}

impl From<Deferred> for Promise {
    fn from(deferred: Deferred) -> Self {
        deferred.promise
    }
}

impl From<&Deferred> for Promise {
    fn from(deferred: &Deferred) -> Self {
        deferred.promise()
    }
}
