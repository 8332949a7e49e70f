use std::cell::RefCell;
use std::collections::VecDeque;

use tracing::trace;

use crate::embedding::{Args, Callback};

/// Firing behaviour of a [`CallbackList`], fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// The list disables itself after its first firing.
    pub once: bool,
    /// The list remembers the last firing's arguments and replays them to
    /// callbacks added later.
    pub memory: bool,
}

impl Flags {
    pub const NONE: Flags = Flags {
        once: false,
        memory: false,
    };

    pub const ONCE: Flags = Flags {
        once: true,
        memory: false,
    };

    pub const MEMORY: Flags = Flags {
        once: false,
        memory: true,
    };

    pub const ONCE_MEMORY: Flags = Flags {
        once: true,
        memory: true,
    };
}

#[derive(Default)]
struct ListState {
    callbacks: Vec<Callback>,
    fired: bool,
    firing: bool,
    disabled: bool,
    locked: bool,
    memory: Option<Args>,
    queued: VecDeque<Args>,
}

/// Ordered callback registry with `once`/`memory` firing semantics.
///
/// Callbacks run synchronously on the firing thread, in the order they were
/// added. No borrow is held while a callback runs, so callbacks may add to or
/// fire the list they are running from.
pub struct CallbackList {
    flags: Flags,
    state: RefCell<ListState>,
}

impl CallbackList {
    pub fn new(flags: Flags) -> Self {
        Self {
            flags,
            state: RefCell::new(ListState::default()),
        }
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Appends callbacks unless the list is disabled. When the list has
    /// memory of a previous firing, each callback is also invoked right away
    /// with the remembered arguments, even once the list is disabled or locked.
    pub fn add<I>(&self, callbacks: I) -> &Self
    where
        I: IntoIterator<Item = Callback>,
    {
        for callback in callbacks {
            let replay = {
                let mut state = self.state.borrow_mut();
                if !state.disabled {
                    state.callbacks.push(callback.clone());
                }
                state.memory.clone()
            };
            if let Some(args) = replay {
                trace!(args = %args, "replaying remembered arguments");
                callback.call(&args);
            }
        }
        self
    }

    /// Invokes every registered callback with `args`.
    ///
    /// A fire issued by one of this list's own callbacks is queued and runs
    /// after the current pass completes. `once` lists ignore it instead.
    pub fn fire(&self, args: impl Into<Args>) -> &Self {
        let args = args.into();
        {
            let mut state = self.state.borrow_mut();
            if state.disabled || state.locked || (self.flags.once && state.fired) {
                return self;
            }
            if state.firing {
                state.queued.push_back(args);
                return self;
            }
            state.firing = true;
        }

        let _guard = FiringGuard { state: &self.state };
        let mut next = Some(args);
        while let Some(args) = next {
            let callbacks = {
                let mut state = self.state.borrow_mut();
                state.fired = true;
                if self.flags.memory {
                    state.memory = Some(args.clone());
                }
                state.callbacks.clone()
            };

            trace!(callbacks = callbacks.len(), args = %args, "firing callback list");
            for callback in &callbacks {
                callback.call(&args);
            }

            next = {
                let mut state = self.state.borrow_mut();
                if self.flags.once {
                    state.disable();
                }
                if state.disabled || state.locked {
                    state.queued.clear();
                    None
                } else {
                    state.queued.pop_front()
                }
            };
        }
        self
    }

    /// Stops the list for good: later `add` calls no longer append and later
    /// `fire` calls do nothing. Registered callbacks are released.
    pub fn disable(&self) -> &Self {
        self.state.borrow_mut().disable();
        self
    }

    /// Freezes firing. Callbacks can still be added and still receive the
    /// remembered arguments, if any.
    pub fn lock(&self) -> &Self {
        self.state.borrow_mut().locked = true;
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.state.borrow().disabled
    }

    pub fn is_locked(&self) -> bool {
        self.state.borrow().locked
    }

    pub fn has_fired(&self) -> bool {
        self.state.borrow().fired
    }

    pub fn has(&self, callback: &Callback) -> bool {
        self.state
            .borrow()
            .callbacks
            .iter()
            .any(|registered| registered.ptr_eq(callback))
    }

    pub fn len(&self) -> usize {
        self.state.borrow().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().callbacks.is_empty()
    }
}

impl std::fmt::Debug for CallbackList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("CallbackList")
            .field("flags", &self.flags)
            .field("callbacks", &state.callbacks.len())
            .field("fired", &state.fired)
            .field("disabled", &state.disabled)
            .field("locked", &state.locked)
            .finish()
    }
}

impl ListState {
    fn disable(&mut self) {
        self.disabled = true;
        self.callbacks.clear();
    }
}

/// Clears the firing flag even when a callback unwinds.
struct FiringGuard<'a> {
    state: &'a RefCell<ListState>,
}

impl Drop for FiringGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.firing = false;
        state.queued.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::value::Value;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, Callback) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let callback = Callback::from_fn(move |args: &Args| sink.borrow_mut().push(args.to_string()));
        (seen, callback)
    }

    #[test]
    fn plain_list_fires_every_time_in_add_order() {
        let list = CallbackList::new(Flags::NONE);
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            let order = order.clone();
            list.add([Callback::from_fn(move |_: &Args| order.borrow_mut().push(tag))]);
        }

        list.fire(Value::from(1)).fire(Value::from(2));

        assert_eq!(*order.borrow(), vec!["a", "b", "c", "a", "b", "c"]);
        assert!(!list.is_disabled());
    }

    #[test]
    fn flags_are_fixed_at_construction() {
        let list = CallbackList::new(Flags::ONCE_MEMORY);
        assert_eq!(list.flags(), Flags { once: true, memory: true });
        assert_eq!(CallbackList::new(Flags::default()).flags(), Flags::NONE);
    }

    #[test]
    fn once_list_disables_after_first_fire() {
        let list = CallbackList::new(Flags::ONCE);
        let (seen, callback) = recorder();
        list.add([callback]);
        assert!(!list.has_fired());

        list.fire(Value::from("first"));
        assert!(list.has_fired());
        list.fire(Value::from("second"));

        assert_eq!(*seen.borrow(), vec!["first"]);
        assert!(list.is_disabled());
        assert!(list.is_empty());
    }

    #[test]
    fn memory_replays_last_args_to_late_callbacks() {
        let list = CallbackList::new(Flags::MEMORY);
        list.fire(Value::from(1));
        list.fire(Value::from(2));

        let (seen, callback) = recorder();
        list.add([callback]);

        assert_eq!(*seen.borrow(), vec!["2"]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn no_replay_without_memory() {
        let list = CallbackList::new(Flags::ONCE);
        list.fire(Value::from(1));
        assert!(list.has_fired());

        let (seen, callback) = recorder();
        list.add([callback]);

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn lock_blocks_fire_but_not_add_or_replay() {
        let list = CallbackList::new(Flags::MEMORY);
        list.fire(Value::from("before"));
        list.lock();

        let (seen, callback) = recorder();
        list.add([callback]);
        list.fire(Value::from("after"));

        assert_eq!(*seen.borrow(), vec!["before"]);
        assert_eq!(list.len(), 1);
        assert!(list.is_locked());
    }

    #[test]
    fn disabled_list_ignores_add_and_fire() {
        let list = CallbackList::new(Flags::NONE);
        let (seen, callback) = recorder();
        list.add([callback.clone()]);
        list.disable();

        list.add([callback.clone()]);
        list.fire(Value::from(1));

        assert!(seen.borrow().is_empty());
        assert!(!list.has(&callback));
    }

    #[test]
    fn disable_during_fire_still_runs_current_pass() {
        let list = Rc::new(CallbackList::new(Flags::ONCE_MEMORY));
        let inner = Rc::downgrade(&list);
        list.add([Callback::from_fn(move |_: &Args| {
            if let Some(list) = inner.upgrade() {
                list.disable();
            }
        })]);
        let (seen, callback) = recorder();
        list.add([callback]);

        list.fire(Value::from(7));

        assert_eq!(*seen.borrow(), vec!["7"]);
    }

    #[test]
    fn reentrant_fire_is_queued_after_current_pass() {
        let list = Rc::new(CallbackList::new(Flags::NONE));
        let order = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&list);
        let first = order.clone();
        list.add([Callback::from_fn(move |args: &Args| {
            first.borrow_mut().push(format!("first {args}"));
            if args.first() == Some(&Value::from(1))
                && let Some(list) = weak.upgrade()
            {
                list.fire(Value::from(2));
            }
        })]);
        let second = order.clone();
        list.add([Callback::from_fn(move |args: &Args| {
            second.borrow_mut().push(format!("second {args}"));
        })]);

        list.fire(Value::from(1));

        assert_eq!(
            *order.borrow(),
            vec!["first 1", "second 1", "first 2", "second 2"]
        );
    }

    #[test]
    fn callback_added_while_firing_runs_on_replay_only_once() {
        let list = Rc::new(CallbackList::new(Flags::MEMORY));
        let (seen, late) = recorder();
        let weak = Rc::downgrade(&list);
        list.add([Callback::from_fn(move |_: &Args| {
            if let Some(list) = weak.upgrade() {
                list.add([late.clone()]);
            }
        })]);

        list.fire(Value::from("x"));

        assert_eq!(*seen.borrow(), vec!["x"]);
    }
}
