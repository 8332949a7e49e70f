use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use super::{Deferred, Promise};
use crate::embedding::{Args, Callback};
use crate::runtime::value::Value;

/// Result slots of a pending join, indexed by input position.
struct Join {
    remaining: usize,
    values: Vec<Value>,
}

/// Joins several promises into one.
///
/// - no input: an already resolved promise with no arguments;
/// - one input: that very promise;
/// - otherwise: a promise that resolves once every input resolved, with one
///   array argument per input holding that input's resolution arguments, in
///   input order. It rejects with the arguments of the first input to reject
///   and relays every input's progress notifications unchanged.
pub fn when<I>(promises: I) -> Promise
where
    I: IntoIterator,
    I::Item: Into<Promise>,
{
    let mut promises: Vec<Promise> = promises.into_iter().map(Into::into).collect();

    if promises.len() == 1
        && let Some(only) = promises.pop()
    {
        return only;
    }
    if promises.is_empty() {
        return Deferred::resolved(Args::empty()).promise();
    }

    debug!(subordinates = promises.len(), "joining promises");
    let aggregate = Deferred::new();
    let join = Rc::new(RefCell::new(Join {
        remaining: promises.len(),
        values: vec![Value::Null; promises.len()],
    }));

    for (index, subordinate) in promises.iter().enumerate() {
        subordinate
            .done(slot_filler(&aggregate, &join, index))
            .progress(relay(&aggregate, |aggregate, args| {
                aggregate.notify(args);
            }))
            .fail(relay(&aggregate, |aggregate, args| {
                aggregate.reject(args);
            }));
    }

    aggregate.promise()
}

fn slot_filler(aggregate: &Deferred, join: &Rc<RefCell<Join>>, index: usize) -> Callback {
    let aggregate = aggregate.clone();
    let join = join.clone();
    Callback::from_fn(move |args| {
        let complete = {
            let mut join = join.borrow_mut();
            join.values[index] = args.to_array();
            join.remaining = join.remaining.saturating_sub(1);
            (join.remaining == 0).then(|| join.values.clone())
        };
        if let Some(values) = complete {
            aggregate.resolve(Args::new(values));
        }
    })
}

fn relay<F>(aggregate: &Deferred, forward: F) -> Callback
where
    F: Fn(&Deferred, Args) + 'static,
{
    let aggregate = aggregate.clone();
    Callback::from_fn(move |args| forward(&aggregate, args.clone()))
}
