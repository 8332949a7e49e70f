use std::rc::Rc;

use crate::embedding::function_args::Args;

/// A unit of work registered on a callback list.
///
/// The core never consumes a return value, so implementations only observe
/// the arguments of the firing they are invoked for.
pub trait Function {
    fn call(&self, args: &Args);
}

#[derive(Clone)]
pub struct Callback {
    function: Rc<dyn Function>,
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Callback(..)")
    }
}

impl Callback {
    pub fn new<T: Function + 'static>(function: T) -> Self {
        Self {
            function: Rc::new(function),
        }
    }

    pub fn from_fn<F>(callback: F) -> Self
    where
        F: Fn(&Args) + 'static,
    {
        Self::new(ClosureFunction { callback })
    }

    pub fn call(&self, args: &Args) {
        self.function.call(args)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.function, &other.function)
    }
}

impl<F> From<F> for Callback
where
    F: Fn(&Args) + 'static,
{
    fn from(callback: F) -> Self {
        Self::from_fn(callback)
    }
}

struct ClosureFunction<F> {
    callback: F,
}

impl<F> Function for ClosureFunction<F>
where
    F: Fn(&Args),
{
    fn call(&self, args: &Args) {
        (self.callback)(args)
    }
}
