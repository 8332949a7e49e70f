use std::rc::Rc;

use super::{Interpreter, StepBudget};
use crate::embedding::{Args, Callback};
use crate::errors::RuntimeError;
use crate::parser::ast::Expr;
use crate::runtime::deferred::{Deferred, Promise};
use crate::runtime::environment::Binding;
use crate::runtime::value::Value;

impl Interpreter {
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> Result<Binding, RuntimeError> {
        match expr {
            Expr::Literal(value) => Ok(Binding::Value(value.clone())),
            Expr::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    let binding = self.eval_expr(item)?;
                    values.push(expect_value(binding)?);
                }
                Ok(Binding::Value(Value::Array(values)))
            }
            Expr::Ident(name) => self.env.get(name),
            Expr::Member { object, property } => {
                let receiver = self.eval_expr(object)?;
                Self::check_method(&receiver, property)?;
                Ok(Binding::Method {
                    receiver: Box::new(receiver),
                    name: property.clone(),
                })
            }
            Expr::Call { callee, args } => {
                let function = self.eval_expr(callee)?;
                let mut evaluated = Vec::with_capacity(args.len());
                for arg in args {
                    evaluated.push(self.eval_expr(arg)?);
                }
                match function {
                    Binding::Builtin(builtin) => self.call_builtin(builtin, evaluated),
                    Binding::Method { receiver, name } => self.call_method(*receiver, &name, evaluated),
                    _ => Err(RuntimeError::NotAFunction {
                        name: callee.describe(),
                    }),
                }
            }
        }
    }
}

pub(super) fn expect_value(binding: Binding) -> Result<Value, RuntimeError> {
    match binding {
        Binding::Value(value) => Ok(value),
        other => Err(RuntimeError::TypeError {
            message: format!("expected a value, got {}", other.kind()),
        }),
    }
}

pub(super) fn expect_args(bindings: Vec<Binding>) -> Result<Args, RuntimeError> {
    bindings.into_iter().map(expect_value).collect()
}

pub(super) fn expect_promise(binding: Binding) -> Result<Promise, RuntimeError> {
    match binding {
        Binding::Deferred(deferred) => Ok(deferred.promise()),
        Binding::Promise(promise) => Ok(promise),
        other => Err(RuntimeError::TypeError {
            message: format!("expected a deferred or promise, got {}", other.kind()),
        }),
    }
}

/// Turns a handler expression into a callback. A bare deferred mutator such
/// as `d.resolve` forwards its arguments to that deferred; each forward costs
/// one step of `budget` and is dropped once the budget is spent.
pub(super) fn expect_callback(
    binding: Binding,
    budget: &Rc<StepBudget>,
) -> Result<Callback, RuntimeError> {
    match binding {
        Binding::Handler(callback) => Ok(callback),
        Binding::Method { receiver, name } => match (*receiver, name.as_str()) {
            (Binding::Deferred(target), mutator @ ("resolve" | "reject" | "notify")) => {
                let forward: fn(&Deferred, Args) = match mutator {
                    "resolve" => |target, args| {
                        target.resolve(args);
                    },
                    "reject" => |target, args| {
                        target.reject(args);
                    },
                    _ => |target, args| {
                        target.notify(args);
                    },
                };
                let budget = budget.clone();
                Ok(Callback::from_fn(move |args| {
                    if budget.charge() {
                        forward(&target, args.clone());
                    }
                }))
            }
            (receiver, name) => Err(RuntimeError::TypeError {
                message: format!("{}.{name} cannot be used as a handler", receiver.kind()),
            }),
        },
        other => Err(RuntimeError::TypeError {
            message: format!("expected a handler, got {}", other.kind()),
        }),
    }
}
