use super::Interpreter;
use super::builtins::expect_arity;
use super::eval_expr::{expect_args, expect_callback};
use crate::embedding::Callback;
use crate::errors::RuntimeError;
use crate::runtime::deferred::Promise;
use crate::runtime::environment::Binding;
use crate::runtime::value::Value;

const MUTATORS: [&str; 3] = ["resolve", "reject", "notify"];

const SUBSCRIBERS: [&str; 7] = ["done", "fail", "progress", "always", "then", "pipe", "state"];

impl Interpreter {
    /// Validates `receiver.name` before it is called or passed as a handler.
    /// Promises expose only the subscription side.
    pub(crate) fn check_method(receiver: &Binding, name: &str) -> Result<(), RuntimeError> {
        let known = match receiver {
            Binding::Deferred(_) => {
                MUTATORS.contains(&name) || SUBSCRIBERS.contains(&name) || name == "promise"
            }
            Binding::Promise(_) => SUBSCRIBERS.contains(&name),
            other => {
                return Err(RuntimeError::TypeError {
                    message: format!("cannot read property '{name}' of {}", other.kind()),
                });
            }
        };
        if known {
            Ok(())
        } else {
            Err(RuntimeError::TypeError {
                message: format!("{} has no method '{name}'", receiver.kind()),
            })
        }
    }

    pub(crate) fn call_method(
        &mut self,
        receiver: Binding,
        name: &str,
        args: Vec<Binding>,
    ) -> Result<Binding, RuntimeError> {
        if let Binding::Deferred(deferred) = &receiver {
            match name {
                "resolve" => {
                    deferred.resolve(expect_args(args)?);
                    return Ok(receiver);
                }
                "reject" => {
                    deferred.reject(expect_args(args)?);
                    return Ok(receiver);
                }
                "notify" => {
                    deferred.notify(expect_args(args)?);
                    return Ok(receiver);
                }
                "promise" => {
                    expect_arity(name, &args, 0, Some(0))?;
                    return Ok(Binding::Promise(deferred.promise()));
                }
                _ => {}
            }
        }

        let promise = match &receiver {
            Binding::Deferred(deferred) => deferred.promise(),
            Binding::Promise(promise) => promise.clone(),
            other => {
                return Err(RuntimeError::TypeError {
                    message: format!("cannot call '{name}' on {}", other.kind()),
                });
            }
        };
        Self::check_method(&receiver, name)?;

        match name {
            "state" => {
                expect_arity(name, &args, 0, Some(0))?;
                Ok(Binding::Value(Value::from(promise.state().as_str())))
            }
            "done" => {
                promise.done_all(self.callbacks(args)?);
                Ok(receiver)
            }
            "fail" => {
                promise.fail_all(self.callbacks(args)?);
                Ok(receiver)
            }
            "progress" => {
                promise.progress_all(self.callbacks(args)?);
                Ok(receiver)
            }
            "always" => {
                promise.always_all(self.callbacks(args)?);
                Ok(receiver)
            }
            "then" | "pipe" => {
                self.subscribe_then(&promise, name, args)?;
                Ok(receiver)
            }
            _ => Err(RuntimeError::TypeError {
                message: format!("{} has no method '{name}'", receiver.kind()),
            }),
        }
    }

    fn callbacks(&self, args: Vec<Binding>) -> Result<Vec<Callback>, RuntimeError> {
        args.into_iter()
            .map(|arg| expect_callback(arg, &self.budget))
            .collect()
    }

    /// `null` leaves a position empty. More than three groups is reported here
    /// instead of reaching `Promise::then`, which treats it as a bug.
    fn subscribe_then(
        &self,
        promise: &Promise,
        name: &str,
        args: Vec<Binding>,
    ) -> Result<(), RuntimeError> {
        expect_arity(name, &args, 0, Some(3))?;
        let mut groups = Vec::with_capacity(args.len());
        for arg in args {
            let group = match arg {
                Binding::Value(Value::Null) => None,
                Binding::Value(value) => {
                    return Err(RuntimeError::TypeError {
                        message: format!("expected a handler or null, got {}", value.type_name()),
                    });
                }
                other => Some(expect_callback(other, &self.budget)?),
            };
            groups.push(group);
        }
        promise.then(groups);
        Ok(())
    }
}
