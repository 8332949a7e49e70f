use super::Interpreter;
use super::eval_expr::{expect_promise, expect_value};
use crate::embedding::Callback;
use crate::errors::RuntimeError;
use crate::runtime::deferred::{Deferred, Promise, when};
use crate::runtime::environment::{Binding, Builtin};
use crate::runtime::value::Value;

impl Interpreter {
    pub(crate) fn call_builtin(
        &mut self,
        builtin: Builtin,
        args: Vec<Binding>,
    ) -> Result<Binding, RuntimeError> {
        match builtin {
            Builtin::Deferred => {
                expect_arity(builtin.name(), &args, 0, Some(0))?;
                Ok(Binding::Deferred(Deferred::new()))
            }
            Builtin::When => {
                let promises = args
                    .into_iter()
                    .map(expect_promise)
                    .collect::<Result<Vec<Promise>, _>>()?;
                Ok(Binding::Promise(when(promises)))
            }
            Builtin::Log => {
                expect_arity(builtin.name(), &args, 0, Some(1))?;
                let label = match args.into_iter().next() {
                    Some(binding) => Some(expect_value(binding)?.to_string()),
                    None => None,
                };
                Ok(Binding::Handler(self.log_handler(label)))
            }
            Builtin::Print => {
                let line = args
                    .iter()
                    .map(Binding::describe)
                    .collect::<Vec<_>>()
                    .join(" ");
                self.output.borrow_mut().push(line);
                Ok(Binding::Value(Value::Null))
            }
        }
    }

    /// A handler that writes its label followed by the firing arguments. Each
    /// run costs one step.
    fn log_handler(&self, label: Option<String>) -> Callback {
        let output = self.output.clone();
        let budget = self.budget.clone();
        Callback::from_fn(move |args| {
            if !budget.charge() {
                return;
            }
            let line = match &label {
                Some(label) if args.is_empty() => label.clone(),
                Some(label) => format!("{label} {args}"),
                None => args.to_string(),
            };
            output.borrow_mut().push(line);
        })
    }
}

pub(super) fn expect_arity(
    name: &str,
    args: &[Binding],
    min: usize,
    max: Option<usize>,
) -> Result<(), RuntimeError> {
    let got = args.len();
    let fits = got >= min && max.is_none_or(|max| got <= max);
    if fits {
        return Ok(());
    }
    let expected = match max {
        Some(max) if max == min => min.to_string(),
        Some(max) if min == 0 => format!("at most {max}"),
        Some(max) => format!("{min} to {max}"),
        None => format!("at least {min}"),
    };
    Err(RuntimeError::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}
