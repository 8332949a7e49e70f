use std::cell::RefCell;
use std::rc::Rc;

use settle::errors::{RuntimeError, SettleError};
use settle::{Args, Context, Deferred, Engine, State, Value};

#[test]
fn step_limit_stops_long_scripts() {
    let mut ctx = Engine::new().with_max_steps(2).new_context();
    let err = ctx
        .eval("let a = deferred(); let b = deferred(); let c = deferred();")
        .expect_err("third statement should exceed the limit");

    assert!(matches!(
        err,
        SettleError::Runtime(RuntimeError::StepLimitExceeded { limit: 2 })
    ));
    assert!(ctx.deferred("b").is_some());
    assert!(ctx.deferred("c").is_none());
}

#[test]
fn step_limit_applies_per_eval() {
    let mut ctx = Engine::new().with_max_steps(1).new_context();
    ctx.eval("let a = deferred();").expect("first eval fits");
    ctx.eval("a.resolve(1);").expect("second eval fits");
    assert_eq!(ctx.deferred("a").map(|d| d.state()), Some(State::Resolved));
}

#[test]
fn host_deferred_is_settled_by_script() {
    let host = Deferred::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    host.done(move |args: &Args| sink.borrow_mut().extend(args.iter().cloned()));

    let mut ctx = Context::new();
    ctx.set_deferred("job", host.clone());
    ctx.eval(r#"job.resolve("finished", 3);"#)
        .expect("script should run");

    assert_eq!(host.state(), State::Resolved);
    assert_eq!(
        *seen.borrow(),
        vec![Value::from("finished"), Value::from(3)]
    );
}

#[test]
fn host_promise_is_read_only_in_scripts() {
    let host = Deferred::new();
    let mut ctx = Context::new();
    ctx.set_promise("job", host.promise());

    ctx.eval(r#"job.done(log("job"));"#).expect("subscription is allowed");
    assert!(ctx.eval("job.reject();").is_err());

    host.resolve(Value::from("ok"));
    assert_eq!(ctx.output(), vec!["job ok"]);
}

#[test]
fn host_values_are_usable_as_arguments() {
    let mut ctx = Context::new();
    ctx.set_value("answer", Value::from(42));
    ctx.eval(r#"let d = deferred(); d.done(log("answer")); d.resolve(answer);"#)
        .expect("script should run");
    assert_eq!(ctx.take_output(), vec!["answer 42"]);
    assert!(ctx.output().is_empty());
    assert_eq!(ctx.value("answer"), Some(Value::from(42)));
}

#[test]
fn single_input_when_is_the_same_promise() {
    let mut ctx = Context::new();
    ctx.eval("let a = deferred(); let w = when(a);")
        .expect("script should run");

    let a = ctx.promise("a").expect("a is bound");
    let w = ctx.promise("w").expect("w is bound");
    assert!(a.ptr_eq(&w));
}

#[test]
fn bindings_persist_across_evals() {
    let mut ctx = Context::new();
    ctx.eval("let d = deferred();").expect("first eval");
    ctx.eval("d.done(log(\"later\"));").expect("second eval");
    ctx.eval("d.resolve();").expect("third eval");
    assert_eq!(ctx.output(), vec!["later"]);
}

#[test]
fn snapshot_reports_states_in_name_order() {
    let mut ctx = Context::new();
    ctx.eval(
        r#"
        let z = deferred();
        let a = deferred();
        let p = a.promise();
        let n = 1;
        z.reject();
        "#,
    )
    .expect("script should run");

    let snapshot = serde_json::to_value(ctx.snapshot()).expect("snapshot serializes");
    assert_eq!(
        snapshot,
        serde_json::json!([
            { "name": "a", "kind": "deferred", "state": "pending" },
            { "name": "n", "kind": "value", "value": 1.0 },
            { "name": "p", "kind": "promise", "state": "pending" },
            { "name": "z", "kind": "deferred", "state": "rejected" },
        ])
    );
}

#[test]
fn eval_file_runs_script_from_disk() {
    let path = std::env::temp_dir().join(format!("settle-eval-file-{}.settle", std::process::id()));
    std::fs::write(&path, "let d = deferred(); d.resolve(1); print(d.state());")
        .expect("temp file is writable");

    let mut ctx = Context::new();
    let result = ctx.eval_file(&path);
    let _ = std::fs::remove_file(&path);

    result.expect("file should run");
    assert_eq!(ctx.output(), vec!["resolved"]);
}

#[test]
fn eval_file_reports_missing_files() {
    let mut ctx = Context::new();
    let err = ctx
        .eval_file("/definitely/not/here.settle")
        .expect_err("missing file should fail");
    assert!(matches!(err, SettleError::Io { .. }));
    assert!(err.to_string().contains("could not read"));
}

#[test]
fn step_limit_stops_forwarding_cycles() {
    let mut ctx = Engine::new().with_max_steps(1000).new_context();
    let err = ctx
        .eval(
            r#"
            let a = deferred();
            let b = deferred();
            a.progress(b.notify);
            b.progress(a.notify);
            a.notify(1);
            "#,
        )
        .expect_err("progress cycle should exhaust the budget");

    assert!(matches!(
        err,
        SettleError::Runtime(RuntimeError::StepLimitExceeded { limit: 1000 })
    ));
    assert_eq!(ctx.deferred("a").map(|d| d.state()), Some(State::Pending));
}

#[test]
fn handler_runs_count_against_the_step_limit() {
    let mut ctx = Engine::new().with_max_steps(3).new_context();
    let err = ctx
        .eval(r#"let d = deferred(); d.done(log("x")); d.resolve(1);"#)
        .expect_err("the log handler is the fourth step");

    assert!(matches!(
        err,
        SettleError::Runtime(RuntimeError::StepLimitExceeded { limit: 3 })
    ));
    assert!(ctx.output().is_empty());
    assert_eq!(ctx.deferred("d").map(|d| d.state()), Some(State::Resolved));
}

#[test]
fn budget_resets_for_the_next_eval() {
    let mut ctx = Engine::new().with_max_steps(4).new_context();
    ctx.eval(r#"let d = deferred(); d.done(log("x")); d.resolve(1);"#)
        .expect("four steps fit");
    ctx.eval(r#"let e = deferred(); e.fail(log("y")); e.reject(2);"#)
        .expect("the budget starts over");
    assert_eq!(ctx.output(), vec!["x 1", "y 2"]);
}
