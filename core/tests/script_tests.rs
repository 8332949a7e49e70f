use settle::errors::{RuntimeError, SettleError};
use settle::lexer::lex;
use settle::parser::parse;
use settle::runtime::interpreter::Interpreter;

fn run_and_capture(source: &str) -> Vec<String> {
    let tokens = lex(source).expect("lexing should succeed");
    let program = parse(tokens).expect("parsing should succeed");
    let mut interp = Interpreter::new();
    interp.run(&program).expect("script should run");
    interp.output()
}

fn run_error(source: &str) -> SettleError {
    match settle::run(source) {
        Ok(_) => panic!("script should fail"),
        Err(err) => err,
    }
}

#[test]
fn done_runs_once_with_resolution_args() {
    let output = run_and_capture(
        r#"
        let d = deferred();
        d.done(log("done"));
        d.resolve(42);
        d.resolve(99);
        print(d.state());
        "#,
    );

    assert_eq!(output, vec!["done 42", "resolved"]);
}

#[test]
fn when_orders_results_by_input_position() {
    let output = run_and_capture(
        r#"
        let a = deferred();
        let b = deferred();
        let c = deferred();
        let all = when(a, b, c);
        all.done(log("all"));
        c.resolve("c");
        a.resolve(1);
        b.resolve(2, 3);
        "#,
    );

    assert_eq!(output, vec![r#"all [1] [2, 3] ["c"]"#]);
}

#[test]
fn when_rejects_with_first_failure() {
    let output = run_and_capture(
        r#"
        let a = deferred();
        let b = deferred();
        let c = deferred();
        let all = when(a, b, c);
        all.fail(log("failed")).done(log("done"));
        b.reject("boom");
        a.resolve(1);
        c.resolve(2);
        print(all.state());
        "#,
    );

    assert_eq!(output, vec!["failed boom", "rejected"]);
}

#[test]
fn then_with_null_skips_a_position() {
    let output = run_and_capture(
        r#"
        let d = deferred();
        d.then(log("ok"), null, log("progress"));
        d.notify(1);
        d.resolve("x");
        d.notify(2);
        "#,
    );

    assert_eq!(output, vec!["progress 1", "ok x"]);
}

#[test]
fn pipe_routes_rejection() {
    let output = run_and_capture(
        r#"
        let d = deferred();
        d.pipe(null, log("nope"));
        d.reject("bad", 1);
        "#,
    );

    assert_eq!(output, vec!["nope bad 1"]);
}

#[test]
fn mutators_can_be_forwarded_as_handlers() {
    let output = run_and_capture(
        r#"
        let a = deferred();
        let b = deferred();
        a.done(b.resolve).fail(b.reject);
        b.done(log("b"));
        a.resolve(7);
        print(b.state());
        "#,
    );

    assert_eq!(output, vec!["b 7", "resolved"]);
}

#[test]
fn late_subscription_replays() {
    let output = run_and_capture(
        r#"
        let d = deferred();
        d.resolve(1);
        d.done(log("late"));
        d.fail(log("never"));
        "#,
    );

    assert_eq!(output, vec!["late 1"]);
}

#[test]
fn always_fires_on_rejection() {
    let output = run_and_capture(
        r#"
        let d = deferred();
        d.always(log("settled"));
        d.reject("e");
        "#,
    );

    assert_eq!(output, vec!["settled e"]);
}

#[test]
fn log_without_label_prints_args_only() {
    let output = run_and_capture(
        r#"
        let d = deferred();
        d.done(log());
        d.resolve(1, "a");
        "#,
    );

    assert_eq!(output, vec!["1 a"]);
}

#[test]
fn literals_cover_arrays_and_negative_numbers() {
    let output = run_and_capture(
        r#"
        let d = deferred();
        d.done(log("got"));
        d.resolve([1, [2, "x"]], true, null, -3.5);
        "#,
    );

    assert_eq!(output, vec![r#"got [1, [2, "x"]] true null -3.5"#]);
}

#[test]
fn empty_when_is_resolved() {
    let output = run_and_capture(
        r#"
        let w = when();
        w.done(log("empty"));
        print(w.state());
        "#,
    );

    assert_eq!(output, vec!["empty", "resolved"]);
}

#[test]
fn progress_is_relayed_through_when() {
    let output = run_and_capture(
        r#"
        let a = deferred();
        let b = deferred();
        when(a, b).progress(log("tick"));
        a.notify(1);
        b.notify(2);
        "#,
    );

    assert_eq!(output, vec!["tick 1", "tick 2"]);
}

#[test]
fn print_describes_bindings() {
    let output = run_and_capture(
        r#"
        let d = deferred();
        let p = d.promise();
        print(d, p, "text", 1.5);
        d.reject();
        print(p);
        "#,
    );

    assert_eq!(
        output,
        vec![
            "Deferred { <pending> } Promise { <pending> } text 1.5",
            "Promise { <rejected> }"
        ]
    );
}

#[test]
fn promise_cannot_settle() {
    let err = run_error(
        r#"
        let p = deferred().promise();
        p.resolve(1);
        "#,
    );

    assert!(matches!(
        err,
        SettleError::Runtime(RuntimeError::TypeError { ref message }) if message.contains("no method 'resolve'")
    ));
}

#[test]
fn then_with_four_groups_is_an_arity_error() {
    let err = run_error(
        r#"
        let d = deferred();
        d.then(null, null, null, null);
        "#,
    );

    assert!(matches!(
        err,
        SettleError::Runtime(RuntimeError::ArityMismatch { got: 4, .. })
    ));
}

#[test]
fn undefined_variable_is_reported() {
    let err = run_error("missing.resolve(1);");
    assert!(matches!(
        err,
        SettleError::Runtime(RuntimeError::UndefinedVariable { ref name }) if name == "missing"
    ));
}

#[test]
fn calling_a_value_is_not_a_function() {
    let err = run_error("let x = 1; x();");
    assert!(matches!(
        err,
        SettleError::Runtime(RuntimeError::NotAFunction { ref name }) if name == "x"
    ));
}

#[test]
fn handlers_must_be_handlers() {
    let err = run_error(
        r#"
        let d = deferred();
        d.done(1);
        "#,
    );
    assert!(matches!(err, SettleError::Runtime(RuntimeError::TypeError { .. })));
}

#[test]
fn settle_args_must_be_values() {
    let err = run_error(
        r#"
        let a = deferred();
        let b = deferred();
        a.resolve(b);
        "#,
    );
    assert!(matches!(err, SettleError::Runtime(RuntimeError::TypeError { .. })));
}

#[test]
fn syntax_errors_surface() {
    let err = run_error("let d = deferred()");
    assert!(matches!(err, SettleError::Syntax(_)));
}
