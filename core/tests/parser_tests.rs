use settle::Value;
use settle::lexer::lex;
use settle::parser::ast::{Expr, Stmt};
use settle::parser::parse;

fn parse_source(source: &str) -> Vec<Stmt> {
    let tokens = lex(source).expect("lexing should succeed");
    let program = parse(tokens).expect("parsing should succeed");
    program.body
}

fn ident(name: &str) -> Box<Expr> {
    Box::new(Expr::Ident(name.into()))
}

#[test]
fn parse_let_with_call() {
    let stmts = parse_source("let d = deferred();");
    assert_eq!(
        stmts,
        vec![Stmt::Let {
            name: "d".into(),
            init: Expr::Call {
                callee: ident("deferred"),
                args: vec![],
            },
        }]
    );
}

#[test]
fn parse_method_call_chain() {
    let stmts = parse_source(r#"d.done(log("x")).fail(b.reject);"#);
    let expected = Expr::Call {
        callee: Box::new(Expr::Member {
            object: Box::new(Expr::Call {
                callee: Box::new(Expr::Member {
                    object: ident("d"),
                    property: "done".into(),
                }),
                args: vec![Expr::Call {
                    callee: ident("log"),
                    args: vec![Expr::Literal(Value::from("x"))],
                }],
            }),
            property: "fail".into(),
        }),
        args: vec![Expr::Member {
            object: ident("b"),
            property: "reject".into(),
        }],
    };
    assert_eq!(stmts, vec![Stmt::Expr(expected)]);
}

#[test]
fn parse_nested_array_and_negative_literals() {
    let stmts = parse_source("d.resolve([1, [-2]], null,);");
    match &stmts[0] {
        Stmt::Expr(Expr::Call { args, .. }) => {
            assert_eq!(
                args,
                &vec![
                    Expr::Array(vec![
                        Expr::Literal(Value::Number(1.0)),
                        Expr::Array(vec![Expr::Literal(Value::Number(-2.0))]),
                    ]),
                    Expr::Literal(Value::Null),
                ]
            );
        }
        other => panic!("expected call statement, got {other:?}"),
    }
}

#[test]
fn parse_multiple_statements() {
    let stmts = parse_source("let a = deferred(); let b = when(a); a.resolve();");
    assert_eq!(stmts.len(), 3);
    assert!(matches!(stmts[2], Stmt::Expr(Expr::Call { .. })));
}

#[test]
fn missing_semicolon_is_an_error() {
    let tokens = lex("let a = deferred()").expect("lexing should succeed");
    let err = parse(tokens).expect_err("parsing should fail");
    assert!(err.message.contains("expected ';', found end of input"));
}

#[test]
fn let_requires_initializer() {
    let tokens = lex("let a;").expect("lexing should succeed");
    assert!(parse(tokens).is_err());
}

#[test]
fn minus_must_precede_a_number() {
    let tokens = lex("d.resolve(-x);").expect("lexing should succeed");
    let err = parse(tokens).expect_err("parsing should fail");
    assert!(err.message.contains("expected number after '-'"));
}
