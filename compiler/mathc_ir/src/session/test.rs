use mathc_handler::{Counter, Storage};
use mathc_syntax::Node;

use super::Session;
use crate::{diagnostic::Diagnostic, equation::Kind, Config};

fn l(text: &str) -> Node { Node::literal(text) }

fn v(name: &str) -> Node { Node::variable(name) }

fn a(symbol: &str) -> Node { Node::atom(symbol) }

fn compile_all(equations: &[Vec<Node>]) -> Session {
    let storage = Storage::<Box<dyn Diagnostic>>::new();
    let mut session = Session::new(Config::default());

    session.compile_sequence(equations, &storage).unwrap();

    session
}

#[test]
fn first_binding_wins() {
    let session = compile_all(&[
        vec![v("b"), a("="), l("1")],
        vec![v("b"), a("="), l("2")],
    ]);

    assert_eq!(session.equations().len(), 2);
    assert_eq!(session.resolve("b").unwrap().call(&[]).unwrap(), vec![1.0]);
    assert!(session.resolve("c").is_none());
}

#[test]
fn failed_equation_is_not_registered() {
    let storage = Storage::<Box<dyn Diagnostic>>::new();
    let mut session = Session::default();

    assert!(session.compile(&[v("b"), a("="), a("!")], &storage).is_err());
    assert!(session.resolve("b").is_none());
    assert_eq!(session.equations().len(), 0);
}

#[test]
fn referenced_variable_brings_its_arguments() {
    // b = 5a, b + c
    let session = compile_all(&[
        vec![v("b"), a("="), l("5"), v("a")],
        vec![v("b"), a("+"), v("c")],
    ]);

    let last = session.equations().last().unwrap();

    assert_eq!(last.arguments(), &["a", "c"]);
    assert_eq!(last.call(&[2.0, 1.0]).unwrap(), vec![11.0]);
}

#[test]
fn repeated_reference_reuses_the_pairing() {
    // b = ± 5a, b + b
    let session = compile_all(&[
        vec![v("b"), a("="), a("\\pm"), l("5"), v("a")],
        vec![v("b"), a("+"), v("b")],
    ]);

    let last = session.equations().last().unwrap();

    assert_eq!(last.branch_count(), 2);
    assert_eq!(last.externals().len(), 1);
    assert_eq!(last.call(&[1.0]).unwrap(), vec![-10.0, 10.0]);
}

#[test]
fn independent_references_multiply() {
    // b = ± a, c = ± 1, b + c
    let session = compile_all(&[
        vec![v("b"), a("="), a("\\pm"), v("a")],
        vec![v("c"), a("="), a("\\pm"), l("1")],
        vec![v("b"), a("+"), v("c")],
    ]);

    let last = session.equations().last().unwrap();

    assert_eq!(last.branch_count(), 4);
    assert_eq!(last.call(&[10.0]).unwrap(), vec![-11.0, -9.0, 9.0, 11.0]);
}

#[test]
fn function_application() {
    // f(x) = x^2, f(y + 1)
    let session = compile_all(&[
        vec![v("f"), a("("), v("x"), a(")"), a("="), Node::power(v("x"), l("2"))],
        vec![v("f"), a("("), v("y"), a("+"), l("1"), a(")")],
    ]);

    let function = session.resolve("f").unwrap();

    assert_eq!(function.kind(), Some(Kind::Function));
    assert_eq!(function.parameters(), &["x"]);

    let last = session.equations().last().unwrap();

    assert_eq!(last.arguments(), &["y"]);
    assert_eq!(last.call(&[2.0]).unwrap(), vec![9.0]);
}

#[test]
fn function_with_free_arguments_and_several_parameters() {
    // g(x) = x + k, h(x, y) = x - y, g(2) h(5, 2)
    let session = compile_all(&[
        vec![v("g"), a("("), v("x"), a(")"), a("="), v("x"), a("+"), v("k")],
        vec![
            v("h"),
            a("("),
            v("x"),
            a(","),
            v("y"),
            a(")"),
            a("="),
            v("x"),
            a("-"),
            v("y"),
        ],
        vec![
            v("g"),
            a("("),
            l("2"),
            a(")"),
            v("h"),
            a("("),
            l("5"),
            a(","),
            l("2"),
            a(")"),
        ],
    ]);

    let last = session.equations().last().unwrap();

    assert_eq!(last.arguments(), &["k"]);
    assert_eq!(last.call(&[3.0]).unwrap(), vec![15.0]);
}

#[test]
fn application_checks_arity() {
    let storage = Storage::<Box<dyn Diagnostic>>::new();
    let mut session = Session::default();

    session
        .compile(
            &[v("f"), a("("), v("x"), a(")"), a("="), v("x")],
            &storage,
        )
        .unwrap();

    let error = session
        .compile(&[v("f"), a("("), l("1"), a(","), l("2"), a(")")], &storage)
        .unwrap_err();

    assert!(error.is_malformed_expression());

    let error = session.compile(&[v("f"), l("1")], &storage).unwrap_err();

    assert!(error.is_malformed_expression());
}

#[test]
fn local_names_shadow_bindings() {
    // b = 5, g(b) = 2b
    let session = compile_all(&[
        vec![v("b"), a("="), l("5")],
        vec![v("g"), a("("), v("b"), a(")"), a("="), l("2"), v("b")],
    ]);

    let last = session.equations().last().unwrap();

    assert!(last.externals().is_empty());
    assert_eq!(last.call(&[4.0]).unwrap(), vec![8.0]);
}

#[test]
fn derivative_reports_an_approximation() {
    let counter = Counter::default();
    let mut session = Session::default();

    session
        .compile(
            &[v("f"), a("("), v("x"), a(")"), a("="), Node::power(v("x"), l("3"))],
            &counter,
        )
        .unwrap();

    let equation = session
        .compile(&[Node::prime("f"), a("("), l("2"), a(")")], &counter)
        .unwrap();

    assert_eq!(counter.count(), 1);

    let slope = equation.call(&[]).unwrap();

    assert!((slope[0] - 12.0).abs() < 1e-3);
}

#[test]
fn derivative_of_variable_is_unresolved() {
    let storage = Storage::<Box<dyn Diagnostic>>::new();
    let mut session = Session::default();

    session.compile(&[v("b"), a("="), l("5")], &storage).unwrap();

    let error = session
        .compile(&[Node::prime("b"), a("("), v("x"), a(")")], &storage)
        .unwrap_err();

    assert_eq!(error.into_unresolved_reference().unwrap().name, "b");
    assert_eq!(session.equations().len(), 1);
}
