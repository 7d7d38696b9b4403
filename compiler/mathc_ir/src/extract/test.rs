use mathc_syntax::{Node, OperatorName};

use super::{extract, extract_absolute, Options};

fn sum() -> Node { Node::named(OperatorName::Sum) }

fn atom(symbol: &str) -> Node { Node::atom(symbol) }

fn variable(name: &str) -> Node { Node::variable(name) }

fn literal(text: &str) -> Node { Node::literal(text) }

#[test]
fn run_ends_at_additive_operator() {
    // \sum a * b + c
    let nodes = [
        sum(),
        variable("a"),
        atom("*"),
        variable("b"),
        atom("+"),
        variable("c"),
    ];

    let related = extract(&nodes, 0, Options::default());

    assert_eq!(related.operand, &nodes[1..4]);
    assert_eq!(related.consumed, 3);
    assert_eq!(related.differential, None);
    assert!(!related.is_parenthesized());
}

#[test]
fn leading_sign_stays_in_the_run() {
    // \sin - x + 1
    let nodes =
        [Node::named(OperatorName::Sin), atom("-"), variable("x"), atom("+")];

    let related = extract(&nodes, 0, Options::default());

    assert_eq!(related.operand, &nodes[1..3]);
    assert_eq!(related.consumed, 2);
}

#[test]
fn parenthesized_run_ends_when_group_closes() {
    // \sum ( i ^ 2 + ( 1 ) ) + 3
    let nodes = [
        sum(),
        atom("("),
        Node::power(variable("i"), literal("2")),
        atom("+"),
        atom("("),
        literal("1"),
        atom(")"),
        atom(")"),
        atom("+"),
        literal("3"),
    ];

    let related = extract(&nodes, 0, Options::default());

    assert_eq!(related.operand, &nodes[1..8]);
    assert_eq!(related.consumed, 7);
    assert!(related.is_parenthesized());
    assert_eq!(related.inner(), &nodes[2..7]);
}

#[test]
fn parenthesized_run_stops_before_juxtaposed_operand() {
    // f ( x ) y
    let nodes = [variable("f"), atom("("), variable("x"), atom(")"), variable("y")];

    let related = extract(&nodes, 0, Options::default());

    assert_eq!(related.operand, &nodes[1..4]);
    assert_eq!(related.consumed, 3);
}

#[test]
fn differential_marker_ends_and_is_consumed() {
    // \int 4 x d x + 1
    let nodes = [
        Node::named(OperatorName::Integral),
        literal("4"),
        variable("x"),
        variable("d"),
        variable("x"),
        atom("+"),
        literal("1"),
    ];

    let related =
        extract(&nodes, 0, Options { require_differential: true });

    assert_eq!(related.operand, &nodes[1..3]);
    assert_eq!(related.consumed, 4);
    assert_eq!(related.differential, Some("x"));
}

#[test]
fn differential_marker_is_a_product_without_the_option() {
    // \sum d x
    let nodes = [sum(), variable("d"), variable("x")];

    let related = extract(&nodes, 0, Options::default());

    assert_eq!(related.operand, &nodes[1..]);
    assert_eq!(related.consumed, 2);
    assert_eq!(related.differential, None);
}

#[test]
fn run_may_be_empty() {
    let nodes = [sum()];

    let related = extract(&nodes, 0, Options::default());

    assert!(related.operand.is_empty());
    assert_eq!(related.consumed, 0);
}

#[test]
fn absolute_value_stops_at_next_marker() {
    // | - 1 | ( - 2 )
    let nodes = [
        Node::absolute_marker(),
        atom("-"),
        literal("1"),
        Node::absolute_marker(),
        atom("("),
        atom("-"),
        literal("2"),
        atom(")"),
    ];

    let related = extract_absolute(&nodes, 0).unwrap();

    assert_eq!(related.operand, &nodes[1..3]);
    assert_eq!(related.consumed, 3);
}

#[test]
fn unclosed_absolute_value_is_malformed() {
    let nodes = [Node::absolute_marker(), literal("1")];

    let error = extract_absolute(&nodes, 0).unwrap_err();

    assert_eq!(error.subject, "| 1");
}
