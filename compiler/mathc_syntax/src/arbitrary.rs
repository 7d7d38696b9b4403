//! Strategies generating expression trees for property tests.

use lazy_static::lazy_static;
use proptest::{
    collection::vec,
    prelude::{any, prop_oneof, Strategy},
    sample::select,
};
use strum::IntoEnumIterator;

use crate::{Node, OperatorName};

/// The variable names generated expressions draw from.
pub static VARIABLES: [&str; 3] = ["x", "y", "z"];

/// The operator symbols placed between generated operands.
pub static OPERATORS: [&str; 5] = ["+", "-", "*", "\\times", "\\pm"];

lazy_static! {
    static ref TRIGONOMETRIC: Vec<OperatorName> = OperatorName::iter()
        .filter(|name| {
            matches!(
                name,
                OperatorName::Sin | OperatorName::Cos | OperatorName::Tan
            )
        })
        .collect();
}

/// Generates a single operand: a non-zero digit or one of [`VARIABLES`].
pub fn operand() -> impl Strategy<Value = Node> {
    prop_oneof![
        (1u8..=9).prop_map(|digit| Node::literal(digit.to_string())),
        select(&VARIABLES[..]).prop_map(Node::variable),
    ]
}

/// Generates a flat infix sequence `operand (operator operand)*` with at most
/// `max_operators` operators, optionally prefixed by `\pm`.
pub fn flat_expression(
    max_operators: usize,
) -> impl Strategy<Value = Vec<Node>> {
    (
        any::<bool>(),
        operand(),
        vec((select(&OPERATORS[..]), operand()), 0..=max_operators),
    )
        .prop_map(|(signed, first, rest)| {
            let mut nodes = Vec::with_capacity(rest.len() * 2 + 2);

            if signed {
                nodes.push(Node::atom("\\pm"));
            }

            nodes.push(first);

            for (operator, operand) in rest {
                nodes.push(Node::atom(operator));
                nodes.push(operand);
            }

            nodes
        })
}

/// Generates `\sin`, `\cos` or `\tan` applied to a single operand.
pub fn trigonometric_call() -> impl Strategy<Value = (OperatorName, Vec<Node>)>
{
    (select(TRIGONOMETRIC.clone()), operand())
        .prop_map(|(name, operand)| (name, vec![Node::named(name), operand]))
}
