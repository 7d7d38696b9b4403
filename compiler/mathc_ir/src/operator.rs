//! Contains the operator table mapping operator atoms to fragments.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::fragment::{Fragment, Operator};

/// What an operator atom compiles to.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A single fragment appended to every branch.
    Single(Fragment),

    /// Alternative fragments; every branch is multiplied by them.
    Alternatives(Vec<Fragment>),
}

lazy_static! {
    static ref OPERATORS: HashMap<&'static str, Entry> = {
        let add = || Fragment::Operator(Operator::Add);
        let subtract = || Fragment::Operator(Operator::Subtract);
        let multiply = || Fragment::Operator(Operator::Multiply);
        let divide = || Fragment::Operator(Operator::Divide);
        let plus_minus = || Entry::Alternatives(vec![add(), subtract()]);

        HashMap::from([
            ("+", Entry::Single(add())),
            ("-", Entry::Single(subtract())),
            ("*", Entry::Single(multiply())),
            ("\\times", Entry::Single(multiply())),
            ("×", Entry::Single(multiply())),
            ("/", Entry::Single(divide())),
            ("\\div", Entry::Single(divide())),
            ("÷", Entry::Single(divide())),
            ("±", plus_minus()),
            ("\\pm", plus_minus()),
            ("\\plusmn", plus_minus()),
            ("(", Entry::Single(Fragment::Open)),
            ("\\left", Entry::Single(Fragment::Open)),
            (")", Entry::Single(Fragment::Close)),
            ("\\right", Entry::Single(Fragment::Close)),
            (",", Entry::Single(Fragment::Separator)),
        ])
    };
}

/// Looks up the table entry of an operator symbol.
#[must_use]
pub fn lookup(symbol: &str) -> Option<&'static Entry> { OPERATORS.get(symbol) }

#[cfg(test)]
mod test;
