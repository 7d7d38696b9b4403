use super::{lookup, Entry};
use crate::fragment::{Fragment, Operator};

#[test]
fn spellings_of_multiplication_agree() {
    for symbol in ["*", "\\times", "×"] {
        assert_eq!(
            lookup(symbol),
            Some(&Entry::Single(Fragment::Operator(Operator::Multiply))),
            "{symbol}"
        );
    }
}

#[test]
fn plus_minus_has_two_alternatives() {
    for symbol in ["±", "\\pm", "\\plusmn"] {
        assert_eq!(
            lookup(symbol),
            Some(&Entry::Alternatives(vec![
                Fragment::Operator(Operator::Add),
                Fragment::Operator(Operator::Subtract),
            ])),
            "{symbol}"
        );
    }
}

#[test]
fn unknown_symbols_have_no_entry() {
    for symbol in ["=", "%", "\\cdot", "|"] {
        assert!(lookup(symbol).is_none(), "{symbol}");
    }
}
