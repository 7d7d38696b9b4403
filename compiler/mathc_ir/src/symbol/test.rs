use super::SymbolTable;

#[test]
fn arguments_keep_first_seen_order() {
    let mut symbols = SymbolTable::default();

    assert!(symbols.add_argument("y"));
    assert!(symbols.add_argument("x"));
    assert!(!symbols.add_argument("y"));

    assert_eq!(symbols.arguments(), &["y", "x"]);
}

#[test]
fn ignored_name_is_never_promoted() {
    let mut symbols = SymbolTable::default();

    assert!(symbols.add_ignored("i"));
    assert!(!symbols.add_argument("i"));
    assert!(!symbols.add_ignored("i"));

    assert!(symbols.arguments().is_empty());
    assert_eq!(symbols.ignored(), &["i"]);
}

#[test]
fn argument_is_not_ignored_later() {
    let mut symbols = SymbolTable::default();

    assert!(symbols.add_argument("x"));
    assert!(!symbols.add_ignored("x"));

    assert!(symbols.is_argument("x"));
    assert!(!symbols.is_ignored("x"));
    assert!(symbols.is_local("x"));
}
