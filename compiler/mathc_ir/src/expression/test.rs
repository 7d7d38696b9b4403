use super::{parse, Expression, Scope};
use crate::{
    equation::CallError,
    fragment::{Bound, Fragment, Function, Operator},
    IntegralRule,
};

fn number(text: &str) -> Fragment { Fragment::Number(text.to_string()) }

fn variable(name: &str) -> Fragment { Fragment::Variable(name.to_string()) }

fn operator(operator: Operator) -> Fragment { Fragment::Operator(operator) }

fn evaluate(fragments: &[Fragment], bindings: &[(&str, f64)]) -> f64 {
    let expression = parse(fragments).unwrap();
    let mut scope: Scope = bindings.to_vec();

    expression.evaluate(&[], &mut scope).unwrap()
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    // x - y * z
    let fragments = [
        variable("x"),
        operator(Operator::Subtract),
        variable("y"),
        operator(Operator::Multiply),
        variable("z"),
    ];

    let value = evaluate(&fragments, &[("x", 5.0), ("y", -3.0), ("z", 2.0)]);

    assert!((value - 11.0).abs() < f64::EPSILON);
}

#[test]
fn same_level_operators_are_left_associative() {
    // 2 / 5 * 4
    let fragments = [
        number("2"),
        operator(Operator::Divide),
        number("5"),
        operator(Operator::Multiply),
        number("4"),
    ];

    assert!((evaluate(&fragments, &[]) - 1.6).abs() < 1e-12);
}

#[test]
fn leading_signs_are_unary() {
    // - 5 + + 2
    let fragments = [
        operator(Operator::Subtract),
        number("5"),
        operator(Operator::Add),
        operator(Operator::Add),
        number("2"),
    ];

    assert!((evaluate(&fragments, &[]) + 3.0).abs() < f64::EPSILON);
}

#[test]
fn calls_check_their_arity() {
    // pow(2, 10)
    let fragments = [
        Fragment::Call(Function::Power),
        number("2"),
        Fragment::Separator,
        number("10"),
        Fragment::Close,
    ];

    assert!((evaluate(&fragments, &[]) - 1024.0).abs() < f64::EPSILON);

    let fragments =
        [Fragment::Call(Function::Power), number("2"), Fragment::Close];

    assert!(parse(&fragments).is_err());
}

#[test]
fn sum_binds_its_index() {
    // sum(i = 5..=n, pow(i, 2))
    let fragments = [
        Fragment::Sum {
            variable: "i".to_string(),
            lower: Bound::Number(5.0),
            upper: Bound::Variable("n".to_string()),
        },
        Fragment::Call(Function::Power),
        variable("i"),
        Fragment::Separator,
        number("2"),
        Fragment::Close,
        Fragment::Close,
    ];

    assert!((evaluate(&fragments, &[("n", 6.0)]) - 61.0).abs() < f64::EPSILON);
    assert!(evaluate(&fragments, &[("n", 3.0)]).abs() < f64::EPSILON);
}

#[test]
fn integral_samples_every_partition() {
    // the integral of 1 over [0, 2] in 4 partitions
    for rule in [IntegralRule::LeftEdge, IntegralRule::Midpoint] {
        let fragments = [
            Fragment::Integral {
                variable: "x".to_string(),
                start: 0.0,
                width: 0.5,
                partitions: 4,
                rule,
            },
            number("1"),
            Fragment::Close,
        ];

        assert!((evaluate(&fragments, &[]) - 2.0).abs() < 1e-12);
    }
}

#[test]
fn midpoint_rule_is_exact_for_linear_integrands() {
    let fragments = [
        Fragment::Integral {
            variable: "x".to_string(),
            start: 0.0,
            width: 0.5,
            partitions: 4,
            rule: IntegralRule::Midpoint,
        },
        variable("x"),
        Fragment::Close,
    ];

    assert!((evaluate(&fragments, &[]) - 2.0).abs() < 1e-12);
}

#[test]
fn inner_binding_shadows_argument() {
    let expression = Expression::Sum {
        variable: "x".to_string(),
        lower: Bound::Number(1.0),
        upper: Bound::Number(3.0),
        body: Box::new(Expression::Variable("x".to_string())),
    };

    let mut scope = vec![("x", 100.0)];
    let value = expression.evaluate(&[], &mut scope).unwrap();

    assert!((value - 6.0).abs() < f64::EPSILON);
    assert_eq!(scope, vec![("x", 100.0)]);
}

#[test]
fn unbound_variable_is_reported() {
    let expression = parse(&[variable("y")]).unwrap();

    assert_eq!(
        expression.evaluate(&[], &mut Scope::new()),
        Err(CallError::UnboundVariable("y".to_string()))
    );
}

#[test]
fn malformed_code_is_rejected() {
    assert!(parse(&[]).is_err());
    assert!(parse(&[Fragment::Open, number("1")]).is_err());
    assert!(parse(&[number("1"), Fragment::Close]).is_err());
    assert!(parse(&[number("1"), operator(Operator::Multiply)]).is_err());
    assert!(parse(&[number(".")]).is_err());
}

#[test]
fn oversized_sum_is_rejected() {
    let expression = Expression::Sum {
        variable: "i".to_string(),
        lower: Bound::Number(1.0),
        upper: Bound::Number(1e300),
        body: Box::new(Expression::Variable("i".to_string())),
    };

    assert_eq!(
        expression.evaluate(&[], &mut Scope::new()),
        Err(CallError::SumTooLong("i".to_string()))
    );
}
