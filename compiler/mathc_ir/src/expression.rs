//! Contains the definition of [`Expression`], the evaluable tree each branch
//! is parsed into when an equation is frozen.

use std::{fmt::Display, sync::Arc};

use crate::{
    diagnostic::MalformedExpression,
    equation::{CallError, Equation},
    fragment::{Bound, Fragment, Function, Operator},
    IntegralRule,
};

/// The values bound while evaluating an expression, searched from the most
/// recent binding.
pub type Scope<'a> = Vec<(&'a str, f64)>;

/// Looks up the innermost binding of `name`.
///
/// # Errors
///
/// If nothing binds `name`.
pub fn lookup(scope: &[(&str, f64)], name: &str) -> Result<f64, CallError> {
    scope
        .iter()
        .rev()
        .find_map(|(bound, value)| (*bound == name).then_some(*value))
        .ok_or_else(|| CallError::UnboundVariable(name.to_string()))
}

/// An evaluable expression.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Expression {
    Number(f64),

    Variable(String),

    Negate(Box<Expression>),

    Binary {
        operator: Operator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    Call {
        function: Function,
        arguments: Vec<Expression>,
    },

    /// `sum(variable = lower..=upper) body`.
    Sum {
        variable: String,
        lower: Bound,
        upper: Bound,
        body: Box<Expression>,
    },

    /// A Riemann sum of `body` over `partitions` partitions of `width`
    /// starting at `start`.
    Integral {
        variable: String,
        start: f64,
        width: f64,
        partitions: usize,
        rule: IntegralRule,
        body: Box<Expression>,
    },

    /// The value of one branch of an external variable.
    Reference {
        external: usize,
        branch: usize,
    },

    /// One branch of an external function applied to the arguments.
    Apply {
        external: usize,
        branch: usize,
        arguments: Vec<Expression>,
    },

    /// The forward difference of one branch of an external function at the
    /// arguments.
    Derivative {
        external: usize,
        branch: usize,
        step: f64,
        arguments: Vec<Expression>,
    },
}

struct Parser<'a> {
    fragments: &'a [Fragment],
    cursor: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Fragment> { self.fragments.get(self.cursor) }

    fn next(&mut self) -> Option<&'a Fragment> {
        let fragment = self.peek()?;
        self.cursor += 1;
        Some(fragment)
    }

    fn error(&self, reason: impl Into<String>) -> MalformedExpression {
        MalformedExpression::new(
            self.fragments
                .iter()
                .map(fragment_text)
                .collect::<Vec<_>>()
                .join(" "),
            reason,
        )
    }

    fn peek_operator(&self, multiplicative: bool) -> Option<Operator> {
        match self.peek() {
            Some(Fragment::Operator(operator))
                if operator.is_multiplicative() == multiplicative =>
            {
                Some(*operator)
            }
            _ => None,
        }
    }

    fn expect_close(&mut self) -> Result<(), MalformedExpression> {
        match self.next() {
            Some(Fragment::Close) => Ok(()),
            _ => Err(self.error("unbalanced parenthesis")),
        }
    }

    fn parse_additive(&mut self) -> Result<Expression, MalformedExpression> {
        let mut left = self.parse_multiplicative()?;

        while let Some(operator) = self.peek_operator(false) {
            self.cursor += 1;
            let right = self.parse_multiplicative()?;

            left = Expression::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(
        &mut self,
    ) -> Result<Expression, MalformedExpression> {
        let mut left = self.parse_unary()?;

        while let Some(operator) = self.peek_operator(true) {
            self.cursor += 1;
            let right = self.parse_unary()?;

            left = Expression::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression, MalformedExpression> {
        match self.peek() {
            Some(Fragment::Operator(Operator::Add)) => {
                self.cursor += 1;
                self.parse_unary()
            }
            Some(Fragment::Operator(Operator::Subtract)) => {
                self.cursor += 1;
                Ok(Expression::Negate(Box::new(self.parse_unary()?)))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_arguments(
        &mut self,
    ) -> Result<Vec<Expression>, MalformedExpression> {
        let mut arguments = Vec::new();

        if matches!(self.peek(), Some(Fragment::Close)) {
            self.cursor += 1;
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_additive()?);

            match self.next() {
                Some(Fragment::Separator) => {}
                Some(Fragment::Close) => return Ok(arguments),
                _ => return Err(self.error("unterminated argument list")),
            }
        }
    }

    fn parse_body(&mut self) -> Result<Box<Expression>, MalformedExpression> {
        let body = self.parse_additive()?;
        self.expect_close()?;
        Ok(Box::new(body))
    }

    fn parse_primary(&mut self) -> Result<Expression, MalformedExpression> {
        let Some(fragment) = self.next() else {
            return Err(self.error("expected an operand"));
        };

        Ok(match fragment {
            Fragment::Number(text) => Expression::Number(
                text.parse()
                    .map_err(|_| self.error(format!("`{text}` is not a number")))?,
            ),

            Fragment::Variable(name) => Expression::Variable(name.clone()),

            Fragment::Open => {
                let inner = self.parse_additive()?;
                self.expect_close()?;
                inner
            }

            Fragment::Call(function) => {
                let arguments = self.parse_arguments()?;

                if arguments.len() != function.arity() {
                    return Err(self.error(format!(
                        "`{function}` takes {} argument(s) but {} were given",
                        function.arity(),
                        arguments.len()
                    )));
                }

                Expression::Call { function: *function, arguments }
            }

            Fragment::Sum { variable, lower, upper } => Expression::Sum {
                variable: variable.clone(),
                lower: lower.clone(),
                upper: upper.clone(),
                body: self.parse_body()?,
            },

            Fragment::Integral { variable, start, width, partitions, rule } => {
                Expression::Integral {
                    variable: variable.clone(),
                    start: *start,
                    width: *width,
                    partitions: *partitions,
                    rule: *rule,
                    body: self.parse_body()?,
                }
            }

            Fragment::Reference { external, branch } => {
                Expression::Reference { external: *external, branch: *branch }
            }

            Fragment::Apply { external, branch } => Expression::Apply {
                external: *external,
                branch: *branch,
                arguments: self.parse_arguments()?,
            },

            Fragment::Derivative { external, branch, step } => {
                Expression::Derivative {
                    external: *external,
                    branch: *branch,
                    step: *step,
                    arguments: self.parse_arguments()?,
                }
            }

            Fragment::Operator(_) | Fragment::Close | Fragment::Separator => {
                return Err(self.error(format!(
                    "unexpected `{}`",
                    fragment_text(fragment)
                )))
            }
        })
    }
}

/// Parses the code of one branch.
///
/// `+` and `-` bind looser than `*` and `/`; both levels are left
/// associative. A leading `+` or `-` is a sign.
///
/// # Errors
///
/// If the code is empty, unbalanced or has a call with the wrong number of
/// arguments.
pub fn parse(fragments: &[Fragment]) -> Result<Expression, MalformedExpression> {
    let mut parser = Parser { fragments, cursor: 0 };
    let expression = parser.parse_additive()?;

    if parser.cursor != fragments.len() {
        return Err(parser.error("unbalanced parenthesis"));
    }

    Ok(expression)
}

fn fragment_text(fragment: &Fragment) -> String {
    match fragment {
        Fragment::Number(text) | Fragment::Variable(text) => text.clone(),
        Fragment::Operator(operator) => operator.to_string(),
        Fragment::Open => "(".to_string(),
        Fragment::Close => ")".to_string(),
        Fragment::Separator => ",".to_string(),
        Fragment::Call(function) => format!("{function}("),
        Fragment::Sum { variable, lower, upper } => {
            format!("sum({variable} = {lower}..={upper}, ")
        }
        Fragment::Integral { variable, start, width, partitions, .. } => {
            format!("integral({variable} = {start} + {partitions} * {width}, ")
        }
        Fragment::Reference { external, branch } => {
            format!("external[{external}][{branch}]")
        }
        Fragment::Apply { external, branch } => {
            format!("external[{external}][{branch}](")
        }
        Fragment::Derivative { external, branch, .. } => {
            format!("external[{external}][{branch}]'(")
        }
    }
}

/// The largest number of terms a summation evaluates.
pub const MAX_SUM_TERMS: f64 = 16_777_216.0;

fn evaluate_bound(bound: &Bound, scope: &[(&str, f64)]) -> Result<f64, CallError> {
    match bound {
        Bound::Number(value) => Ok(*value),
        Bound::Variable(name) => lookup(scope, name),
    }
}

fn external(
    externals: &[Arc<Equation>],
    index: usize,
) -> Result<&Equation, CallError> {
    externals
        .get(index)
        .map(AsRef::as_ref)
        .ok_or(CallError::MissingExternal(index))
}

impl Expression {
    /// Evaluates the expression.
    ///
    /// `externals` are the equations the expression refers to by index and
    /// `scope` holds the values of the arguments and of the enclosing loop
    /// variables.
    ///
    /// # Errors
    ///
    /// If a variable has no value or an external is called with the wrong
    /// number of arguments.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn evaluate<'a>(
        &'a self,
        externals: &'a [Arc<Equation>],
        scope: &mut Scope<'a>,
    ) -> Result<f64, CallError> {
        match self {
            Self::Number(value) => Ok(*value),

            Self::Variable(name) => lookup(scope, name),

            Self::Negate(operand) => Ok(-operand.evaluate(externals, scope)?),

            Self::Binary { operator, left, right } => {
                let left = left.evaluate(externals, scope)?;
                let right = right.evaluate(externals, scope)?;

                Ok(operator.apply(left, right))
            }

            Self::Call { function, arguments } => {
                let arguments = Self::evaluate_all(arguments, externals, scope)?;

                Ok(function.apply(&arguments))
            }

            Self::Sum { variable, lower, upper, body } => {
                let lower = evaluate_bound(lower, scope)?;
                let upper = evaluate_bound(upper, scope)?;
                let count = (upper + 1.0 - lower).floor();

                if count > MAX_SUM_TERMS {
                    return Err(CallError::SumTooLong(variable.clone()));
                }

                // NaN and empty ranges sum to zero
                let count = if count > 0.0 { count as usize } else { 0 };
                let mut total = 0.0;

                for offset in 0..count {
                    scope.push((variable.as_str(), lower + offset as f64));
                    let value = body.evaluate(externals, scope);
                    scope.pop();

                    total += value?;
                }

                Ok(total)
            }

            Self::Integral { variable, start, width, partitions, rule, body } => {
                let mut total = 0.0;

                for partition in 0..*partitions {
                    let sample =
                        start + (partition as f64 + rule.offset()) * width;

                    scope.push((variable.as_str(), sample));
                    let value = body.evaluate(externals, scope);
                    scope.pop();

                    total += width * value?;
                }

                Ok(total)
            }

            Self::Reference { external: index, branch } => {
                external(externals, *index)?.evaluate_nested(*branch, &[], scope)
            }

            Self::Apply { external: index, branch, arguments } => {
                let arguments = Self::evaluate_all(arguments, externals, scope)?;

                external(externals, *index)?.evaluate_nested(
                    *branch,
                    &arguments,
                    scope,
                )
            }

            Self::Derivative { external: index, branch, step, arguments } => {
                let function = external(externals, *index)?;
                let arguments = Self::evaluate_all(arguments, externals, scope)?;
                let shifted =
                    arguments.iter().map(|value| value + step).collect::<Vec<_>>();

                let at = function.evaluate_nested(*branch, &arguments, scope)?;
                let next = function.evaluate_nested(*branch, &shifted, scope)?;

                Ok((next - at) / step)
            }
        }
    }

    fn evaluate_all<'a>(
        expressions: &'a [Self],
        externals: &'a [Arc<Equation>],
        scope: &mut Scope<'a>,
    ) -> Result<Vec<f64>, CallError> {
        expressions
            .iter()
            .map(|expression| expression.evaluate(externals, scope))
            .collect()
    }
}

fn write_arguments(
    f: &mut std::fmt::Formatter<'_>,
    arguments: &[Expression],
) -> std::fmt::Result {
    for (index, argument) in arguments.iter().enumerate() {
        if index != 0 {
            write!(f, ", ")?;
        }

        write!(f, "{argument}")?;
    }

    Ok(())
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Negate(operand) => write!(f, "-{operand}"),
            Self::Binary { operator, left, right } => {
                write!(f, "({left} {operator} {right})")
            }
            Self::Call { function, arguments } => {
                write!(f, "{function}(")?;
                write_arguments(f, arguments)?;
                write!(f, ")")
            }
            Self::Sum { variable, lower, upper, body } => {
                write!(f, "sum({variable} = {lower}..={upper}, {body})")
            }
            Self::Integral { variable, start, width, partitions, rule, body } => {
                write!(
                    f,
                    "integral({variable} = {start} + {partitions} * {width}, \
                     {rule}, {body})"
                )
            }
            Self::Reference { external, branch } => {
                write!(f, "external[{external}][{branch}]")
            }
            Self::Apply { external, branch, arguments } => {
                write!(f, "external[{external}][{branch}](")?;
                write_arguments(f, arguments)?;
                write!(f, ")")
            }
            Self::Derivative { external, branch, arguments, .. } => {
                write!(f, "external[{external}][{branch}]'(")?;
                write_arguments(f, arguments)?;
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod test;
