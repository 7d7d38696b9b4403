use mathc_syntax::{display, Atom, NamedOperator, Node, OperatorName};
use rust_decimal::{prelude::ToPrimitive, Decimal};

use super::Compiler;
use crate::{
    diagnostic::{
        Approximation, DivisionApproximation, Error, MalformedExpression,
    },
    extract::{extract, Options},
    fragment::{Bound, Fragment, Function},
};

/// Concatenates the text of a literal number, optionally negative:
/// `- 1 0 . 5` is `-10.5`.
fn numeric_text(nodes: &[Node]) -> Option<String> {
    if let [Node::Group(group)] = nodes {
        return numeric_text(&group.body);
    }

    let (mut text, digits) = match nodes {
        [sign, rest @ ..]
            if sign.as_atom().is_some_and(|atom| atom.symbol == "-") =>
        {
            ("-".to_string(), rest)
        }
        _ => (String::new(), nodes),
    };

    if digits.is_empty() {
        return None;
    }

    for digit in digits {
        text.push_str(&digit.as_literal().filter(|x| x.is_numeric())?.text);
    }

    Some(text)
}

/// Reads a summation limit: a literal number or a single variable.
///
/// A variable limit is always a fresh argument of the equation; it is never
/// resolved against earlier bindings.
fn bound(nodes: &[Node]) -> Option<Bound> {
    match nodes {
        [Node::Variable(variable)] => Some(Bound::Variable(variable.name.clone())),
        [Node::Group(group)] => bound(&group.body),
        _ => numeric_text(nodes)?.parse().ok().map(Bound::Number),
    }
}

/// Reads an integral limit, which must be a literal number.
fn limit(nodes: Option<&[Node]>) -> Option<Decimal> {
    numeric_text(nodes?)?.parse().ok()
}

impl Compiler<'_> {
    pub(super) fn compile_named(
        &mut self,
        named: &NamedOperator,
        nodes: &[Node],
        index: usize,
        depth: usize,
    ) -> Result<usize, Error> {
        match named.name {
            OperatorName::Sum => self.compile_sum(named, nodes, index, depth),
            OperatorName::Integral => {
                self.compile_integral(named, nodes, index, depth)
            }
            OperatorName::Sin => self.compile_trigonometric(
                Function::Sine,
                named,
                nodes,
                index,
                depth,
            ),
            OperatorName::Cos => self.compile_trigonometric(
                Function::Cosine,
                named,
                nodes,
                index,
                depth,
            ),
            OperatorName::Tan => self.compile_trigonometric(
                Function::Tangent,
                named,
                nodes,
                index,
                depth,
            ),
        }
    }

    /// Compiles `\sum_{i = lower}^{upper} operand`.
    fn compile_sum(
        &mut self,
        named: &NamedOperator,
        nodes: &[Node],
        index: usize,
        depth: usize,
    ) -> Result<usize, Error> {
        let subject = &nodes[index];
        let malformed = |reason: &str| MalformedExpression::new(subject, reason);

        let Some([Node::Variable(variable), equality, lower @ ..]) =
            named.subscript.as_deref()
        else {
            return Err(malformed("a summation needs a subscript `i = lower`").into());
        };

        if !equality.as_atom().is_some_and(Atom::is_equality) {
            return Err(malformed("a summation needs a subscript `i = lower`").into());
        }

        let lower = bound(lower).ok_or_else(|| {
            malformed("the lower limit must be a number or a variable")
        })?;
        let upper = named.superscript.as_deref().and_then(bound).ok_or_else(
            || malformed("the upper limit must be a number or a variable"),
        )?;

        for limit in [&lower, &upper] {
            if let Bound::Variable(name) = limit {
                self.symbols.add_argument(name);
            }
        }

        self.symbols.add_ignored(&variable.name);

        let related = extract(nodes, index, Options::default());

        if related.operand.is_empty() {
            return Err(malformed("the summation has no operand").into());
        }

        self.branches.push(&Fragment::Sum {
            variable: variable.name.clone(),
            lower,
            upper,
        });
        self.compile(related.operand, depth + 1)?;
        self.branches.push(&Fragment::Close);

        Ok(related.consumed)
    }

    /// Compiles `\int_{lower}^{upper} operand [d<var>]` into a Riemann sum.
    fn compile_integral(
        &mut self,
        named: &NamedOperator,
        nodes: &[Node],
        index: usize,
        depth: usize,
    ) -> Result<usize, Error> {
        let subject = &nodes[index];
        let malformed = |reason: &str| MalformedExpression::new(subject, reason);
        let config = self.config();

        let (Some(lower), Some(upper)) = (
            limit(named.subscript.as_deref()),
            limit(named.superscript.as_deref()),
        ) else {
            return Err(
                malformed("the limits of an integral must be numbers").into()
            );
        };

        let partitions = config.integral_partitions;
        let width = upper
            .checked_sub(lower)
            .and_then(|range| range.checked_div(Decimal::from(partitions)))
            .and_then(|width| width.to_f64())
            .ok_or_else(|| {
                malformed("the range can't be divided into partitions")
            })?;
        let start = lower
            .to_f64()
            .ok_or_else(|| malformed("the lower limit is out of range"))?;

        let related =
            extract(nodes, index, Options { require_differential: true });

        if related.operand.is_empty() {
            return Err(malformed("the integral has no operand").into());
        }

        let variable = related
            .differential
            .map_or_else(|| config.differential_variable.clone(), str::to_string);

        self.symbols.add_ignored(&variable);

        self.report(DivisionApproximation {
            subject: display(&nodes[index..=index + related.consumed])
                .to_string(),
            approximation: Approximation::Integral { partitions },
        });

        self.branches.push(&Fragment::Integral {
            variable,
            start,
            width,
            partitions,
            rule: config.integral_rule,
        });
        self.compile(related.operand, depth + 1)?;
        self.branches.push(&Fragment::Close);

        Ok(related.consumed)
    }

    /// Compiles `\sin`, `\cos` or `\tan` applied to the following operand run,
    /// given in degrees.
    fn compile_trigonometric(
        &mut self,
        function: Function,
        named: &NamedOperator,
        nodes: &[Node],
        index: usize,
        depth: usize,
    ) -> Result<usize, Error> {
        if named.subscript.is_some() || named.superscript.is_some() {
            return Err(MalformedExpression::new(
                &nodes[index],
                format!("`{}` takes no limits", named.name),
            )
            .into());
        }

        let related = extract(nodes, index, Options::default());

        self.compile_call(function, &nodes[index], related.operand, depth + 1)?;

        Ok(related.consumed)
    }
}
