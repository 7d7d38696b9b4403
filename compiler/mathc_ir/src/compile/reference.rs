//! Resolution of the names bound by earlier equations of the session.

use std::sync::Arc;

use mathc_syntax::{display, Node};

use super::Compiler;
use crate::{
    diagnostic::{
        Approximation, DivisionApproximation, Error, MalformedExpression,
        UnresolvedReference,
    },
    equation::{Equation, Kind},
    extract::{extract, Options},
    fragment::Fragment,
};

/// Counts the comma separated arguments of a parenthesised argument list.
fn argument_count(inner: &[Node]) -> usize {
    if inner.is_empty() {
        return 0;
    }

    let mut depth = 0usize;
    let mut count = 1;

    for node in inner {
        if node.is_open() {
            depth += 1;
        } else if node.is_close() {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && node.is_separator() {
            count += 1;
        }
    }

    count
}

impl Compiler<'_> {
    /// Compiles a variable node. Local names come first, then the names bound
    /// by earlier equations; anything else becomes a new argument.
    pub(super) fn compile_variable(
        &mut self,
        name: &str,
        nodes: &[Node],
        index: usize,
        depth: usize,
    ) -> Result<usize, Error> {
        let session = self.session;

        if !self.symbols.is_local(name) {
            match session.resolve(name) {
                Some(equation) if equation.kind() == Some(Kind::Function) => {
                    return self.compile_application(
                        equation,
                        nodes,
                        index,
                        depth,
                        |external, branch| Fragment::Apply { external, branch },
                    );
                }

                Some(equation) => {
                    self.compile_reference(equation);
                    return Ok(0);
                }

                None => {
                    self.symbols.add_argument(name);
                }
            }
        }

        self.branches.push(&Fragment::Variable(name.to_string()));

        Ok(0)
    }

    /// Pairs every branch with a branch of the referenced variable and brings
    /// in its arguments.
    fn compile_reference(&mut self, equation: &Arc<Equation>) {
        let external = self.declare_external(equation);

        self.branches.select(external, equation.branch_count());
        self.branches
            .push_selected(external, |branch| Fragment::Reference { external, branch });

        for argument in equation.arguments() {
            self.symbols.add_argument(argument);
        }
    }

    /// Compiles `f'(arguments)` as a forward difference of the earlier
    /// function `f`.
    pub(super) fn compile_derivative(
        &mut self,
        name: &str,
        nodes: &[Node],
        index: usize,
        depth: usize,
    ) -> Result<usize, Error> {
        let session = self.session;

        let Some(equation) = session
            .resolve(name)
            .filter(|equation| equation.kind() == Some(Kind::Function))
        else {
            return Err(UnresolvedReference { name: name.to_string() }.into());
        };

        let step = self.config().derivative_step;
        let consumed = self.compile_application(
            equation,
            nodes,
            index,
            depth,
            |external, branch| Fragment::Derivative { external, branch, step },
        )?;

        self.report(DivisionApproximation {
            subject: display(&nodes[index..=index + consumed]).to_string(),
            approximation: Approximation::Derivative { step },
        });

        Ok(consumed)
    }

    /// Applies the earlier function `equation` to the parenthesised argument
    /// list following `nodes[index]`. Every branch is paired with a branch of
    /// the function.
    fn compile_application(
        &mut self,
        equation: &Arc<Equation>,
        nodes: &[Node],
        index: usize,
        depth: usize,
        fragment: impl Fn(usize, usize) -> Fragment,
    ) -> Result<usize, Error> {
        let related = extract(nodes, index, Options::default());

        if !related.is_parenthesized() {
            return Err(MalformedExpression::new(
                &nodes[index],
                "a function must be applied to a parenthesized argument list",
            )
            .into());
        }

        let inner = related.inner();
        let parameters = equation.parameters().len();
        let found = argument_count(inner);

        if found != parameters {
            return Err(MalformedExpression::new(
                display(&nodes[index..=index + related.consumed]),
                format!("expected {parameters} argument(s) but {found} were given"),
            )
            .into());
        }

        let external = self.declare_external(equation);

        self.branches.select(external, equation.branch_count());
        self.branches.push_selected(external, |branch| fragment(external, branch));
        self.compile(inner, depth + 1)?;
        self.branches.push(&Fragment::Close);

        for argument in equation.arguments().iter().skip(parameters) {
            self.symbols.add_argument(argument);
        }

        Ok(related.consumed)
    }
}
