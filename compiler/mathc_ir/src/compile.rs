//! Contains the [`Compiler`], the tree walker turning the node sequence of one
//! equation into an [`Equation`].

use std::sync::Arc;

use log::trace;
use mathc_handler::Handler;
use mathc_syntax::{display, Node};

use crate::{
    branch::BranchSet,
    diagnostic::{Diagnostic, Error, MalformedExpression, UnsupportedOperator},
    equation::{Binding, Equation},
    expression,
    fragment::{Fragment, Function, Operator},
    operator::{self, Entry},
    session::Session,
    symbol::SymbolTable,
    Config,
};

mod absolute;
mod named;
mod power;
mod reference;

/// Checks whether an implicit `*` goes between two juxtaposed nodes.
///
/// Juxtaposition multiplies unless the two nodes are digits of one number,
/// the previous node heads a summation, the previous node opens or the
/// current node closes a parenthesis group, or either node is an arithmetic
/// operator or an argument separator.
#[must_use]
pub fn implicit_multiplication(previous: &Node, current: &Node) -> bool {
    !(previous.is_numeric() && current.is_numeric())
        && !previous.is_sum()
        && !previous.is_open()
        && !current.is_close()
        && !previous.is_arithmetic()
        && !current.is_arithmetic()
        && !previous.is_separator()
        && !current.is_separator()
}

/// Walks the nodes of one equation and emits the code of its branches.
#[allow(missing_debug_implementations)]
pub struct Compiler<'a> {
    session: &'a Session,
    handler: &'a dyn Handler<Box<dyn Diagnostic>>,
    symbols: SymbolTable,
    branches: BranchSet,
    externals: Vec<Arc<Equation>>,
}

impl<'a> Compiler<'a> {
    /// Creates a compiler resolving names against the equations of `session`.
    #[must_use]
    pub fn new(
        session: &'a Session,
        handler: &'a dyn Handler<Box<dyn Diagnostic>>,
    ) -> Self {
        Self {
            session,
            handler,
            symbols: SymbolTable::default(),
            branches: BranchSet::default(),
            externals: Vec::new(),
        }
    }

    fn config(&self) -> &'a Config { self.session.config() }

    /// Compiles a whole equation: the optional `left = ` binding and the
    /// expression on the right side.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    pub fn compile_equation(mut self, nodes: &[Node]) -> Result<Equation, Error> {
        let (binding, right) =
            match nodes.iter().position(|node| {
                node.as_atom().is_some_and(mathc_syntax::Atom::is_equality)
            }) {
                Some(position) => (
                    Some(parse_left_side(&nodes[..position])?),
                    &nodes[position + 1..],
                ),
                None => (None, nodes),
            };

        for parameter in binding.iter().flat_map(|x| x.parameters()) {
            self.symbols.add_argument(parameter);
        }

        self.compile(right, 0)?;
        self.finalize(binding)
    }

    /// Compiles a node sequence into every live branch.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    pub fn compile(&mut self, nodes: &[Node], depth: usize) -> Result<(), Error> {
        let mut index = 0;

        while let Some(node) = nodes.get(index) {
            if index > 0 && implicit_multiplication(&nodes[index - 1], node) {
                self.branches.push(&Fragment::Operator(Operator::Multiply));
            }

            trace!(
                "{:indent$}{node} ({} branches)",
                "",
                self.branches.len(),
                indent = depth * 2
            );

            index += self.compile_node(nodes, index, depth)? + 1;
        }

        Ok(())
    }

    /// Compiles `nodes[index]` and returns the number of nodes after it that
    /// were consumed as its operand.
    fn compile_node(
        &mut self,
        nodes: &[Node],
        index: usize,
        depth: usize,
    ) -> Result<usize, Error> {
        match &nodes[index] {
            Node::Literal(literal) if literal.is_absolute_marker() => {
                self.compile_absolute(nodes, index, depth)
            }

            Node::Literal(literal) => {
                self.branches.push(&Fragment::Number(literal.text.clone()));
                Ok(0)
            }

            Node::Variable(variable) => {
                self.compile_variable(&variable.name, nodes, index, depth)
            }

            Node::Atom(atom) => {
                match operator::lookup(&atom.symbol) {
                    Some(Entry::Single(fragment)) => self.branches.push(fragment),
                    Some(Entry::Alternatives(alternatives)) => {
                        self.branches.multiply(alternatives);
                    }
                    None => {
                        return Err(UnsupportedOperator {
                            symbol: atom.symbol.clone(),
                        }
                        .into())
                    }
                }

                Ok(0)
            }

            Node::Power(power) => self.compile_power(power, nodes, index, depth),

            Node::Fraction(fraction) => {
                if fraction.numerator.is_empty()
                    || fraction.denominator.is_empty()
                {
                    return Err(MalformedExpression::new(
                        &nodes[index],
                        "a fraction needs both a numerator and a denominator",
                    )
                    .into());
                }

                self.branches.push(&Fragment::Open);
                self.compile_parenthesized(&fraction.numerator, depth + 1)?;
                self.branches.push(&Fragment::Operator(Operator::Divide));
                self.compile_parenthesized(&fraction.denominator, depth + 1)?;
                self.branches.push(&Fragment::Close);

                Ok(0)
            }

            Node::Root(root) => {
                self.compile_call(
                    Function::SquareRoot,
                    &nodes[index],
                    &root.body,
                    depth + 1,
                )?;

                Ok(0)
            }

            Node::Group(group) => {
                self.compile(&group.body, depth + 1)?;
                Ok(0)
            }

            Node::NamedOperator(named) => {
                self.compile_named(named, nodes, index, depth)
            }
        }
    }

    fn compile_parenthesized(
        &mut self,
        nodes: &[Node],
        depth: usize,
    ) -> Result<(), Error> {
        self.branches.push(&Fragment::Open);
        self.compile(nodes, depth)?;
        self.branches.push(&Fragment::Close);

        Ok(())
    }

    /// Emits `function(operand)` for a function of one argument.
    fn compile_call(
        &mut self,
        function: Function,
        subject: &Node,
        operand: &[Node],
        depth: usize,
    ) -> Result<(), Error> {
        if operand.is_empty() {
            return Err(MalformedExpression::new(
                subject,
                format!("`{function}` has no operand"),
            )
            .into());
        }

        self.branches.push(&Fragment::Call(function));
        self.compile(operand, depth)?;
        self.branches.push(&Fragment::Close);

        Ok(())
    }

    /// Returns the index of `equation` in the external declarations, adding
    /// it if needed.
    fn declare_external(&mut self, equation: &Arc<Equation>) -> usize {
        if let Some(index) = self
            .externals
            .iter()
            .position(|external| Arc::ptr_eq(external, equation))
        {
            return index;
        }

        self.externals.push(equation.clone());
        self.externals.len() - 1
    }

    fn report(&self, diagnostic: impl Diagnostic) {
        self.handler.receive(Box::new(diagnostic));
    }

    /// Parses every branch and freezes the equation.
    fn finalize(self, binding: Option<Binding>) -> Result<Equation, Error> {
        let executions = self
            .branches
            .into_branches()
            .into_iter()
            .map(|branch| expression::parse(branch.fragments()))
            .collect::<Result<Vec<_>, _>>()?;

        let (arguments, ignored) = self.symbols.into_parts();

        Ok(Equation::new(binding, arguments, ignored, executions, self.externals))
    }
}

/// Parses the left side of an equation: `name` binds a variable and
/// `name(p1, p2, ...)` binds a function.
///
/// # Errors
///
/// If the left side has any other shape.
pub fn parse_left_side(nodes: &[Node]) -> Result<Binding, MalformedExpression> {
    let malformed = || {
        MalformedExpression::new(
            display(nodes),
            "the left side must be `name` or `name(parameters)`",
        )
    };

    let [Node::Variable(name), rest @ ..] = nodes else {
        return Err(malformed());
    };

    if rest.is_empty() {
        return Ok(Binding::variable(name.name.clone()));
    }

    let [open, inner @ .., close] = rest else {
        return Err(malformed());
    };

    if !open.is_open() || !close.is_close() {
        return Err(malformed());
    }

    let mut parameters = Vec::new();

    for (index, node) in inner.iter().enumerate() {
        match node {
            Node::Variable(parameter) if index % 2 == 0 => {
                if parameters.contains(&parameter.name) {
                    return Err(MalformedExpression::new(
                        display(nodes),
                        format!("`{}` is declared twice", parameter.name),
                    ));
                }

                parameters.push(parameter.name.clone());
            }
            node if index % 2 == 1 && node.is_separator() => {}
            _ => return Err(malformed()),
        }
    }

    if inner.len() % 2 == 0 && !inner.is_empty() {
        // trailing separator
        return Err(malformed());
    }

    Ok(Binding::function(name.name.clone(), parameters))
}
