//! Contains the definition of [`Node`], the expression tree handed to the
//! compiler by the math-notation parser.
//!
//! Every level of the tree is a flat, ordered sequence of nodes. Binary
//! operators are not nested: `a + b` is the three siblings `a`, `+` and `b`.
//! Only powers, fractions, roots, groups and named operators carry children.

use std::fmt::{Display, Formatter};

use enum_as_inner::EnumAsInner;
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;

/// The literal text of the marker that opens and closes an absolute value.
pub const ABSOLUTE_MARKER: &str = "|";

/// A numeric literal, kept as the text the parser produced.
///
/// The absolute value marker `|` is also delivered as a literal.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::From,
)]
pub struct Literal {
    /// The text of the literal, e.g. `"2"` or `"."`.
    pub text: String,
}

impl Literal {
    /// Checks whether this literal is the absolute value marker `|`.
    #[must_use]
    pub fn is_absolute_marker(&self) -> bool { self.text == ABSOLUTE_MARKER }

    /// Checks whether this literal is part of a number (anything but the
    /// absolute value marker).
    #[must_use]
    pub fn is_numeric(&self) -> bool { !self.is_absolute_marker() }
}

/// An identifier such as `x` or `f`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::From,
)]
pub struct Variable {
    /// The identifier.
    pub name: String,
}

/// An operator symbol such as `+`, `\pm`, `(` or `=`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::From,
)]
pub struct Atom {
    /// The symbol exactly as the parser spelled it.
    pub symbol: String,
}

impl Atom {
    /// Checks whether the atom opens a parenthesis group.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.symbol.as_str(), "(" | "\\left")
    }

    /// Checks whether the atom closes a parenthesis group.
    #[must_use]
    pub fn is_close(&self) -> bool {
        matches!(self.symbol.as_str(), ")" | "\\right")
    }

    /// Checks whether the atom is `+`, `-` or one of the spellings of `±`.
    #[must_use]
    pub fn is_additive(&self) -> bool {
        matches!(self.symbol.as_str(), "+" | "-" | "±" | "\\pm" | "\\plusmn")
    }

    /// Checks whether the atom is one of the arithmetic operators
    /// `+ - * × ÷ / ±`.
    #[must_use]
    pub fn is_arithmetic(&self) -> bool {
        self.is_additive()
            || matches!(
                self.symbol.as_str(),
                "*" | "\\times" | "×" | "/" | "\\div" | "÷"
            )
    }

    /// Checks whether the atom is the equality sign splitting an equation.
    #[must_use]
    pub fn is_equality(&self) -> bool { self.symbol == "=" }

    /// Checks whether the atom separates function arguments.
    #[must_use]
    pub fn is_separator(&self) -> bool { self.symbol == "," }
}

/// The meaning of the superscript of a [`Power`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Superscript {
    /// `base^exponent`.
    Exponent(Box<Node>),

    /// `base^\circ`, an angle given in degrees.
    Angle,

    /// `f'`, the derivative marker.
    Prime,
}

/// A base with a superscript.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Power {
    /// The node the superscript is attached to.
    pub base: Box<Node>,

    /// The superscript.
    pub superscript: Superscript,
}

/// `\frac{numerator}{denominator}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    /// The nodes above the bar.
    pub numerator: Vec<Node>,

    /// The nodes below the bar.
    pub denominator: Vec<Node>,
}

/// `\sqrt{body}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Root {
    /// The nodes under the radical.
    pub body: Vec<Node>,
}

/// A transparent grouping of nodes, e.g. `{...}` in the source notation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
    /// The grouped nodes.
    pub body: Vec<Node>,
}

/// An enumeration of the named operators the compiler understands.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
    derive_more::Display,
)]
pub enum OperatorName {
    /// `\sum`
    #[display(fmt = "\\sum")]
    Sum,

    /// `\int`
    #[display(fmt = "\\int")]
    Integral,

    /// `\sin`
    #[display(fmt = "\\sin")]
    Sin,

    /// `\cos`
    #[display(fmt = "\\cos")]
    Cos,

    /// `\tan`
    #[display(fmt = "\\tan")]
    Tan,
}

/// A named operator with its optional limits, e.g. `\sum_{i=1}^{n}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedOperator {
    /// Which operator this is.
    pub name: OperatorName,

    /// The nodes of the lower limit (`_{...}`).
    pub subscript: Option<Vec<Node>>,

    /// The nodes of the upper limit (`^{...}`).
    pub superscript: Option<Vec<Node>>,
}

/// A node of the expression tree.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumAsInner,
    derive_more::From,
)]
#[allow(missing_docs)]
pub enum Node {
    Literal(Literal),
    Variable(Variable),
    Atom(Atom),
    Power(Power),
    Fraction(Fraction),
    Root(Root),
    Group(Group),
    NamedOperator(NamedOperator),
}

impl Node {
    /// Creates a [`Node::Literal`].
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(Literal { text: text.into() })
    }

    /// Creates the absolute value marker literal `|`.
    #[must_use]
    pub fn absolute_marker() -> Self { Self::literal(ABSOLUTE_MARKER) }

    /// Creates a [`Node::Variable`].
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(Variable { name: name.into() })
    }

    /// Creates a [`Node::Atom`].
    #[must_use]
    pub fn atom(symbol: impl Into<String>) -> Self {
        Self::Atom(Atom { symbol: symbol.into() })
    }

    /// Creates `base^exponent`.
    #[must_use]
    pub fn power(base: Self, exponent: Self) -> Self {
        Self::Power(Power {
            base: Box::new(base),
            superscript: Superscript::Exponent(Box::new(exponent)),
        })
    }

    /// Creates `base^\circ`.
    #[must_use]
    pub fn angle(base: Self) -> Self {
        Self::Power(Power { base: Box::new(base), superscript: Superscript::Angle })
    }

    /// Creates the derivative marker `name'`.
    #[must_use]
    pub fn prime(name: impl Into<String>) -> Self {
        Self::Power(Power {
            base: Box::new(Self::variable(name)),
            superscript: Superscript::Prime,
        })
    }

    /// Creates `\frac{numerator}{denominator}`.
    #[must_use]
    pub fn fraction(numerator: Vec<Self>, denominator: Vec<Self>) -> Self {
        Self::Fraction(Fraction { numerator, denominator })
    }

    /// Creates `\sqrt{body}`.
    #[must_use]
    pub fn root(body: Vec<Self>) -> Self { Self::Root(Root { body }) }

    /// Creates a transparent group.
    #[must_use]
    pub fn group(body: Vec<Self>) -> Self { Self::Group(Group { body }) }

    /// Creates a named operator without limits, e.g. `\sin`.
    #[must_use]
    pub const fn named(name: OperatorName) -> Self {
        Self::NamedOperator(NamedOperator {
            name,
            subscript: None,
            superscript: None,
        })
    }

    /// Creates a named operator with both limits, e.g. `\int_{a}^{b}`.
    #[must_use]
    pub fn bounded(
        name: OperatorName,
        subscript: Vec<Self>,
        superscript: Vec<Self>,
    ) -> Self {
        Self::NamedOperator(NamedOperator {
            name,
            subscript: Some(subscript),
            superscript: Some(superscript),
        })
    }

    /// Checks whether the node is an atom opening a parenthesis group.
    #[must_use]
    pub fn is_open(&self) -> bool { self.as_atom().is_some_and(Atom::is_open) }

    /// Checks whether the node is an atom closing a parenthesis group.
    #[must_use]
    pub fn is_close(&self) -> bool {
        self.as_atom().is_some_and(Atom::is_close)
    }

    /// Checks whether the node is an additive operator atom (`+ - ±`).
    #[must_use]
    pub fn is_additive(&self) -> bool {
        self.as_atom().is_some_and(Atom::is_additive)
    }

    /// Checks whether the node is an arithmetic operator atom.
    #[must_use]
    pub fn is_arithmetic(&self) -> bool {
        self.as_atom().is_some_and(Atom::is_arithmetic)
    }

    /// Checks whether the node is an atom separating function arguments.
    #[must_use]
    pub fn is_separator(&self) -> bool {
        self.as_atom().is_some_and(Atom::is_separator)
    }

    /// Checks whether the node is a literal that is part of a number.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.as_literal().is_some_and(Literal::is_numeric)
    }

    /// Checks whether the node is the absolute value marker `|`.
    #[must_use]
    pub fn is_absolute_marker(&self) -> bool {
        self.as_literal().is_some_and(Literal::is_absolute_marker)
    }

    /// Checks whether the node is the head of a summation.
    #[must_use]
    pub fn is_sum(&self) -> bool {
        self.as_named_operator().is_some_and(|x| x.name == OperatorName::Sum)
    }
}

struct Sequence<'a>(&'a [Node]);

impl Display for Sequence<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, node) in self.0.iter().enumerate() {
            if index != 0 {
                write!(f, " ")?;
            }

            write!(f, "{node}")?;
        }

        Ok(())
    }
}

/// Formats a node sequence back into math notation, separated by spaces.
#[must_use]
pub fn display(nodes: &[Node]) -> impl Display + '_ { Sequence(nodes) }

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{}", literal.text),
            Self::Variable(variable) => write!(f, "{}", variable.name),
            Self::Atom(atom) => write!(f, "{}", atom.symbol),
            Self::Power(power) => match &power.superscript {
                Superscript::Exponent(exponent) => {
                    write!(f, "{}^{{{exponent}}}", power.base)
                }
                Superscript::Angle => write!(f, "{}^\\circ", power.base),
                Superscript::Prime => write!(f, "{}'", power.base),
            },
            Self::Fraction(fraction) => write!(
                f,
                "\\frac{{{}}}{{{}}}",
                Sequence(&fraction.numerator),
                Sequence(&fraction.denominator)
            ),
            Self::Root(root) => write!(f, "\\sqrt{{{}}}", Sequence(&root.body)),
            Self::Group(group) => write!(f, "{{{}}}", Sequence(&group.body)),
            Self::NamedOperator(operator) => {
                write!(f, "{}", operator.name)?;

                if let Some(subscript) = &operator.subscript {
                    write!(f, "_{{{}}}", Sequence(subscript))?;
                }

                if let Some(superscript) = &operator.superscript {
                    write!(f, "^{{{}}}", Sequence(superscript))?;
                }

                Ok(())
            }
        }
    }
}
