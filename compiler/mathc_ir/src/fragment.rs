//! Contains the definition of [`Fragment`], the unit of code appended to the
//! branches while walking the expression tree.
//!
//! A branch is a flat infix token stream, exactly as the walker met the
//! nodes. Calls, summations, integrals and external references open a
//! sub-stream that runs until the matching [`Fragment::Close`].

use serde::{Deserialize, Serialize};

use crate::IntegralRule;

/// An arithmetic operator between two operands (or before one, as a sign).
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
    derive_more::Display,
)]
#[allow(missing_docs)]
pub enum Operator {
    #[display(fmt = "+")]
    Add,

    #[display(fmt = "-")]
    Subtract,

    #[display(fmt = "*")]
    Multiply,

    #[display(fmt = "/")]
    Divide,
}

impl Operator {
    /// Applies the operator.
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
        }
    }

    /// Checks whether the operator binds as tightly as `*`.
    #[must_use]
    pub const fn is_multiplicative(self) -> bool {
        matches!(self, Self::Multiply | Self::Divide)
    }
}

/// The built-in numeric functions.
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
    derive_more::Display,
)]
#[allow(missing_docs)]
pub enum Function {
    #[display(fmt = "pow")]
    Power,

    #[display(fmt = "sqrt")]
    SquareRoot,

    #[display(fmt = "abs")]
    Absolute,

    #[display(fmt = "sin")]
    Sine,

    #[display(fmt = "cos")]
    Cosine,

    #[display(fmt = "tan")]
    Tangent,
}

impl Function {
    /// The number of arguments the function takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Power => 2,
            Self::SquareRoot
            | Self::Absolute
            | Self::Sine
            | Self::Cosine
            | Self::Tangent => 1,
        }
    }

    /// Applies the function. The trigonometric functions take degrees.
    #[must_use]
    pub fn apply(self, arguments: &[f64]) -> f64 {
        match (self, arguments) {
            (Self::Power, [base, exponent]) => base.powf(*exponent),
            (Self::SquareRoot, [value]) => value.sqrt(),
            (Self::Absolute, [value]) => value.abs(),
            (Self::Sine, [value]) => value.to_radians().sin(),
            (Self::Cosine, [value]) => value.to_radians().cos(),
            (Self::Tangent, [value]) => value.to_radians().tan(),
            _ => f64::NAN,
        }
    }
}

/// A limit of a summation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::Display)]
#[allow(missing_docs)]
pub enum Bound {
    Number(f64),
    Variable(String),
}

/// A unit of code appended to a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fragment {
    /// The text of a numeric literal. Consecutive literals are concatenated.
    Number(String),

    /// A named value: an argument or a loop variable.
    Variable(String),

    /// An arithmetic operator.
    Operator(Operator),

    /// `(`
    Open,

    /// `)`, also closes every fragment that opens a sub-stream.
    Close,

    /// Separates the arguments of a call.
    Separator,

    /// Opens the argument list of a built-in function.
    Call(Function),

    /// Opens the body of a summation.
    Sum {
        /// The index variable.
        variable: String,

        /// The first index.
        lower: Bound,

        /// The last index (inclusive).
        upper: Bound,
    },

    /// Opens the integrand of a definite integral.
    Integral {
        /// The integration variable.
        variable: String,

        /// The lower limit.
        start: f64,

        /// The width of one partition.
        width: f64,

        /// The number of partitions.
        partitions: usize,

        /// Where each partition is sampled.
        rule: IntegralRule,
    },

    /// One branch of an earlier equation bound as a variable.
    Reference {
        /// The index into the equation's external declarations.
        external: usize,

        /// The branch of the referenced equation.
        branch: usize,
    },

    /// Opens the argument list of an application of an earlier function.
    Apply {
        /// The index into the equation's external declarations.
        external: usize,

        /// The branch of the referenced function.
        branch: usize,
    },

    /// Opens the argument list of the derivative of an earlier function.
    Derivative {
        /// The index into the equation's external declarations.
        external: usize,

        /// The branch of the referenced function.
        branch: usize,

        /// The forward difference step.
        step: f64,
    },
}

impl Fragment {
    /// Checks whether the fragment opens a sub-stream closed by
    /// [`Fragment::Close`].
    #[must_use]
    pub const fn opens(&self) -> bool {
        matches!(
            self,
            Self::Open
                | Self::Call(_)
                | Self::Sum { .. }
                | Self::Integral { .. }
                | Self::Apply { .. }
                | Self::Derivative { .. }
        )
    }
}
