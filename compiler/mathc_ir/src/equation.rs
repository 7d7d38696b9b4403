//! Contains the definition of [`Equation`], a frozen compilation result.

use std::sync::Arc;

use getset::Getters;
use serde::{Deserialize, Serialize};

use crate::expression::{lookup, Expression, Scope};

/// What the left side of an equation binds.
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
pub enum Kind {
    #[display(fmt = "function")]
    Function,

    #[display(fmt = "variable")]
    Variable,
}

/// The name bound by the left side of an equation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Binding {
    /// The bound name.
    #[get = "pub"]
    name: String,

    /// Whether a function or a variable is bound.
    #[get = "pub"]
    kind: Kind,

    /// The declared parameters of a function, empty for a variable.
    #[get = "pub"]
    parameters: Vec<String>,
}

impl Binding {
    /// Creates a variable binding.
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: Kind::Variable, parameters: Vec::new() }
    }

    /// Creates a function binding with the given parameters.
    #[must_use]
    pub fn function(name: impl Into<String>, parameters: Vec<String>) -> Self {
        Self { name: name.into(), kind: Kind::Function, parameters }
    }
}

/// An error raised when calling a compiled equation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    /// The number of arguments differs from the number of declared arguments.
    #[error("expected {expected} argument(s) but {found} were given")]
    ArgumentCount {
        /// The number of declared arguments.
        expected: usize,

        /// The number of given arguments.
        found: usize,
    },

    /// A variable has no value.
    #[error("`{0}` has no value")]
    UnboundVariable(String),

    /// An external declaration index is out of range.
    #[error("no external declaration at index {0}")]
    MissingExternal(usize),

    /// A branch index of an external equation is out of range.
    #[error("the external equation has no branch {0}")]
    MissingBranch(usize),

    /// A summation range has more terms than can be evaluated.
    #[error("the summation over `{0}` has too many terms")]
    SumTooLong(String),
}

/// Collapses every NaN into one value and `-0.0` into `0.0` so that a result
/// set never holds two values printing the same.
fn canonical(value: f64) -> f64 {
    if value.is_nan() {
        f64::NAN
    } else {
        // `-0.0 + 0.0` is `0.0`
        value + 0.0
    }
}

/// A compiled, immutable equation.
///
/// Calling it evaluates every branch with the arguments bound in declaration
/// order.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Equation {
    /// The name bound by the left side, if the equation has one.
    #[get = "pub"]
    binding: Option<Binding>,

    /// The arguments in declaration order. The parameters of a function come
    /// first.
    #[get = "pub"]
    arguments: Vec<String>,

    /// The names bound inside the expression.
    #[get = "pub"]
    ignored: Vec<String>,

    /// One expression per branch.
    #[get = "pub"]
    executions: Vec<Expression>,

    /// The earlier equations the executions refer to by index.
    #[get = "pub"]
    externals: Vec<Arc<Equation>>,
}

impl Equation {
    pub(crate) fn new(
        binding: Option<Binding>,
        arguments: Vec<String>,
        ignored: Vec<String>,
        executions: Vec<Expression>,
        externals: Vec<Arc<Self>>,
    ) -> Self {
        Self { binding, arguments, ignored, executions, externals }
    }

    /// Returns the bound name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.binding.as_ref().map(|binding| binding.name.as_str())
    }

    /// Returns the kind of the bound name.
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        self.binding.as_ref().map(|binding| binding.kind)
    }

    /// Returns the declared parameters, empty unless a function is bound.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        self.binding
            .as_ref()
            .map_or(&[][..], |binding| binding.parameters.as_slice())
    }

    /// Returns the number of branches.
    #[must_use]
    pub fn branch_count(&self) -> usize { self.executions.len() }

    /// Evaluates every branch and returns the distinct results in ascending
    /// order.
    ///
    /// # Errors
    ///
    /// See [`Self::call_raw`].
    pub fn call(&self, arguments: &[f64]) -> Result<Vec<f64>, CallError> {
        let mut results = self
            .call_raw(arguments)?
            .into_iter()
            .map(canonical)
            .collect::<Vec<_>>();

        results.sort_by(f64::total_cmp);
        results.dedup_by(|a, b| a.total_cmp(b).is_eq());

        Ok(results)
    }

    /// Evaluates every branch and returns the results in branch order,
    /// duplicates included.
    ///
    /// # Errors
    ///
    /// If the number of arguments differs from [`Self::arguments`] or a
    /// branch refers to a value it can't find.
    pub fn call_raw(&self, arguments: &[f64]) -> Result<Vec<f64>, CallError> {
        if arguments.len() != self.arguments.len() {
            return Err(CallError::ArgumentCount {
                expected: self.arguments.len(),
                found: arguments.len(),
            });
        }

        self.executions
            .iter()
            .map(|execution| {
                let mut scope = self
                    .arguments
                    .iter()
                    .map(String::as_str)
                    .zip(arguments.iter().copied())
                    .collect::<Scope>();

                execution.evaluate(&self.externals, &mut scope)
            })
            .collect()
    }

    /// Evaluates one branch as an external of another equation.
    ///
    /// The parameters take `parameters`; the remaining arguments take their
    /// values from the caller's `outer` scope.
    pub(crate) fn evaluate_nested(
        &self,
        branch: usize,
        parameters: &[f64],
        outer: &[(&str, f64)],
    ) -> Result<f64, CallError> {
        let declared = self.parameters();

        if declared.len() != parameters.len() {
            return Err(CallError::ArgumentCount {
                expected: declared.len(),
                found: parameters.len(),
            });
        }

        let execution =
            self.executions.get(branch).ok_or(CallError::MissingBranch(branch))?;

        let mut scope = declared
            .iter()
            .map(String::as_str)
            .zip(parameters.iter().copied())
            .collect::<Scope>();

        for name in self.arguments.iter().skip(declared.len()) {
            scope.push((name.as_str(), lookup(outer, name)?));
        }

        execution.evaluate(&self.externals, &mut scope)
    }
}
