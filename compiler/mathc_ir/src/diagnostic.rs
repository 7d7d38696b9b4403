//! Contains the diagnostics reported while compiling an equation.

use std::{any::Any, fmt::Debug};

use enum_as_inner::EnumAsInner;
use mathc_diagnostic::{Diagnostic as DiagnosticReport, Report, Severity};

/// Implemented by all diagnostic objects.
pub trait Diagnostic: Report<()> + Debug + Any + Send + Sync + 'static {
    #[allow(missing_docs)]
    fn as_any(&self) -> &dyn Any;
}

impl<U: Report<()> + Debug + Any + Send + Sync + 'static> Diagnostic for U {
    fn as_any(&self) -> &dyn Any { self }
}

impl<U: Report<()> + Debug + Any + Send + Sync + 'static> From<U>
    for Box<dyn Diagnostic>
{
    fn from(value: U) -> Self { Box::new(value) }
}

/// An operator atom has no entry in the operator table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("operator not found: {symbol}")]
pub struct UnsupportedOperator {
    /// The symbol of the atom.
    pub symbol: String,
}

impl Report<()> for UnsupportedOperator {
    fn report(&self, (): ()) -> DiagnosticReport {
        DiagnosticReport {
            subject: Some(self.symbol.clone()),
            message: format!("operator not found: {}", self.symbol),
            severity: Severity::Error,
            help_message: Some(
                "supported operators are `+ - * \\times / \\div \\pm ( ) ,`"
                    .to_string(),
            ),
        }
    }
}

/// A node lacks a required child or has one of an unexpected kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("malformed expression `{subject}`: {reason}")]
pub struct MalformedExpression {
    /// The notation of the offending node (or node run).
    pub subject: String,

    /// What is wrong with it.
    pub reason: String,
}

impl MalformedExpression {
    /// Creates a [`MalformedExpression`] for the given subject.
    pub fn new(subject: impl ToString, reason: impl Into<String>) -> Self {
        Self { subject: subject.to_string(), reason: reason.into() }
    }
}

impl Report<()> for MalformedExpression {
    fn report(&self, (): ()) -> DiagnosticReport {
        DiagnosticReport {
            subject: Some(self.subject.clone()),
            message: format!("malformed expression: {}", self.reason),
            severity: Severity::Error,
            help_message: None,
        }
    }
}

/// A derivative marker names something no earlier equation bound as a
/// function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("`{name}` is not bound to a function by any earlier equation")]
pub struct UnresolvedReference {
    /// The referenced name.
    pub name: String,
}

impl Report<()> for UnresolvedReference {
    fn report(&self, (): ()) -> DiagnosticReport {
        DiagnosticReport {
            subject: Some(format!("{}'", self.name)),
            message: format!(
                "`{}` is not bound to a function by any earlier equation",
                self.name
            ),
            severity: Severity::Error,
            help_message: Some(format!(
                "define it first, e.g. `{}(x) = ...`",
                self.name
            )),
        }
    }
}

/// The numeric method behind an approximated value.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
#[allow(missing_docs)]
pub enum Approximation {
    #[display(fmt = "a Riemann sum over {} partitions", partitions)]
    Integral { partitions: usize },

    #[display(fmt = "a forward difference with step {:e}", step)]
    Derivative { step: f64 },
}

/// Advisory: the operator's value is an approximation, compare results
/// against a tolerance rather than exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct DivisionApproximation {
    /// The notation of the approximated operator.
    pub subject: String,

    /// How it is approximated.
    pub approximation: Approximation,
}

impl Report<()> for DivisionApproximation {
    fn report(&self, (): ()) -> DiagnosticReport {
        DiagnosticReport {
            subject: Some(self.subject.clone()),
            message: format!("approximated by {}", self.approximation),
            severity: Severity::Warning,
            help_message: Some(
                "compare the results against a tolerance".to_string(),
            ),
        }
    }
}

/// A fatal error aborting the compilation of an equation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error, EnumAsInner)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    UnsupportedOperator(#[from] UnsupportedOperator),

    #[error(transparent)]
    MalformedExpression(#[from] MalformedExpression),

    #[error(transparent)]
    UnresolvedReference(#[from] UnresolvedReference),
}

impl Report<()> for Error {
    fn report(&self, (): ()) -> DiagnosticReport {
        match self {
            Self::UnsupportedOperator(error) => error.report(()),
            Self::MalformedExpression(error) => error.report(()),
            Self::UnresolvedReference(error) => error.report(()),
        }
    }
}
