//! The rendered form of compiler errors and warnings, printed to the
//! terminal with colored headers.

use std::fmt::Display;

use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Turns an error or warning condition into a printable [`Diagnostic`].
pub trait Report<Param> {
    /// Renders the condition.
    fn report(&self, parameter: Param) -> Diagnostic;
}

/// How serious a [`Diagnostic`] is.
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
)]
pub enum Severity {
    /// An error that prevents the expression from compiling.
    Error,

    /// A warning that does not prevent the expression from compiling.
    Warning,

    /// An informational message.
    Info,
}

/// A message prefixed with its colored severity header, e.g.
/// `[error]: operator not found`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_new::new)]
pub struct Message<T> {
    /// The severity shown in the header.
    pub severity: Severity,

    /// The message body.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = match self.severity {
            Severity::Error => "[error]:".bright_red().bold(),
            Severity::Warning => "[warning]:".yellow().bold(),
            Severity::Info => "[info]:".bright_green().bold(),
        };

        write!(f, "{header} {}", self.display.to_string().bold())
    }
}

/// A condition found while compiling, ready to be shown.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Diagnostic {
    /// The notation of the node or symbol the diagnostic points at, if any.
    pub subject: Option<String>,

    /// The headline.
    pub message: String,

    /// Decides the color and the label of the header.
    pub severity: Severity,

    /// A hint printed under the headline.
    pub help_message: Option<String>,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Message::new(self.severity, &self.message))?;

        if let Some(subject) = &self.subject {
            write!(f, "\n {} {subject}", "-->".bright_cyan().bold())?;
        }

        if let Some(help_message) = &self.help_message {
            write!(f, "\n  {} {help_message}", "= help:".bold())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test;
