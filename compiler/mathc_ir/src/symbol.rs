//! Contains the definition of [`SymbolTable`].

use std::collections::HashSet;

use getset::Getters;

/// Tracks the names met while compiling one equation.
///
/// # Invariants
///
/// A name is either an argument, an ignored variable or unbound, never both an
/// argument and ignored. Once ignored, a name is never promoted to an argument.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct SymbolTable {
    /// The arguments of the compiled function, in first-seen order.
    #[get = "pub"]
    arguments: Vec<String>,

    /// The names bound inside the expression (summation indices, integration
    /// variables), in first-seen order.
    #[get = "pub"]
    ignored: Vec<String>,

    ignored_set: HashSet<String>,
}

impl SymbolTable {
    /// Registers `name` as an argument.
    ///
    /// Returns `false` if the name already is an argument or is ignored.
    pub fn add_argument(&mut self, name: &str) -> bool {
        if self.is_argument(name) || self.is_ignored(name) {
            return false;
        }

        self.arguments.push(name.to_string());
        true
    }

    /// Excludes `name` from the arguments.
    ///
    /// Returns `false` if the name already is ignored, or already is an
    /// argument (in which case the inner binding merely shadows it while the
    /// expression is evaluated).
    pub fn add_ignored(&mut self, name: &str) -> bool {
        if self.is_argument(name) || !self.ignored_set.insert(name.to_string())
        {
            return false;
        }

        self.ignored.push(name.to_string());
        true
    }

    /// Checks whether `name` is an argument.
    #[must_use]
    pub fn is_argument(&self, name: &str) -> bool {
        self.arguments.iter().any(|argument| argument == name)
    }

    /// Checks whether `name` is ignored.
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored_set.contains(name)
    }

    /// Checks whether `name` is bound locally, as an argument or ignored.
    #[must_use]
    pub fn is_local(&self, name: &str) -> bool {
        self.is_argument(name) || self.is_ignored(name)
    }

    /// Consumes the table and returns the arguments and the ignored names.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.arguments, self.ignored)
    }
}

#[cfg(test)]
mod test;
