//! Contains the definition of [`Session`], the registry of the equations
//! compiled so far.

use std::{collections::HashMap, sync::Arc};

use getset::Getters;
use log::debug;
use mathc_arena::{Arena, ID};
use mathc_handler::Handler;
use mathc_syntax::Node;

use crate::{
    compile::Compiler,
    diagnostic::{Diagnostic, Error},
    equation::Equation,
    Config,
};

/// A sequence of equations compiled in order. Each equation may refer to the
/// names bound by the equations before it.
///
/// Equations are never removed once compiled.
#[derive(Debug, Clone, Default, Getters)]
pub struct Session {
    /// The tunables applied to every equation of the session.
    #[get = "pub"]
    config: Config,

    equations: Arena<Arc<Equation>>,
    names: HashMap<String, ID<Arc<Equation>>>,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config, equations: Arena::default(), names: HashMap::new() }
    }

    /// Looks up the equation that first bound `name`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Arc<Equation>> {
        self.names.get(name).and_then(|id| self.equations.get(*id))
    }

    /// Returns the compiled equations in compilation order.
    pub fn equations(&self) -> impl ExactSizeIterator<Item = &Arc<Equation>> {
        self.equations.items()
    }

    /// Compiles one equation and registers the name it binds.
    ///
    /// When several equations bind the same name, the first one wins.
    ///
    /// # Errors
    ///
    /// See [`Error`]. A failed equation is not registered.
    pub fn compile(
        &mut self,
        nodes: &[Node],
        handler: &dyn Handler<Box<dyn Diagnostic>>,
    ) -> Result<Arc<Equation>, Error> {
        let equation =
            Arc::new(Compiler::new(self, handler).compile_equation(nodes)?);

        debug!(
            "compiled `{}` ({}) with arguments {:?} into {} branch(es)",
            equation.name().unwrap_or("<anonymous>"),
            equation.kind().map_or_else(
                || "expression".to_string(),
                |kind| kind.to_string()
            ),
            equation.arguments(),
            equation.branch_count()
        );

        let id = self.equations.insert(equation.clone());

        if let Some(name) = equation.name() {
            self.names.entry(name.to_string()).or_insert(id);
        }

        Ok(equation)
    }

    /// Compiles the equations in order.
    ///
    /// # Errors
    ///
    /// Stops at the first equation that fails to compile.
    pub fn compile_sequence(
        &mut self,
        equations: &[Vec<Node>],
        handler: &dyn Handler<Box<dyn Diagnostic>>,
    ) -> Result<Vec<Arc<Equation>>, Error> {
        equations.iter().map(|nodes| self.compile(nodes, handler)).collect()
    }
}

/// Compiles a single equation in a fresh session.
///
/// # Errors
///
/// See [`Error`].
pub fn compile(
    nodes: &[Node],
    config: Config,
    handler: &dyn Handler<Box<dyn Diagnostic>>,
) -> Result<Arc<Equation>, Error> {
    Session::new(config).compile(nodes, handler)
}

#[cfg(test)]
mod test;
