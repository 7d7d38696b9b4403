//! Compiles expression trees produced by the math-notation parser into
//! numeric functions.
//!
//! An equation is compiled by walking its node sequence left to right and
//! emitting [`fragment::Fragment`]s into every live branch of a
//! [`branch::BranchSet`]. Multi-valued operators such as `±` multiply the
//! branches. Once the walk finishes, every branch is parsed into an
//! [`expression::Expression`] and the frozen [`equation::Equation`] can be
//! called with numeric arguments.
//!
//! Equations compiled through the same [`session::Session`] may refer to the
//! names bound by earlier ones.

use serde::{Deserialize, Serialize};

pub mod branch;
pub mod compile;
pub mod diagnostic;
pub mod equation;
pub mod expression;
pub mod extract;
pub mod fragment;
pub mod operator;
pub mod session;
pub mod symbol;

pub use diagnostic::Error;
pub use equation::{Binding, CallError, Equation, Kind};
pub use session::{compile, Session};

/// Where the integrand is sampled inside each partition of an integral.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum IntegralRule {
    /// Sample at the left edge of each partition.
    #[default]
    #[display(fmt = "left edge")]
    LeftEdge,

    /// Sample at the middle of each partition.
    #[display(fmt = "midpoint")]
    Midpoint,
}

impl IntegralRule {
    /// The position of the sample inside a partition, as a fraction of the
    /// partition width.
    #[must_use]
    pub const fn offset(self) -> f64 {
        match self {
            Self::LeftEdge => 0.0,
            Self::Midpoint => 0.5,
        }
    }
}

/// The tunables of the numeric approximations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The number of partitions an integral range is divided into.
    pub integral_partitions: usize,

    /// Where each partition of an integral is sampled.
    pub integral_rule: IntegralRule,

    /// The step used by the forward difference of a derivative.
    pub derivative_step: f64,

    /// The integration variable used when an integral has no `d<var>` suffix.
    pub differential_variable: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            integral_partitions: 100,
            integral_rule: IntegralRule::LeftEdge,
            derivative_step: 1e-10,
            differential_variable: "x".to_string(),
        }
    }
}
