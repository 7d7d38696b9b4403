//! Contains the main `run()` function for the compiler.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use mathc_diagnostic::{Message, Report, Severity};
use mathc_handler::Handler;
use mathc_ir::{diagnostic::Diagnostic, Config, Equation, IntegralRule, Session};
use mathc_syntax::Node;

/// The serialization format of the input file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum,
)]
pub enum Format {
    /// Rusty Object Notation.
    #[clap(name = "ron")]
    Ron,

    /// JSON.
    #[clap(name = "json")]
    Json,
}

impl Format {
    /// Infers the format from the extension of `path`: `.json` is JSON,
    /// anything else RON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|x| x.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("json") => {
                Self::Json
            }
            _ => Self::Ron,
        }
    }
}

/// Where the integrand of an integral is sampled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum,
)]
pub enum Rule {
    /// The left edge of every partition.
    #[clap(name = "left")]
    LeftEdge,

    /// The middle of every partition.
    #[clap(name = "midpoint")]
    Midpoint,
}

impl From<Rule> for IntegralRule {
    fn from(value: Rule) -> Self {
        match value {
            Rule::LeftEdge => Self::LeftEdge,
            Rule::Midpoint => Self::Midpoint,
        }
    }
}

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, clap::Parser)]
#[clap(
    name = "mathc",
    about = "Compiles math-notation expression trees into numeric functions",
    author = "Simmypeet"
)]
pub struct Arguments {
    /// The file holding the list of equations, each a list of nodes.
    pub file: PathBuf,

    /// The values of the arguments of the last equation, in declaration
    /// order.
    #[clap(short, long, num_args = 1.., allow_negative_numbers = true)]
    pub arguments: Vec<f64>,

    /// The format of the file. If not specified, it is inferred from the file
    /// extension.
    #[clap(short, long)]
    pub format: Option<Format>,

    /// A RON file holding the configuration. The flags below override it.
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// The number of partitions an integral is divided into.
    #[clap(long)]
    pub partitions: Option<usize>,

    /// Where the integrand of an integral is sampled.
    #[clap(long)]
    pub rule: Option<Rule>,

    /// The step of the forward difference approximating a derivative.
    #[clap(long)]
    pub step: Option<f64>,

    /// The integration variable of integrals without a `d<var>` suffix.
    #[clap(long)]
    pub differential: Option<String>,
}

/// An error raised while reading the input of the compiler.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum LoadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Deserializes a list of equations.
///
/// # Errors
///
/// If `source` is not a valid list of node lists in the given format.
pub fn load(source: &str, format: Format) -> Result<Vec<Vec<Node>>, LoadError> {
    Ok(match format {
        Format::Ron => ron::from_str(source)?,
        Format::Json => serde_json::from_str(source)?,
    })
}

/// Builds the configuration from the optional configuration file and the
/// flags overriding it.
///
/// # Errors
///
/// If the configuration file can't be read or deserialized.
pub fn configure(arguments: &Arguments) -> Result<Config, LoadError> {
    let mut config = match &arguments.config {
        Some(path) => ron::from_str(&std::fs::read_to_string(path)?)?,
        None => Config::default(),
    };

    if let Some(partitions) = arguments.partitions {
        config.integral_partitions = partitions;
    }

    if let Some(rule) = arguments.rule {
        config.integral_rule = rule.into();
    }

    if let Some(step) = arguments.step {
        config.derivative_step = step;
    }

    if let Some(differential) = &arguments.differential {
        config.differential_variable.clone_from(differential);
    }

    Ok(config)
}

/// A struct that implements [`Handler`] but prints all the message to the
/// standard error stream.
#[derive(Debug, Clone, Copy, Default)]
struct Printer;

impl Printer {
    fn print(self, diagnostic: &mathc_diagnostic::Diagnostic) {
        eprintln!("{diagnostic}\n");
    }
}

impl Handler<Box<dyn Diagnostic>> for Printer {
    fn receive(&self, diagnostic: Box<dyn Diagnostic>) {
        self.print(&diagnostic.report(()));
    }
}

/// Formats the binding and the arguments of an equation, e.g.
/// `f(x) [function]: x, k`.
#[must_use]
pub fn describe(equation: &Equation) -> String {
    let head = match equation.binding() {
        Some(binding) if binding.parameters().is_empty() => {
            format!("{} [{}]", binding.name(), binding.kind())
        }
        Some(binding) => format!(
            "{}({}) [{}]",
            binding.name(),
            binding.parameters().join(", "),
            binding.kind()
        ),
        None => "_ [expression]".to_string(),
    };

    format!("{head}: {}", equation.arguments().join(", "))
}

fn fail(message: impl std::fmt::Display) -> ExitCode {
    eprintln!("{}", Message::new(Severity::Error, message));
    ExitCode::FAILURE
}

/// Runs the program with the given arguments.
///
/// Every equation of the file is compiled into one session. The last one is
/// evaluated when arguments are given or when it takes none.
#[must_use]
pub fn run(arguments: &Arguments) -> ExitCode {
    let config = match configure(arguments) {
        Ok(config) => config,
        Err(error) => return fail(format!("invalid configuration: {error}")),
    };

    let source = match std::fs::read_to_string(&arguments.file) {
        Ok(source) => source,
        Err(error) => {
            return fail(format!("{}: {error}", arguments.file.display()))
        }
    };

    let format =
        arguments.format.unwrap_or_else(|| Format::from_path(&arguments.file));

    let equations = match load(&source, format) {
        Ok(equations) => equations,
        Err(error) => {
            return fail(format!("{}: {error}", arguments.file.display()))
        }
    };

    log::info!("compiling {} equation(s)", equations.len());

    let printer = Printer;
    let mut session = Session::new(config);
    let mut last = None;

    for nodes in &equations {
        match session.compile(nodes, &printer) {
            Ok(equation) => {
                println!("{}", describe(&equation));
                last = Some(equation);
            }
            Err(error) => {
                printer.print(&error.report(()));
                return ExitCode::FAILURE;
            }
        }
    }

    let Some(last) = last else {
        return ExitCode::SUCCESS;
    };

    if arguments.arguments.is_empty() && !last.arguments().is_empty() {
        return ExitCode::SUCCESS;
    }

    match last.call(&arguments.arguments) {
        Ok(results) => {
            println!("{results:?}");
            ExitCode::SUCCESS
        }
        Err(error) => fail(error),
    }
}
