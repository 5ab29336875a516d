//! Probar Layout CLI Library
//!
//! Runs layout scenarios (recorded element geometry plus the checks to
//! apply) through the `probar-layout` validator and reports the result.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
mod logging;
mod output;
mod runner;
pub mod scenario;

pub use commands::{CheckArgs, Cli, ColorArg, Commands, ExplainArgs, LogFormatArg, ReportFormat};
pub use config::{CliConfig, ColorChoice, LogFormat, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::init_tracing;
pub use output::{CheckOutput, Printer};
pub use runner::ScenarioRunner;
pub use scenario::Scenario;
