//! probar-layout: layout assertions from the command line
//!
//! ## Usage
//!
//! ```bash
//! probar-layout check landing.yaml              # Run every validation
//! probar-layout check landing.yaml -f json      # Reports as JSON
//! probar-layout explain landing.yaml            # Show resolved page and boxes
//! ```

use clap::Parser;
use probar_layout_cli::{
    init_tracing, CheckArgs, CheckOutput, Cli, CliConfig, CliError, CliResult, ColorChoice,
    Commands, ExplainArgs, Printer, ReportFormat, Scenario, ScenarioRunner, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    init_tracing(&config);

    match cli.command {
        Commands::Check(args) => run_check(&config, &args),
        Commands::Explain(args) => run_explain(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_log_format(cli.log_format.into())
}

fn run_check(config: &CliConfig, args: &CheckArgs) -> CliResult<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let reports = ScenarioRunner::new(&scenario).run()?;
    let output = CheckOutput::new(&scenario, reports);

    let printer = Printer::new(config);
    match args.format {
        ReportFormat::Text => printer.reports(&output)?,
        ReportFormat::Json => printer.json(&output)?,
    }

    if output.passed {
        Ok(())
    } else {
        Err(CliError::ValidationFailed {
            failed: output.summary.failed,
        })
    }
}

fn run_explain(config: &CliConfig, args: &ExplainArgs) -> CliResult<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let runner = ScenarioRunner::new(&scenario);
    Printer::new(config).explain(&scenario, runner.page())
}
