//! `kgs-specimen`: print the specimen hierarchy of a knowledge graph query result.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use kgs_cli::logging::{LogConfig, init_logging};

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_hierarchy, run_kinds};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Command) -> Result<()> {
    match command {
        Command::Hierarchy(args) => {
            let result = run_hierarchy(args)?;
            for issue in result.iter().flat_map(|r| &r.issues) {
                eprintln!("warning: {issue}");
            }
            Ok(())
        }
        Command::Kinds(args) => run_kinds(args),
    }
}

/// `--log-level` wins over `-v`/`-q`; giving either disables the `RUST_LOG` override.
fn log_config(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.is_some() || cli.verbosity.is_present();
    let level = cli
        .log_level
        .map_or_else(|| cli.verbosity.tracing_level_filter(), Into::into);
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        use_env_filter: !explicit,
        with_ansi,
        ..LogConfig::default()
    }
    .with_level(level)
    .with_format(cli.log_format.into())
    .with_log_file(cli.log_file.clone())
}
