//! Cohort rollcall manager CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use rollcall_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use rollcall_cli::commands::{
    run_cds, run_clean, run_fill, run_log, run_mark, run_new_cohort, run_rollback, run_status,
};
use rollcall_cli::logging::{LogConfig, LogFormat, init_logging};
use rollcall_store::CohortPaths;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let paths = CohortPaths::new(&cli.cohort_dir);
    let result = match &cli.command {
        Command::Clean(args) => run_clean(&paths, args),
        Command::Status => run_status(&paths),
        Command::Mark(args) => run_mark(&paths, args),
        Command::Fill(args) => run_fill(&paths, args),
        Command::Cds(args) => run_cds(&paths, args),
        Command::Log => run_log(&paths),
        Command::Rollback(args) => run_rollback(&paths, args),
        Command::NewCohort => run_new_cohort(&paths),
    };
    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
