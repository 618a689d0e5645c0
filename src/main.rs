//! rbl - rank bandit lab
//!
//! Simulate ranking bandit policies against click models from the command line.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use rank_bandit_lab::app::AppContext;
use rank_bandit_lab::cli::output::robot_error;
use rank_bandit_lab::cli::{Cli, OutputFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    // Flags decide until the config is loaded; afterwards the context does.
    let mut output_format = cli.output_format().unwrap_or(OutputFormat::Human);
    let result = AppContext::from_cli(&cli).and_then(|ctx| {
        output_format = ctx.output_format;
        rank_bandit_lab::cli::commands::run(&ctx, &cli.command)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if output_format == OutputFormat::Json {
                // Robot mode: JSON error output to stdout
                let response = robot_error(e.code(), e.to_string());
                println!("{}", serde_json::to_string(&response).unwrap_or_default());
            } else {
                eprintln!("Error: {e}");
            }
            if e.is_usage() || e.is_configuration() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,rank_bandit_lab=info",
        1 => "info,rank_bandit_lab=debug",
        2 => "debug,rank_bandit_lab=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        // JSON logging for robot mode
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
