//! Command-line interface for `rbl`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub mod commands;
pub mod output;

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(
    name = "rbl",
    version,
    about = "Simulate ranking bandits against click models",
    long_about = "Run exploration policies (epsilon-greedy, UCB1, Thompson sampling, softmax) \
                  against cascade, position-based and dependent-click user models, \
                  and compare their click-through and regret."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Emit JSON on stdout instead of human output
    #[arg(long, global = true)]
    pub robot: bool,

    /// Output format (overrides the config file)
    #[arg(long, value_enum, global = true)]
    pub output_format: Option<OutputFormat>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: global then ./rank-bandit-lab.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// `--robot` wins over `--output-format`.
    #[must_use]
    pub fn output_format(&self) -> Option<OutputFormat> {
        if self.robot {
            Some(OutputFormat::Json)
        } else {
            self.output_format
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` config value.
    #[must_use]
    pub fn from_config(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Human
        }
    }
}
