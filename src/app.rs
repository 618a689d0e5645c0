use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;

/// Everything a command needs besides its own arguments.
pub struct AppContext {
    pub project_root: PathBuf,
    pub config: Config,
    pub robot_mode: bool,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let project_root = std::env::current_dir()?;
        let config = Config::load(cli.config.as_deref(), &project_root)?;
        Ok(Self::new(project_root, config, cli.output_format(), cli.verbose))
    }

    #[must_use]
    pub fn new(
        project_root: PathBuf,
        config: Config,
        format: Option<OutputFormat>,
        verbosity: u8,
    ) -> Self {
        let output_format =
            format.unwrap_or_else(|| OutputFormat::from_config(&config.output.format));
        Self {
            project_root,
            config,
            robot_mode: output_format == OutputFormat::Json,
            output_format,
            verbosity,
        }
    }
}
