//! `mdpost excerpt` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdpost_config::{CliSettings, Config};
use mdpost_renderer::extract_text;

use super::{read_input, write_stdout};
use crate::error::CliError;

/// Arguments for the excerpt command.
#[derive(Args)]
pub(crate) struct ExcerptArgs {
    /// Markdown file to summarize (default: stdin).
    file: Option<PathBuf>,

    /// Maximum excerpt length in characters (overrides config).
    #[arg(short = 'n', long)]
    max_length: Option<usize>,

    /// Path to configuration file (default: auto-discover mdpost.toml).
    #[arg(short, long, env = "MDPOST_CONFIG")]
    config: Option<PathBuf>,
}

impl ExcerptArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            max_length: self.max_length,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let markdown = read_input(self.file.as_deref())?;
        write_stdout(&extract_text(&markdown, config.excerpt.max_length))?;
        Ok(())
    }
}
