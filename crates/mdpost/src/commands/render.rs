//! `mdpost render` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdpost_config::{CliSettings, Config};

use super::{read_input, write_stdout};
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to convert (default: stdin).
    file: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdpost.toml).
    #[arg(short, long, env = "MDPOST_CONFIG")]
    config: Option<PathBuf>,

    /// Disable GFM extensions (tables, strikethrough, task lists).
    #[arg(long)]
    no_gfm: bool,

    /// Escape raw HTML instead of passing it through.
    #[arg(long)]
    escape_html: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            gfm: self.no_gfm.then_some(false),
            raw_html: self.escape_html.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let markdown = read_input(self.file.as_deref())?;
        let html = config.render.to_converter().convert(&markdown);

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                tracing::info!(path = %path.display(), bytes = html.len(), "Wrote HTML");
            }
            None => write_stdout(&html)?,
        }
        Ok(())
    }
}
