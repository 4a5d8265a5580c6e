//! `mdpost slug` command implementation.

use clap::Args;
use mdpost_renderer::{category_url, post_url, slugify};

use super::write_stdout;
use crate::error::CliError;

/// Arguments for the slug command.
#[derive(Args)]
pub(crate) struct SlugArgs {
    /// Title or category name.
    text: String,

    /// Post or category id; prints a full URL path instead of the bare slug.
    #[arg(long)]
    id: Option<String>,

    /// Build a category URL instead of a post URL.
    #[arg(long, requires = "id")]
    category: bool,
}

impl SlugArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        write_stdout(&self.resolve())?;
        Ok(())
    }

    fn resolve(&self) -> String {
        match (&self.id, self.category) {
            (Some(id), true) => category_url(id, &self.text),
            (Some(id), false) => post_url(id, &self.text),
            (None, _) => slugify(&self.text),
        }
    }
}
