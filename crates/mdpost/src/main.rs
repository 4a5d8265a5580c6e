//! mdpost CLI - Markdown posts to HTML fragments.
//!
//! Provides commands for:
//! - `render`: Convert one Markdown file (or stdin) to HTML
//! - `excerpt`: Print a plain-text excerpt of a post
//! - `slug`: Print a URL slug or a post/category URL
//! - `build`: Convert every post under the source directory

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ExcerptArgs, RenderArgs, SlugArgs};
use output::Output;

/// mdpost - Markdown posts to HTML.
#[derive(Parser)]
#[command(name = "mdpost", version, about)]
struct Cli {
    /// Enable verbose output (per-file logs and build timing).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Markdown file to an HTML fragment.
    Render(RenderArgs),
    /// Print the plain-text excerpt of a post.
    Excerpt(ExcerptArgs),
    /// Print a URL slug, or a post or category URL.
    Slug(SlugArgs),
    /// Convert every post in the source directory.
    Build(BuildArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Excerpt(args) => args.execute(),
        Commands::Slug(args) => args.execute(),
        Commands::Build(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `--verbose` enables DEBUG level (per-post logs), otherwise use `RUST_LOG`.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_verbose_shows_per_post_logs() {
        assert_eq!(log_filter(true).max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
