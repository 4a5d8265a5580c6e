//! `mdpost build` command implementation.
//!
//! Converts every `*.md` file under the source directory to an `.html`
//! fragment at the same relative path under the output directory. Posts are
//! converted in parallel; a failing post is logged and counted without
//! stopping the others.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use mdpost_config::{BuildConfig, CliSettings, Config};
use mdpost_renderer::MarkdownConverter;
use rayon::prelude::*;

use crate::error::CliError;
use crate::output::Output;

/// Error returned while building posts.
#[derive(Debug, thiserror::Error)]
pub(crate) enum BuildError {
    #[error("Source directory not found: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover mdpost.toml).
    #[arg(short, long, env = "MDPOST_CONFIG")]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for HTML files (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let build = &config.build_resolved;

        output.info(&format!("Source: {}", build.source_dir.display()));
        output.info(&format!("Output: {}", build.output_dir.display()));

        let summary = build_posts(&config.render.to_converter(), build)?;

        if summary.failed > 0 {
            output.warning(&format!(
                "{} of {} posts failed to build",
                summary.failed,
                summary.total()
            ));
            return Err(CliError::Validation(format!(
                "build finished with {} failed posts",
                summary.failed
            )));
        }

        output.success(&format!(
            "Built {} posts to {}",
            summary.converted,
            build.output_dir.display()
        ));
        Ok(())
    }
}

/// Outcome of a build run.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct BuildSummary {
    pub converted: usize,
    pub failed: usize,
}

impl BuildSummary {
    fn total(&self) -> usize {
        self.converted + self.failed
    }
}

/// Convert all posts of a build configuration.
///
/// Only a missing source directory or an unreadable directory fails the
/// whole run; per-post errors are logged and counted in the summary.
pub(crate) fn build_posts(
    converter: &MarkdownConverter,
    build: &BuildConfig,
) -> Result<BuildSummary, BuildError> {
    let start = Instant::now();

    if !build.source_dir.is_dir() {
        return Err(BuildError::SourceMissing(build.source_dir.clone()));
    }

    let posts = collect_posts(build)?;

    let failed = posts
        .par_iter()
        .filter(|relative| {
            match convert_post(converter, &build.source_dir, &build.output_dir, relative) {
                Ok(dest) => {
                    tracing::debug!(post = %relative.display(), dest = %dest.display(), "Converted post");
                    false
                }
                Err(e) => {
                    tracing::warn!(post = %relative.display(), error = %e, "Failed to convert post");
                    true
                }
            }
        })
        .count();

    let summary = BuildSummary {
        converted: posts.len() - failed,
        failed,
    };

    tracing::info!(
        files = posts.len(),
        failed,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Build finished"
    );

    Ok(summary)
}

/// Find `*.md` posts under the source directory.
///
/// Returns paths relative to the source directory, sorted. Hidden files and
/// directories and paths matching an exclude pattern are skipped.
fn collect_posts(build: &BuildConfig) -> Result<Vec<PathBuf>, BuildError> {
    let mut posts = Vec::new();
    scan_directory(build, &build.source_dir, &mut posts)?;
    posts.sort();
    Ok(posts)
}

fn scan_directory(
    build: &BuildConfig,
    dir: &Path,
    posts: &mut Vec<PathBuf>,
) -> Result<(), BuildError> {
    for entry in fs::read_dir(dir).map_err(BuildError::io(dir))? {
        let entry = entry.map_err(BuildError::io(dir))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(&build.source_dir) else {
            continue;
        };
        if build.is_excluded(relative) {
            tracing::debug!(post = %relative.display(), "Excluded");
            continue;
        }

        let is_dir = entry
            .file_type()
            .map_err(BuildError::io(&path))?
            .is_dir();
        if is_dir {
            scan_directory(build, &path, posts)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            posts.push(relative.to_path_buf());
        }
    }
    Ok(())
}

/// Convert one post and write it next to its mirror path in the output
/// directory. Returns the written path.
fn convert_post(
    converter: &MarkdownConverter,
    source_dir: &Path,
    output_dir: &Path,
    relative: &Path,
) -> Result<PathBuf, BuildError> {
    let source = source_dir.join(relative);
    let markdown = fs::read_to_string(&source).map_err(BuildError::io(&source))?;
    let html = converter.convert(&markdown);

    let dest = output_dir.join(relative).with_extension("html");
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(BuildError::io(parent))?;
    }
    fs::write(&dest, html).map_err(BuildError::io(&dest))?;

    Ok(dest)
}
