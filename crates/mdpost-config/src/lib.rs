//! `mdpost.toml` loading.
//!
//! The file is looked up in the working directory and its ancestors unless a
//! path is given. Every section is optional; missing keys keep their
//! defaults. Relative paths resolve against the directory holding the file,
//! and [`CliSettings`] overrides are applied last.
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` (error if unset) and `${VAR:-default}` are expanded in:
//! - `render.table_class`
//! - `build.source_dir`
//! - `build.output_dir`

mod expand;

use std::path::{Path, PathBuf};

use glob::Pattern;
use mdpost_renderer::{DEFAULT_EXCERPT_LENGTH, DEFAULT_TABLE_CLASS, MarkdownConverter};
use serde::Deserialize;

/// Command line overrides, applied after the file is loaded and resolved.
///
/// `None` keeps the configured value.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override posts source directory.
    pub source_dir: Option<PathBuf>,
    /// Override HTML output directory.
    pub output_dir: Option<PathBuf>,
    /// Override GFM extensions flag.
    pub gfm: Option<bool>,
    /// Override raw HTML passthrough flag.
    pub raw_html: Option<bool>,
    /// Override excerpt length.
    pub max_length: Option<usize>,
}

/// File looked up by [`Config::load`] when no path is given.
const CONFIG_FILENAME: &str = "mdpost.toml";

/// Loaded `mdpost.toml`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Converter options.
    pub render: RenderConfig,
    /// Excerpt options.
    pub excerpt: ExcerptConfig,
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Converter options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// GitHub Flavored Markdown extensions (tables, strikethrough, task lists).
    pub gfm: bool,
    /// Class attribute of rendered tables.
    pub table_class: String,
    /// Open links in a new tab.
    pub external_links: bool,
    /// Pass raw HTML through instead of escaping it.
    pub raw_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            table_class: DEFAULT_TABLE_CLASS.to_owned(),
            external_links: true,
            raw_html: true,
        }
    }
}

impl RenderConfig {
    /// Build a converter with these options.
    #[must_use]
    pub fn to_converter(&self) -> MarkdownConverter {
        MarkdownConverter::new()
            .with_gfm(self.gfm)
            .with_table_class(self.table_class.clone())
            .with_external_links(self.external_links)
            .with_raw_html(self.raw_html)
    }
}

/// Excerpt options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExcerptConfig {
    /// Maximum excerpt length in characters.
    pub max_length: usize,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_EXCERPT_LENGTH,
        }
    }
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    exclude: Option<Vec<String>>,
}

/// Resolved build configuration with absolute paths and compiled patterns.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Directory scanned for `*.md` posts.
    pub source_dir: PathBuf,
    /// Directory receiving the rendered `.html` files.
    pub output_dir: PathBuf,
    /// Glob patterns, relative to `source_dir`, of files to skip.
    pub exclude: Vec<Pattern>,
}

impl BuildConfig {
    /// Check a path relative to `source_dir` against the exclude patterns.
    #[must_use]
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude.iter().any(|pattern| pattern.matches_path(relative))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`build.output_dir`").
        field: String,
        /// Error message (e.g., "${`SITE_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdpost.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, so CLI
    /// arguments take precedence over config file values. Validation runs
    /// on the final result.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.build_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(gfm) = settings.gfm {
            self.render.gfm = gfm;
        }
        if let Some(raw_html) = settings.raw_html {
            self.render.raw_html = raw_html;
        }
        if let Some(max_length) = settings.max_length {
            self.excerpt.max_length = max_length;
        }
    }

    /// Find `mdpost.toml` in the working directory or the nearest ancestor.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        cwd.ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            render: RenderConfig::default(),
            excerpt: ExcerptConfig::default(),
            build: BuildConfigRaw::default(),
            build_resolved: BuildConfig {
                source_dir: base.join("posts"),
                output_dir: base.join("dist"),
                exclude: Vec::new(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Environment variables first, so expanded paths get resolved too
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically at the end of [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.excerpt.max_length == 0 {
            return Err(ConfigError::Validation(
                "excerpt.max_length must be greater than 0".to_owned(),
            ));
        }

        if self.build_resolved.source_dir == self.build_resolved.output_dir {
            return Err(ConfigError::Validation(format!(
                "build.output_dir cannot be the same as build.source_dir ({})",
                self.build_resolved.source_dir.display()
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.render.table_class =
            expand::expand_env(&self.render.table_class, "render.table_class")?;

        if let Some(ref dir) = self.build.source_dir {
            self.build.source_dir = Some(expand::expand_env(dir, "build.source_dir")?);
        }
        if let Some(ref dir) = self.build.output_dir {
            self.build.output_dir = Some(expand::expand_env(dir, "build.output_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory and compile
    /// exclude patterns.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let exclude = self
            .build
            .exclude
            .iter()
            .flatten()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|e| {
                    ConfigError::Validation(format!(
                        "build.exclude pattern {pattern:?} is invalid: {e}"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.build_resolved = BuildConfig {
            source_dir: resolve(self.build.source_dir.as_deref(), "posts"),
            output_dir: resolve(self.build.output_dir.as_deref(), "dist"),
            exclude,
        };

        Ok(())
    }
}
