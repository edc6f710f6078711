//! Configuration management for microdocs.
//!
//! Parses optional `microdocs.toml` files with serde and provides
//! auto-discovery of the config file in parent directories.
//!
//! ```toml
//! [build]
//! output = "site/index.html"
//! template = "default"
//! repo_url = "https://github.com/acme/widget"
//! title = "Widget"
//! footer = "Widget ${WIDGET_VERSION:-dev}"
//! ```
//!
//! CLI flags are applied on top of the file via [`CliSettings`], so each
//! option resolves as: CLI flag, then config file, then built-in default.
//!
//! String values support `${VAR}` and `${VAR:-default}` environment variable
//! expansion.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "microdocs.toml";

/// Output path used when neither the CLI nor the config file sets one.
pub const DEFAULT_OUTPUT: &str = "index.html";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output HTML path.
    pub output: Option<PathBuf>,
    /// Override template name or path.
    pub template: Option<String>,
    /// Override repository URL.
    pub repo_url: Option<String>,
    /// Override documentation title.
    pub title: Option<String>,
    /// Override footer text.
    pub footer: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Build options.
    pub build: BuildSettings,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// The `[build]` table.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSettings {
    /// Output HTML path.
    pub output: Option<PathBuf>,
    /// Built-in template name or path to a template file.
    pub template: Option<String>,
    /// Repository URL shown in the navigation.
    pub repo_url: Option<String>,
    /// Documentation title override.
    pub title: Option<String>,
    /// Footer text override.
    pub footer: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`build.footer`").
        field: String,
        /// Error message (e.g., "${`VERSION`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `microdocs.toml` in the current directory and
    /// its parents. Without a config file, defaults are used.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Output path, falling back to [`DEFAULT_OUTPUT`].
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.build
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(output) = &self.build.output
            && output.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "build.output cannot be empty".to_owned(),
            ));
        }
        if let Some(url) = &self.build.repo_url {
            require_http_url(url, "build.repo_url")?;
        }
        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output) = &settings.output {
            self.build.output = Some(output.clone());
        }
        if let Some(template) = &settings.template {
            self.build.template = Some(template.clone());
        }
        if let Some(repo_url) = &settings.repo_url {
            self.build.repo_url = Some(repo_url.clone());
        }
        if let Some(title) = &settings.title {
            self.build.title = Some(title.clone());
        }
        if let Some(footer) = &settings.footer {
            self.build.footer = Some(footer.clone());
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let build = &mut self.build;
        expand::expand_opt(&mut build.template, "build.template")?;
        expand::expand_opt(&mut build.repo_url, "build.repo_url")?;
        expand::expand_opt(&mut build.title, "build.title")?;
        expand::expand_opt(&mut build.footer, "build.footer")?;
        Ok(())
    }

    /// Resolve relative paths against the config file directory.
    ///
    /// Template values that look like file paths (contain a separator or end
    /// in `.html`) are resolved too; bare names stay built-in template names.
    fn resolve_paths(&mut self, config_dir: &Path) {
        if let Some(output) = &self.build.output
            && output.is_relative()
        {
            self.build.output = Some(config_dir.join(output));
        }
        if let Some(template) = &self.build.template {
            let looks_like_path = template.contains(['/', '\\'])
                || Path::new(template)
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
            if looks_like_path && Path::new(template).is_relative() {
                self.build.template = Some(config_dir.join(template).to_string_lossy().into_owned());
            }
        }
    }
}

/// Search for the config file in `start` and its parents.
fn discover_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}
