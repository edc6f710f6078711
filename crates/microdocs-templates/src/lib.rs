//! Page templates for microdocs.
//!
//! Built-in templates are compiled into the binary with `rust-embed`. Each
//! template lives at `templates/<name>/<name>.html`; directories without a
//! matching HTML file are not templates.
//!
//! A template is plain HTML with `{{ placeholder }}` tokens. Substitution is
//! done by the page builder; this crate only locates and loads template text.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// Embedded built-in templates.
#[derive(rust_embed::RustEmbed)]
#[folder = "templates/"]
struct Templates;

/// Name of the template used when none is requested.
pub const DEFAULT_TEMPLATE: &str = "default";

/// Error returned when a template cannot be resolved or loaded.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Neither a built-in template nor an existing file.
    #[error("Template not found: {name} (not a file; built-in templates: {})", .available.join(", "))]
    NotFound {
        /// Requested template name or path.
        name: String,
        /// Names of the built-in templates.
        available: Vec<String>,
    },
    /// Template file exists but could not be read.
    #[error("Failed to read template {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Built-in template is not valid UTF-8.
    #[error("Built-in template {0} is not valid UTF-8")]
    InvalidBuiltin(String),
}

/// Names of all built-in templates, sorted.
pub fn available() -> Vec<String> {
    let mut names: Vec<String> = Templates::iter()
        .filter_map(|path| template_name(&path).map(ToOwned::to_owned))
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Text of a built-in template, if one with this name exists.
pub fn builtin(name: &str) -> Option<Cow<'static, [u8]>> {
    if name.is_empty() || name.contains(['/', '\\']) {
        return None;
    }
    Templates::get(&builtin_path(name)).map(|file| file.data)
}

/// Embedded path of a built-in template (`<name>/<name>.html`).
fn builtin_path(name: &str) -> String {
    format!("{name}/{name}.html")
}

/// Template name for an embedded path of the form `<name>/<name>.html`.
fn template_name(path: &str) -> Option<&str> {
    let (dir, file) = path.split_once('/')?;
    let stem = file.strip_suffix(".html")?;
    (dir == stem).then_some(dir)
}

/// Where the page template comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateSource {
    /// A template bundled with the tool, selected by name.
    Builtin(String),
    /// A custom template file.
    File(PathBuf),
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self::Builtin(DEFAULT_TEMPLATE.to_owned())
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(name) => write!(f, "built-in template '{name}'"),
            Self::File(path) => write!(f, "template file {}", path.display()),
        }
    }
}

impl TemplateSource {
    /// Resolve a template name or path.
    ///
    /// - `None` selects [`DEFAULT_TEMPLATE`].
    /// - A built-in template name wins over a file of the same name.
    /// - Anything else must be an existing file.
    pub fn resolve(name_or_path: Option<&str>) -> Result<Self, TemplateError> {
        let Some(requested) = name_or_path else {
            return Ok(Self::default());
        };

        if builtin(requested).is_some() {
            tracing::debug!(template = requested, "Using built-in template");
            return Ok(Self::Builtin(requested.to_owned()));
        }

        let path = Path::new(requested);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "Using custom template file");
            return Ok(Self::File(path.to_path_buf()));
        }

        Err(TemplateError::NotFound {
            name: requested.to_owned(),
            available: available(),
        })
    }

    /// Load the template text.
    pub fn load(&self) -> Result<String, TemplateError> {
        match self {
            Self::Builtin(name) => {
                let data = builtin(name).ok_or_else(|| TemplateError::NotFound {
                    name: name.clone(),
                    available: available(),
                })?;
                String::from_utf8(data.into_owned())
                    .map_err(|_| TemplateError::InvalidBuiltin(name.clone()))
            }
            Self::File(path) => {
                std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}
