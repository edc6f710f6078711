//! Build error types.

use std::path::PathBuf;

use microdocs_templates::TemplateError;

/// Error returned by the documentation builder.
///
/// Every variant is fatal. The message names the stage and the path that
/// failed.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The build was started without input files.
    #[error("No input files given")]
    NoInputs,

    /// An input file is missing or unreadable.
    #[error("Failed to read input {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file could not be rendered as Markdown.
    #[error("Failed to render {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The template could not be resolved or loaded.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The output file could not be written.
    #[error("Failed to write output {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
