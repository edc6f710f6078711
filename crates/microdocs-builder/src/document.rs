//! Input documents.

use std::path::{Path, PathBuf};

use microdocs_renderer::extract_title;

use crate::error::BuildError;

const UTF8_BOM: &str = "\u{feff}";

/// A Markdown input file, read and decoded.
///
/// Immutable once loaded; rendering happens in [`assemble`](crate::assemble).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceDocument {
    path: PathBuf,
    markdown: String,
    title: Option<String>,
}

impl SourceDocument {
    /// Read and decode a Markdown file.
    ///
    /// # Errors
    ///
    /// - [`BuildError::Input`] if the file cannot be read.
    /// - [`BuildError::Render`] if its content is not valid UTF-8.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let bytes = std::fs::read(path).map_err(|source| BuildError::Input {
            path: path.to_path_buf(),
            source,
        })?;
        let markdown = std::str::from_utf8(&bytes).map_err(|source| BuildError::Render {
            path: path.to_path_buf(),
            source,
        })?;

        let document = Self::from_markdown(path, markdown);
        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            title = document.title.as_deref().unwrap_or(""),
            "Loaded document"
        );
        if document.markdown.trim().is_empty() {
            tracing::warn!(path = %path.display(), "Document is empty");
        }
        Ok(document)
    }

    /// Create a document from Markdown text already in memory.
    pub fn from_markdown(path: impl Into<PathBuf>, markdown: &str) -> Self {
        let markdown = markdown.strip_prefix(UTF8_BOM).unwrap_or(markdown);
        Self {
            path: path.into(),
            title: extract_title(markdown),
            markdown: markdown.to_owned(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    /// Plain text of the document's first H1, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// File name with its extension (`README.md`).
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    /// File name without its extension (`README`).
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_markdown_extracts_title() {
        let doc = SourceDocument::from_markdown("README.md", "# Hello\nWorld");
        assert_eq!(doc.title(), Some("Hello"));
        assert_eq!(doc.file_name(), Some("README.md"));
        assert_eq!(doc.file_stem(), "README");
    }

    #[test]
    fn test_from_markdown_without_h1() {
        let doc = SourceDocument::from_markdown("docs/notes.md", "Just text");
        assert_eq!(doc.title(), None);
        assert_eq!(doc.file_stem(), "notes");
    }

    #[test]
    fn test_bom_is_dropped() {
        let doc = SourceDocument::from_markdown("a.md", "\u{feff}# Title");
        assert_eq!(doc.markdown(), "# Title");
        assert_eq!(doc.title(), Some("Title"));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("GUIDE.md");
        std::fs::write(&path, "# Guide\n\nSteps").unwrap();

        let doc = SourceDocument::load(&path).unwrap();
        assert_eq!(doc.path(), path);
        assert_eq!(doc.title(), Some("Guide"));
        assert_eq!(doc.markdown(), "# Guide\n\nSteps");
    }

    #[test]
    fn test_load_missing_file() {
        let err = SourceDocument::load(Path::new("/nonexistent/README.md")).unwrap_err();
        assert!(matches!(err, BuildError::Input { .. }));
        assert!(err.to_string().contains("/nonexistent/README.md"));
    }

    #[test]
    fn test_load_invalid_utf8_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.md");
        std::fs::write(&path, [b'#', b' ', 0xff, 0xfe, b'\n']).unwrap();

        let err = SourceDocument::load(&path).unwrap_err();
        assert!(matches!(err, BuildError::Render { .. }));
        assert!(err.to_string().contains("broken.md"));
    }
}
