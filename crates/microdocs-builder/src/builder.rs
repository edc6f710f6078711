//! The build pipeline.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use microdocs_renderer::escape_html;
use microdocs_templates::TemplateSource;

use crate::content::assemble;
use crate::document::SourceDocument;
use crate::error::BuildError;
use crate::navigation::{NavEntry, build_nav, render_nav};
use crate::template::{PageParts, compose, format_timestamp, render_repo_link};
use crate::title::resolve_title;

/// Configuration for a documentation build.
///
/// Optional values fall back as documented on each field.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Markdown files, in the order they appear on the page.
    pub inputs: Vec<PathBuf>,
    /// Output HTML path; overwritten if it exists.
    pub output: PathBuf,
    /// Page template (default: the `default` built-in).
    pub template: TemplateSource,
    /// Repository URL; no link is rendered when `None`.
    pub repo_url: Option<String>,
    /// Title override; falls back to the first document's H1.
    pub title: Option<String>,
    /// Footer text; falls back to a build timestamp.
    pub footer: Option<String>,
}

impl BuildConfig {
    /// Create a config with every optional value unset.
    pub fn new(inputs: Vec<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output: output.into(),
            template: TemplateSource::default(),
            repo_url: None,
            title: None,
            footer: None,
        }
    }
}

/// Everything the page is made of, fully resolved.
///
/// Built once per run and not modified afterwards.
#[derive(Clone, Debug)]
pub struct BuildContext {
    /// Input documents in input order.
    pub documents: Vec<SourceDocument>,
    /// One entry per document, same order.
    pub nav: Vec<NavEntry>,
    /// Resolved page title (plain text).
    pub title: String,
    pub repo_url: Option<String>,
    /// Resolved footer text (plain text).
    pub footer: String,
    /// Template text.
    pub template: String,
}

impl BuildContext {
    /// Render the document sections and the page parts around them.
    pub fn page_parts(&self) -> PageParts {
        PageParts {
            title: escape_html(&self.title),
            nav: render_nav(&self.nav),
            body: assemble(&self.documents, &self.nav),
            repo_link: render_repo_link(self.repo_url.as_deref()),
            footer: escape_html(&self.footer),
        }
    }

    /// Produce the final HTML page.
    pub fn render(&self) -> String {
        compose(&self.template, &self.page_parts())
    }
}

/// Summary of a finished build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildReport {
    /// Path the page was written to.
    pub output: PathBuf,
    /// Resolved page title.
    pub title: String,
    /// Number of document sections.
    pub sections: usize,
    /// Size of the written page in bytes.
    pub bytes: usize,
}

/// Builds a single-page HTML documentation site from Markdown files.
///
/// # Example
///
/// ```no_run
/// use microdocs_builder::{BuildConfig, DocsBuilder};
///
/// let config = BuildConfig::new(vec!["README.md".into()], "index.html");
/// let report = DocsBuilder::new(config).build()?;
/// println!("{} sections", report.sections);
/// # Ok::<(), microdocs_builder::BuildError>(())
/// ```
pub struct DocsBuilder {
    config: BuildConfig,
    timestamp: Option<DateTime<Utc>>,
}

impl DocsBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            timestamp: None,
        }
    }

    /// Pin the build time used for the default footer.
    ///
    /// Two builds with the same inputs and the same timestamp produce
    /// byte-identical pages.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Read all inputs and the template, and resolve title, navigation and
    /// footer.
    ///
    /// Inputs are read sequentially in input order; the first failure aborts.
    pub fn context(&self) -> Result<BuildContext, BuildError> {
        if self.config.inputs.is_empty() {
            return Err(BuildError::NoInputs);
        }

        let documents = self
            .config
            .inputs
            .iter()
            .map(|path| SourceDocument::load(path))
            .collect::<Result<Vec<_>, _>>()?;

        let template = self.config.template.load()?;
        tracing::debug!(template = %self.config.template, "Loaded template");

        let title = resolve_title(self.config.title.as_deref(), &documents);
        let nav = build_nav(&documents);
        let footer = match &self.config.footer {
            Some(footer) => footer.clone(),
            None => format_timestamp(self.timestamp.unwrap_or_else(Utc::now)),
        };

        tracing::info!(
            documents = documents.len(),
            title = %title,
            "Resolved documentation structure"
        );

        Ok(BuildContext {
            documents,
            nav,
            title,
            repo_url: self.config.repo_url.clone(),
            footer,
            template,
        })
    }

    /// Run the pipeline and return the page without writing it.
    pub fn render(&self) -> Result<String, BuildError> {
        Ok(self.context()?.render())
    }

    /// Run the pipeline and write the page to the configured output path.
    ///
    /// Missing parent directories of the output are created. Nothing is
    /// written if an earlier stage fails.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let context = self.context()?;
        let html = context.render();

        write_output(&self.config.output, &html)?;
        tracing::info!(
            output = %self.config.output.display(),
            bytes = html.len(),
            "Wrote documentation page"
        );

        Ok(BuildReport {
            output: self.config.output.clone(),
            title: context.title,
            sections: context.documents.len(),
            bytes: html.len(),
        })
    }
}

fn write_output(path: &Path, html: &str) -> Result<(), BuildError> {
    let to_error = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, html).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use microdocs_templates::TemplateError;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = "<title>{{ title }}</title>\n{{ nav }}\n{{ repo_link }}\n<main>{{ body }}</main>\n<footer>{{ footer }}</footer>";

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("template.html"), TEMPLATE).unwrap();
            Self { dir }
        }

        fn file(&self, name: &str, content: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, content).unwrap();
            path
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn config(&self, inputs: Vec<PathBuf>) -> BuildConfig {
            BuildConfig {
                template: TemplateSource::File(self.path("template.html")),
                ..BuildConfig::new(inputs, self.path("out/index.html"))
            }
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_single_readme_scenario() {
        let fx = Fixture::new();
        let readme = fx.file("README.md", "# Hello\nWorld");

        let builder = DocsBuilder::new(fx.config(vec![readme])).with_timestamp(fixed_time());
        let report = builder.build().unwrap();

        assert_eq!(report.title, "Hello");
        assert_eq!(report.sections, 1);
        let html = std::fs::read_to_string(fx.path("out/index.html")).unwrap();
        assert_eq!(report.bytes, html.len());
        assert!(html.contains("<title>Hello</title>"));
        assert!(html.contains("<p>World</p>"));
        assert!(html.contains("<footer>Built on 2025-06-01 12:30:00 UTC</footer>"));
        assert!(!html.contains("microdocs-nav"));
    }

    #[test]
    fn test_two_files_scenario() {
        let fx = Fixture::new();
        let a = fx.file("A.md", "# Alpha");
        let b = fx.file("B.md", "# Beta");

        let context = DocsBuilder::new(fx.config(vec![a, b])).context().unwrap();
        assert_eq!(context.title, "Alpha");
        let labels: Vec<_> = context.nav.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Alpha", "Beta"]);

        let html = context.render();
        let alpha = html.find("data-section-id=\"alpha\"").unwrap();
        let beta = html.find("data-section-id=\"beta\"").unwrap();
        assert!(alpha < beta);
    }

    #[test]
    fn test_explicit_options() {
        let fx = Fixture::new();
        let readme = fx.file("README.md", "# Hello");
        let config = BuildConfig {
            title: Some("My <Project>".to_owned()),
            footer: Some("v1.1 2025-01-01".to_owned()),
            repo_url: Some("https://github.com/acme/widget".to_owned()),
            ..fx.config(vec![readme])
        };

        let html = DocsBuilder::new(config).render().unwrap();
        assert!(html.contains("<title>My &lt;Project&gt;</title>"));
        assert!(html.contains("<footer>v1.1 2025-01-01</footer>"));
        assert!(html.contains("href=\"https://github.com/acme/widget\""));
    }

    #[test]
    fn test_builds_are_reproducible_with_pinned_time() {
        let fx = Fixture::new();
        let inputs = vec![fx.file("A.md", "# Alpha\n\n## Usage"), fx.file("B.md", "text")];

        let first = DocsBuilder::new(fx.config(inputs.clone()))
            .with_timestamp(fixed_time())
            .render()
            .unwrap();
        let second = DocsBuilder::new(fx.config(inputs))
            .with_timestamp(fixed_time())
            .render()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_builtin_template_output_is_self_contained() {
        let fx = Fixture::new();
        let readme = fx.file("README.md", "# Hello\nWorld");
        let config = BuildConfig::new(vec![readme], fx.path("index.html"));

        let html = DocsBuilder::new(config).render().unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Hello</title>"));
        assert!(!html.contains("{{ body }}"));
        assert!(!html.contains("<link rel=\"stylesheet\""));
        assert!(!html.contains("<script src="));
    }

    #[test]
    fn test_no_inputs() {
        let fx = Fixture::new();
        let err = DocsBuilder::new(fx.config(vec![])).build().unwrap_err();
        assert!(matches!(err, BuildError::NoInputs));
    }

    #[test]
    fn test_missing_input_aborts_before_write() {
        let fx = Fixture::new();
        let good = fx.file("README.md", "# Hello");
        let missing = fx.path("MISSING.md");

        let err = DocsBuilder::new(fx.config(vec![good, missing.clone()]))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::Input { ref path, .. } if *path == missing));
        assert!(!fx.path("out/index.html").exists());
    }

    #[test]
    fn test_render_error_keeps_existing_output() {
        let fx = Fixture::new();
        let good = fx.file("README.md", "# Hello");
        let broken = fx.path("broken.md");
        std::fs::write(&broken, [0xc3, 0x28]).unwrap();
        std::fs::create_dir_all(fx.path("out")).unwrap();
        std::fs::write(fx.path("out/index.html"), "previous").unwrap();

        let err = DocsBuilder::new(fx.config(vec![good, broken.clone()]))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::Render { ref path, .. } if *path == broken));
        assert!(err.to_string().contains("broken.md"));
        assert_eq!(
            std::fs::read_to_string(fx.path("out/index.html")).unwrap(),
            "previous"
        );
    }

    #[test]
    fn test_missing_template_file_aborts_before_write() {
        let fx = Fixture::new();
        let readme = fx.file("README.md", "# Hello");
        let config = BuildConfig {
            template: TemplateSource::File(fx.path("nope.html")),
            ..fx.config(vec![readme])
        };

        let err = DocsBuilder::new(config).build().unwrap_err();
        assert!(matches!(
            err,
            BuildError::Template(TemplateError::Read { .. })
        ));
        assert!(!fx.path("out/index.html").exists());
    }

    #[test]
    fn test_output_overwritten() {
        let fx = Fixture::new();
        let readme = fx.file("README.md", "# Fresh");
        std::fs::create_dir_all(fx.path("out")).unwrap();
        std::fs::write(fx.path("out/index.html"), "stale").unwrap();

        DocsBuilder::new(fx.config(vec![readme])).build().unwrap();
        let html = std::fs::read_to_string(fx.path("out/index.html")).unwrap();
        assert!(html.contains("<title>Fresh</title>"));
    }

    #[test]
    fn test_unwritable_output() {
        let fx = Fixture::new();
        let readme = fx.file("README.md", "# Hello");
        // A regular file where a directory is needed
        fx.file("blocker", "");
        let config = BuildConfig {
            output: fx.path("blocker/index.html"),
            ..fx.config(vec![readme])
        };

        let err = DocsBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, BuildError::Write { .. }));
        assert!(err.to_string().contains("blocker"));
    }
}
