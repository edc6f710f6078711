//! Single-page HTML documentation builder.
//!
//! Turns an ordered list of Markdown files into one self-contained HTML page:
//!
//! 1. [`SourceDocument::load`] reads every input (in argument order).
//! 2. [`resolve_title`] picks the page title.
//! 3. [`build_nav`] derives one [`NavEntry`] per document.
//! 4. [`assemble`] renders each document into an anchored section.
//! 5. [`compose`] substitutes everything into the page template.
//! 6. [`DocsBuilder::build`] writes the result, as the very last step.
//!
//! Any failure aborts the pipeline before the output file is touched.

mod builder;
mod content;
mod document;
mod error;
mod navigation;
mod template;
mod title;

pub use builder::{BuildConfig, BuildContext, BuildReport, DocsBuilder};
pub use content::{SEPARATOR, assemble};
pub use document::SourceDocument;
pub use error::BuildError;
pub use microdocs_templates::{TemplateError, TemplateSource};
pub use navigation::{NavEntry, build_nav, render_nav};
pub use template::{PageParts, compose, format_timestamp, render_repo_link};
pub use title::{FALLBACK_TITLE, resolve_title};
