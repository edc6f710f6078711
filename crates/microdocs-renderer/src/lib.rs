//! Markdown to HTML fragment rendering for microdocs.
//!
//! This crate provides [`MarkdownRenderer`], a pulldown-cmark event renderer
//! that produces an HTML fragment for a single Markdown document together
//! with the metadata the page builder needs:
//!
//! - the plain text of the first H1 (see [`MarkdownRenderer::with_title_extraction`])
//! - a table of contents with stable heading ids
//! - in-page anchors for links between input files (see [`SectionLinks`])
//!
//! # Example
//!
//! ```
//! use microdocs_renderer::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new()
//!     .with_title_extraction()
//!     .render_markdown("# Hello\n\n**Bold** text");
//!
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(result.html.contains("<strong>Bold</strong>"));
//! ```

mod html;
mod links;
mod renderer;
mod state;
mod util;

pub use html::AlertKind;
pub use links::SectionLinks;
pub use renderer::{MarkdownRenderer, RenderResult, extract_title};
pub use state::{TocEntry, escape_html, slugify};
