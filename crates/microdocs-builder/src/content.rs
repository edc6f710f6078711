//! Content assembly: one anchored section per document.

use std::fmt::Write;

use microdocs_renderer::{MarkdownRenderer, SectionLinks, TocEntry, escape_html};

use crate::document::SourceDocument;
use crate::navigation::NavEntry;

/// Markup placed between two consecutive sections.
pub const SEPARATOR: &str = "\n<hr class=\"microdocs-separator\">\n";

/// Render every document and join the sections in input order.
///
/// `nav` must hold the entries [`build_nav`](crate::build_nav) produced for
/// the same documents; each section is anchored at its entry's slug. Links
/// between input files become in-page anchors, and heading IDs are kept
/// unique across the whole page.
pub fn assemble(documents: &[SourceDocument], nav: &[NavEntry]) -> String {
    debug_assert_eq!(documents.len(), nav.len());

    let links = section_links(documents, nav);
    let mut taken_ids = section_slugs(nav);
    let mut sections = Vec::with_capacity(documents.len());

    for (document, entry) in documents.iter().zip(nav) {
        let result = MarkdownRenderer::new()
            .with_title_extraction()
            .with_reserved_ids(taken_ids.iter().cloned())
            .with_section_links(links.clone())
            .render_markdown(document.markdown());

        tracing::debug!(
            path = %document.path().display(),
            slug = %entry.slug,
            headings = result.heading_ids.len(),
            "Rendered section"
        );

        taken_ids.extend(result.heading_ids);
        sections.push(render_section(entry, &result.html, &result.toc));
    }

    sections.join(SEPARATOR)
}

fn section_slugs(nav: &[NavEntry]) -> Vec<String> {
    nav.iter().map(|entry| entry.slug.clone()).collect()
}

/// Map each input file name to its section anchor, and each of its heading
/// IDs to the ID the heading gets in the page.
///
/// Links may point at later documents, so heading IDs are worked out in a
/// pass of their own before any section is rendered.
fn section_links(documents: &[SourceDocument], nav: &[NavEntry]) -> SectionLinks {
    let mut links = SectionLinks::new();
    let mut taken_ids = section_slugs(nav);

    for (document, entry) in documents.iter().zip(nav) {
        let standalone = MarkdownRenderer::new()
            .render_markdown(document.markdown())
            .heading_ids;
        let in_page = MarkdownRenderer::new()
            .with_reserved_ids(taken_ids.iter().cloned())
            .render_markdown(document.markdown())
            .heading_ids;

        if let Some(name) = document.file_name()
            && links.insert(name, entry.slug.clone())
        {
            for (fragment, id) in standalone.into_iter().zip(&in_page) {
                links.insert_anchor(name, fragment, id.clone());
            }
        }
        taken_ids.extend(in_page);
    }
    links
}

fn render_section(entry: &NavEntry, fragment: &str, toc: &[TocEntry]) -> String {
    let slug = escape_html(&entry.slug);
    let mut html = String::with_capacity(fragment.len() + 256);
    let _ = write!(
        html,
        "<section id=\"{slug}\" class=\"microdocs-section\" data-title=\"{}\">\n<article>\n",
        escape_html(&entry.label),
    );
    html.push_str(fragment);
    html.push_str("\n</article>\n");
    render_toc(&mut html, &slug, toc);
    html.push_str("</section>");
    html
}

/// Render the per-section table of contents (nothing when empty).
fn render_toc(html: &mut String, slug: &str, toc: &[TocEntry]) {
    if toc.is_empty() {
        return;
    }
    let _ = writeln!(html, "<nav class=\"microdocs-toc toc-{slug}\">");
    html.push_str("<h3>On this page</h3>\n<ul>\n");
    for entry in toc {
        let _ = writeln!(
            html,
            "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>",
            entry.level,
            escape_html(&entry.id),
            escape_html(&entry.title),
        );
    }
    html.push_str("</ul>\n</nav>\n");
}
