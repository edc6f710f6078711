//! Navigation entries and their anchors.

use std::collections::HashSet;
use std::fmt::Write;

use microdocs_renderer::{escape_html, slugify};

use crate::document::SourceDocument;

/// Slug used when a label has no alphanumeric characters.
const EMPTY_SLUG: &str = "section";

/// One navigation menu entry, pointing at a document's section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    /// Visible label: the document's first H1, else its file stem.
    pub label: String,
    /// Section anchor, unique within the page.
    pub slug: String,
}

/// Build one navigation entry per document, in input order.
///
/// Slugs are unique: the first occurrence keeps the bare slug, later ones get
/// `-2`, `-3`, ... (skipping any candidate that is already taken).
pub fn build_nav(documents: &[SourceDocument]) -> Vec<NavEntry> {
    let mut taken = HashSet::with_capacity(documents.len());

    documents
        .iter()
        .map(|document| {
            let label = document
                .title()
                .map_or_else(|| document.file_stem(), ToOwned::to_owned);
            let slug = unique_slug(&label, &mut taken);
            NavEntry { label, slug }
        })
        .collect()
}

fn unique_slug(label: &str, taken: &mut HashSet<String>) -> String {
    let mut base = slugify(label);
    if base.is_empty() {
        base.push_str(EMPTY_SLUG);
    }

    if taken.insert(base.clone()) {
        return base;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Render the navigation menu.
///
/// Returns an empty string for a single document: a one-entry menu has
/// nothing to navigate between.
pub fn render_nav(entries: &[NavEntry]) -> String {
    if entries.len() < 2 {
        return String::new();
    }

    let mut html = String::with_capacity(64 * entries.len());
    html.push_str("<nav class=\"microdocs-nav\">\n<ul>\n");
    for entry in entries {
        let slug = escape_html(&entry.slug);
        let _ = writeln!(
            html,
            "<li><a href=\"#{slug}\" data-section-id=\"{slug}\">{}</a></li>",
            escape_html(&entry.label),
        );
    }
    html.push_str("</ul>\n</nav>");
    html
}
