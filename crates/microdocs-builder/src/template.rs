//! Template composition.
//!
//! Templates are HTML with `{{ name }}` placeholders (inner whitespace is
//! optional). Only a closed set of names is recognized; everything else,
//! including unterminated `{{`, is copied through untouched. Substitution is
//! a single left-to-right pass, so placeholder-like text inside substituted
//! values (a code sample showing `{{ title }}`, say) is never expanded.

use chrono::{DateTime, Utc};
use microdocs_renderer::escape_html;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Values substituted into a template, already rendered as HTML.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageParts {
    /// Page title (`{{ title }}`), HTML-escaped.
    pub title: String,
    /// Navigation menu (`{{ nav }}`), empty for a single document.
    pub nav: String,
    /// Concatenated document sections (`{{ body }}`).
    pub body: String,
    /// Repository link (`{{ repo_link }}`), empty without a URL.
    pub repo_link: String,
    /// Footer text (`{{ footer }}`), HTML-escaped.
    pub footer: String,
}

impl PageParts {
    fn get(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "nav" => Some(&self.nav),
            "body" => Some(&self.body),
            "repo_link" => Some(&self.repo_link),
            "footer" => Some(&self.footer),
            _ => None,
        }
    }
}

/// Substitute page parts into a template.
///
/// Recognized placeholders absent from the template are simply not used.
pub fn compose(template: &str, parts: &PageParts) -> String {
    let mut out = String::with_capacity(template.len() + parts.body.len() + parts.nav.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];

        let value = after_open
            .find(CLOSE)
            .and_then(|end| parts.get(after_open[..end].trim()).map(|value| (end, value)));

        match value {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after_open[end + CLOSE.len()..];
            }
            None => {
                // Not a recognized placeholder: keep the braces and rescan
                // after them.
                out.push_str(OPEN);
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Render the repository link, or nothing without a URL.
pub fn render_repo_link(repo_url: Option<&str>) -> String {
    match repo_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => format!(
            "<a class=\"microdocs-repo-link\" href=\"{}\" target=\"_blank\" \
             rel=\"noopener noreferrer\">Repository</a>",
            escape_html(url)
        ),
        None => String::new(),
    }
}

/// Default footer text for a build started at `now`.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    format!("Built on {}", now.format("%Y-%m-%d %H:%M:%S UTC"))
}
