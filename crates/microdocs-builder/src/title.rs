//! Page title resolution.

use crate::document::SourceDocument;

/// Title used when neither an override nor an H1 in the first document exists.
pub const FALLBACK_TITLE: &str = "Documentation";

/// Pick the page title.
///
/// 1. A non-blank `explicit` title, verbatim.
/// 2. The first H1 of the *first* document (later documents are never used).
/// 3. [`FALLBACK_TITLE`].
pub fn resolve_title(explicit: Option<&str>, documents: &[SourceDocument]) -> String {
    if let Some(title) = explicit.filter(|title| !title.trim().is_empty()) {
        return title.to_owned();
    }

    documents
        .first()
        .and_then(SourceDocument::title)
        .unwrap_or(FALLBACK_TITLE)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, markdown: &str) -> SourceDocument {
        SourceDocument::from_markdown(name, markdown)
    }

    #[test]
    fn test_explicit_title_wins() {
        let docs = [doc("README.md", "# Hello")];
        assert_eq!(resolve_title(Some("My Project"), &docs), "My Project");
    }

    #[test]
    fn test_explicit_title_is_verbatim() {
        let docs = [doc("README.md", "# Hello")];
        assert_eq!(resolve_title(Some("  Spaced  "), &docs), "  Spaced  ");
    }

    #[test]
    fn test_blank_explicit_title_is_ignored() {
        let docs = [doc("README.md", "# Hello")];
        assert_eq!(resolve_title(Some(""), &docs), "Hello");
        assert_eq!(resolve_title(Some("   "), &docs), "Hello");
    }

    #[test]
    fn test_first_document_h1() {
        let docs = [doc("A.md", "# Alpha"), doc("B.md", "# Beta")];
        assert_eq!(resolve_title(None, &docs), "Alpha");
    }

    #[test]
    fn test_later_documents_never_used() {
        let docs = [doc("A.md", "no heading"), doc("B.md", "# Beta")];
        assert_eq!(resolve_title(None, &docs), FALLBACK_TITLE);
    }

    #[test]
    fn test_fallback_without_documents() {
        assert_eq!(resolve_title(None, &[]), FALLBACK_TITLE);
    }

    #[test]
    fn test_title_markup_is_stripped() {
        let docs = [doc("README.md", "# **Bold** `code` title")];
        assert_eq!(resolve_title(None, &docs), "Bold code title");
    }
}
