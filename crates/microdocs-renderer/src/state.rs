//! State structs that track context during event processing.

use std::collections::{HashMap, HashSet};

use pulldown_cmark::Alignment;

/// State for tracking code block rendering.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    /// Whether we're inside a code block.
    active: bool,
    /// Language of current code block (e.g., "rust", "python").
    language: Option<String>,
    /// Buffer for code block content.
    buffer: String,
}

impl CodeBlockState {
    /// Start a new code block with optional language.
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// End the current code block and return (language, content).
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub(crate) fn push_newline(&mut self) {
        self.buffer.push('\n');
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    /// Whether we're inside the table header row.
    in_head: bool,
    /// Column alignments for current table.
    alignments: Vec<Alignment>,
    /// Current column index in table row.
    cell_index: usize,
}

impl TableState {
    /// Start a new table with column alignments.
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Get the alignment style for the current cell.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// State for tracking image alt text capture.
#[derive(Default)]
pub(crate) struct ImageState {
    active: bool,
    alt_text: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        self.active = true;
        self.alt_text.clear();
    }

    /// End image capture and return the alt text.
    pub(crate) fn end(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.alt_text)
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// A heading that has been fully collected.
pub(crate) struct CompletedHeading {
    pub(crate) level: u8,
    pub(crate) id: String,
    pub(crate) html: String,
}

/// State for tracking headings and title extraction.
pub(crate) struct HeadingState {
    /// Whether to extract title from first H1.
    extract_title: bool,
    /// Extracted title from first H1.
    title: Option<String>,
    /// Current heading level being processed (None if not in a heading).
    current_level: Option<u8>,
    /// Buffer for heading plain text (for table of contents and slug).
    text: String,
    /// Buffer for heading HTML (with inline formatting).
    html: String,
    toc: Vec<TocEntry>,
    /// Next suffix to try for each base ID.
    id_counts: HashMap<String, usize>,
    /// IDs that are already taken (emitted or reserved by the caller).
    used_ids: HashSet<String>,
    /// IDs emitted by this document, in order.
    emitted_ids: Vec<String>,
}

impl HeadingState {
    pub(crate) fn new(extract_title: bool) -> Self {
        Self {
            extract_title,
            title: None,
            current_level: None,
            text: String::new(),
            html: String::new(),
            toc: Vec::new(),
            id_counts: HashMap::new(),
            used_ids: HashSet::new(),
            emitted_ids: Vec::new(),
        }
    }

    pub(crate) fn set_extract_title(&mut self, enabled: bool) {
        self.extract_title = enabled;
    }

    /// Mark IDs as taken so generated heading IDs never collide with them.
    pub(crate) fn reserve_ids<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.used_ids.extend(ids);
    }

    /// Check if we're currently inside any heading.
    pub(crate) fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub(crate) fn start_heading(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
        self.html.clear();
    }

    /// Complete heading and record its table of contents entry.
    ///
    /// The first non-empty H1 becomes the title (when extraction is enabled) and is kept
    /// out of the table of contents, but is still returned for rendering. Headings
    /// without text get an ID but no table of contents entry.
    pub(crate) fn complete_heading(&mut self) -> Option<CompletedHeading> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);
        let title = text.trim().to_owned();

        let id = self.generate_id(&title);

        let is_title =
            self.extract_title && level == 1 && self.title.is_none() && !title.is_empty();
        if is_title {
            self.title = Some(title);
        } else if !title.is_empty() {
            self.toc.push(TocEntry {
                level,
                title,
                id: id.clone(),
            });
        }

        Some(CompletedHeading { level, id, html })
    }

    /// Generate a unique ID for a heading.
    ///
    /// The first occurrence keeps the bare slug, later ones get `-1`, `-2`, ...
    /// Candidates that are already taken are skipped.
    fn generate_id(&mut self, text: &str) -> String {
        let mut base_id = slugify(text);
        if base_id.is_empty() {
            base_id.push_str("heading");
        }
        let mut n = self.id_counts.get(&base_id).copied().unwrap_or_default();
        loop {
            let candidate = match n {
                0 => base_id.clone(),
                n => format!("{base_id}-{n}"),
            };
            n += 1;
            if self.used_ids.insert(candidate.clone()) {
                self.id_counts.insert(base_id, n);
                self.emitted_ids.push(candidate.clone());
                return candidate;
            }
        }
    }

    /// Append plain text to the heading text buffer.
    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub(crate) fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }

    pub(crate) fn take_emitted_ids(&mut self) -> Vec<String> {
        std::mem::take(&mut self.emitted_ids)
    }
}

/// Convert text to a URL- and anchor-safe slug.
///
/// Alphanumeric characters are lowercased and kept. Every run of other
/// characters (whitespace, punctuation, symbols) becomes a single dash.
/// Leading and trailing dashes are dropped.
///
/// # Examples
///
/// ```
/// use microdocs_renderer::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("What's New?"), "what-s-new");
/// assert_eq!(slugify("--"), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !result.is_empty() {
                result.push('-');
            }
            pending_dash = false;
            result.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    result
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "what-s-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("kebab-case"), "kebab-case");
        assert_eq!(slugify("snake_case"), "snake-case");
        assert_eq!(slugify("v1.2 -- Release!"), "v1-2-release");
    }

    #[test]
    fn test_slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Über Uns"), "über-uns");
    }

    #[test]
    fn test_slugify_only_punctuation() {
        assert_eq!(slugify("?!..."), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_code_block_state() {
        let mut state = CodeBlockState::default();
        assert!(!state.is_active());

        state.start(Some("rust".to_owned()));
        assert!(state.is_active());

        state.push_str("fn main() {}");
        let (lang, content) = state.end();
        assert_eq!(lang, Some("rust".to_owned()));
        assert_eq!(content, "fn main() {}");
        assert!(!state.is_active());
    }

    #[test]
    fn test_table_state() {
        let mut state = TableState::default();
        state.start(vec![Alignment::Left, Alignment::Center, Alignment::Right]);

        state.start_head();
        assert!(state.is_in_head());
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:left""#
        );

        state.next_cell();
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:center""#
        );

        state.next_cell();
        assert_eq!(
            state.current_alignment_style(),
            r#" style="text-align:right""#
        );

        state.end_head();
        assert!(!state.is_in_head());
    }

    #[test]
    fn test_heading_state_extracts_first_h1() {
        let mut state = HeadingState::new(true);

        state.start_heading(1);
        state.push_text("My Title");
        let heading = state.complete_heading().unwrap();
        assert_eq!(heading.level, 1);
        assert_eq!(heading.id, "my-title");

        state.start_heading(2);
        state.push_text("Section");
        let heading = state.complete_heading().unwrap();
        assert_eq!(heading.level, 2);

        state.start_heading(1);
        state.push_text("Second Title");
        state.complete_heading().unwrap();

        assert_eq!(state.take_title(), Some("My Title".to_owned()));
        let toc = state.take_toc();
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[1].title, "Second Title");
    }

    #[test]
    fn test_heading_state_without_extraction() {
        let mut state = HeadingState::new(false);
        state.start_heading(1);
        state.push_text("Title");
        state.complete_heading();

        assert_eq!(state.take_title(), None);
        assert_eq!(state.take_toc().len(), 1);
    }

    #[test]
    fn test_heading_state_skips_reserved_ids() {
        let mut state = HeadingState::new(false);
        state.reserve_ids(["intro".to_owned(), "intro-1".to_owned()]);

        state.start_heading(2);
        state.push_text("Intro");
        assert_eq!(state.complete_heading().unwrap().id, "intro-2");

        state.start_heading(2);
        state.push_text("Intro");
        assert_eq!(state.complete_heading().unwrap().id, "intro-3");

        assert_eq!(
            state.take_emitted_ids(),
            vec!["intro-2".to_owned(), "intro-3".to_owned()]
        );
    }

    #[test]
    fn test_heading_state_empty_heading_gets_id() {
        let mut state = HeadingState::new(false);
        state.start_heading(2);
        let heading = state.complete_heading().unwrap();
        assert_eq!(heading.id, "heading");
        assert!(state.take_toc().is_empty());
    }
}
