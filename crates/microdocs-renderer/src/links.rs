//! In-page link resolution between input documents.
//!
//! All input files end up in one HTML page, so a link such as
//! `[guide](GUIDE.md)` has to point at the section anchor the guide was
//! rendered under instead of at the Markdown file.

use std::borrow::Cow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::util::is_external;

/// Map of input file names to the section anchors they are rendered under.
///
/// Lookups use the final path component of the link target, so
/// `GUIDE.md`, `./GUIDE.md` and `docs/GUIDE.md` all resolve to the same
/// section.
#[derive(Clone, Debug, Default)]
pub struct SectionLinks {
    targets: HashMap<String, SectionTarget>,
}

#[derive(Clone, Debug, Default)]
struct SectionTarget {
    slug: String,
    /// Heading id the file would have on its own -> id it got in the page.
    anchors: HashMap<String, String>,
}

impl SectionLinks {
    /// Create an empty map (every link passes through unchanged).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the anchor for a file name (e.g. `"GUIDE.md"` → `"guide"`).
    ///
    /// The first registration for a name wins; returns `false` when the name
    /// was already registered.
    pub fn insert(&mut self, file_name: impl Into<String>, slug: impl Into<String>) -> bool {
        match self.targets.entry(file_name.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(SectionTarget {
                    slug: slug.into(),
                    anchors: HashMap::new(),
                });
                true
            }
        }
    }

    /// Map a heading id of a registered file to the id it was given in the
    /// page (e.g. `install` → `install-1` when an earlier section already has
    /// an "Install" heading).
    ///
    /// Ignored for unregistered files.
    pub fn insert_anchor(
        &mut self,
        file_name: &str,
        fragment: impl Into<String>,
        id: impl Into<String>,
    ) {
        if let Some(target) = self.targets.get_mut(file_name) {
            target.anchors.entry(fragment.into()).or_insert_with(|| id.into());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Rewrite a link destination into an in-page anchor when it names a
    /// registered file.
    ///
    /// - `GUIDE.md` → `#guide`
    /// - `GUIDE.md#setup` → the page id registered for `setup` in `GUIDE.md`,
    ///   or `#setup` as written when none was registered
    ///
    /// External URLs, fragment-only links and unknown files are returned
    /// unchanged.
    pub fn resolve<'a>(&self, url: &'a str) -> Cow<'a, str> {
        if self.targets.is_empty() || is_external(url) || url.starts_with('#') {
            return Cow::Borrowed(url);
        }

        let (path_part, fragment) = match url.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (url, None),
        };
        let file_name = path_part.rsplit('/').next().unwrap_or(path_part);

        let Some(target) = self.targets.get(file_name) else {
            return Cow::Borrowed(url);
        };
        match fragment.filter(|fragment| !fragment.is_empty()) {
            Some(fragment) => {
                let id = target.anchors.get(fragment).map_or(fragment, String::as_str);
                Cow::Owned(format!("#{id}"))
            }
            None => Cow::Owned(format!("#{}", target.slug)),
        }
    }
}
