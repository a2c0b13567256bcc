use std::collections::BTreeMap;
use std::fmt;

use super::links::{anchor_open_pattern, parse_attributes};

/// Outcome of activating an internal link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Internal navigation is not wired up yet; carries the requested title
    Unresolved { title: String },
}

/// Click behavior attached to an internal anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalLinkHandler {
    title: String,
}

impl InternalLinkHandler {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Target title stored on the anchor
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Activate the link
    ///
    /// Reads the stored target title and does nothing else: following an
    /// internal link has no observable effect yet.
    pub fn click(&self) -> Navigation {
        tracing::debug!(title = %self.title, "internal link activated");
        Navigation::Unresolved {
            title: self.title.clone(),
        }
    }
}

/// An anchor element found in a fragment's markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Position among the fragment's anchors, in document order
    pub index: usize,
    pub classes: Vec<String>,
    pub href: Option<String>,
    pub target: Option<String>,
    pub data_title: Option<String>,
    /// Inner markup up to the closing tag
    pub label: String,
}

impl Anchor {
    pub fn is_internal(&self) -> bool {
        self.classes.iter().any(|c| c == "internal")
    }
}

/// Fragment - rendered markup plus handlers attached to its anchors
///
/// Handlers are keyed by anchor position, so composing fragments through
/// [`FragmentBuilder`] re-bases them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    markup: String,
    handlers: BTreeMap<usize, InternalLinkHandler>,
}

impl Fragment {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            handlers: BTreeMap::new(),
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn into_markup(self) -> String {
        self.markup
    }

    /// Number of anchor elements in the markup
    pub fn anchor_count(&self) -> usize {
        anchor_open_pattern().find_iter(&self.markup).count()
    }

    /// Parse the anchors of this fragment in document order
    pub fn anchors(&self) -> Vec<Anchor> {
        anchor_open_pattern()
            .captures_iter(&self.markup)
            .enumerate()
            .map(|(index, caps)| {
                let attrs = parse_attributes(caps.get(1).map_or("", |m| m.as_str()));
                let open_end = caps.get(0).map_or(0, |m| m.end());
                let rest = &self.markup[open_end..];
                let label = rest
                    .to_ascii_lowercase()
                    .find("</a>")
                    .map(|end| rest[..end].to_string())
                    .unwrap_or_default();
                let get = |name: &str| {
                    attrs
                        .iter()
                        .find(|(k, _)| k == name)
                        .map(|(_, v)| v.clone())
                };
                Anchor {
                    index,
                    classes: get("class")
                        .map(|c| c.split_whitespace().map(str::to_string).collect())
                        .unwrap_or_default(),
                    href: get("href"),
                    target: get("target"),
                    data_title: get("data-title"),
                    label,
                }
            })
            .collect()
    }

    /// Handler attached to the anchor at `index`, if any
    pub fn handler(&self, index: usize) -> Option<&InternalLinkHandler> {
        self.handlers.get(&index)
    }

    pub fn handlers(&self) -> impl Iterator<Item = (usize, &InternalLinkHandler)> {
        self.handlers.iter().map(|(i, h)| (*i, h))
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Attach a handler, replacing any handler already on that anchor
    pub(crate) fn set_handler(&mut self, index: usize, handler: InternalLinkHandler) {
        self.handlers.insert(index, handler);
    }

    pub(crate) fn set_markup(&mut self, markup: String) {
        self.markup = markup;
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

/// Concatenates markup and fragments while keeping anchor handlers aligned
#[derive(Debug, Default)]
pub struct FragmentBuilder {
    markup: String,
    handlers: BTreeMap<usize, InternalLinkHandler>,
    anchors: usize,
}

impl FragmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw markup
    pub fn push_markup(&mut self, markup: &str) -> &mut Self {
        self.anchors += anchor_open_pattern().find_iter(markup).count();
        self.markup.push_str(markup);
        self
    }

    /// Append a fragment, carrying its handlers over
    pub fn push_fragment(&mut self, fragment: &Fragment) -> &mut Self {
        let offset = self.anchors;
        for (index, handler) in fragment.handlers() {
            self.handlers.insert(offset + index, handler.clone());
        }
        self.anchors += fragment.anchor_count();
        self.markup.push_str(fragment.markup());
        self
    }

    pub fn build(self) -> Fragment {
        Fragment {
            markup: self.markup,
            handlers: self.handlers,
        }
    }
}
