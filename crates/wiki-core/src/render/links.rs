use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::fragment::{Fragment, InternalLinkHandler};

static INTERNAL_LINK: OnceLock<Regex> = OnceLock::new();
static EXTERNAL_LINK: OnceLock<Regex> = OnceLock::new();
static SCHEME: OnceLock<Regex> = OnceLock::new();
static ANCHOR_OPEN: OnceLock<Regex> = OnceLock::new();
static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
static TARGET_ATTRIBUTE: OnceLock<Regex> = OnceLock::new();

fn internal_link() -> &'static Regex {
    INTERNAL_LINK.get_or_init(|| Regex::new(r"\[\[(.*?)\]\]").expect("Invalid internal link regex"))
}

fn external_link() -> &'static Regex {
    EXTERNAL_LINK
        .get_or_init(|| Regex::new(r"\[(https?:.*?) (.*?)\]").expect("Invalid external link regex"))
}

fn scheme() -> &'static Regex {
    SCHEME.get_or_init(|| Regex::new(r"^https?:").expect("Invalid scheme regex"))
}

/// Opening tag of an anchor element; group 1 holds the raw attributes
pub(crate) fn anchor_open_pattern() -> &'static Regex {
    ANCHOR_OPEN.get_or_init(|| {
        Regex::new(r#"(?is)<a\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#).expect("Invalid anchor regex")
    })
}

fn attribute() -> &'static Regex {
    ATTRIBUTE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
            .expect("Invalid attribute regex")
    })
}

fn target_attribute() -> &'static Regex {
    TARGET_ATTRIBUTE.get_or_init(|| {
        Regex::new(r#"(?i)\s+target\b(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'=<>`]+))?"#)
            .expect("Invalid target regex")
    })
}

/// Parse raw tag attributes into lowercase-name / value pairs
pub(crate) fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    attribute()
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| unescape_html(m.as_str()))
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

/// Escape text for interpolation into markup content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse [`escape_html`] on an attribute value
fn unescape_html(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Rewrite link markup in `text` into anchors
///
/// - `[[Title]]` becomes an anchor classed `internal` carrying the title as
///   `data-title` (attribute-escaped) and as its label (verbatim).
/// - `[URL Label]`, with URL starting `http:` or `https:`, becomes an anchor
///   whose `href` is the URL without its scheme.
///
/// Matches are non-overlapping and lazy; the text between brackets is copied
/// verbatim, so nested or stray brackets are not guaranteed to round-trip.
///
/// # Example
///
/// ```
/// use wiki_core::render::linked;
///
/// assert_eq!(
///     linked("[https://example.com/a Example]"),
///     r#"<a href="//example.com/a">Example</a>"#
/// );
/// ```
pub fn linked(text: &str) -> String {
    let internal = internal_link().replace_all(text, |caps: &Captures| {
        let title = &caps[1];
        format!(
            r##"<a class="internal" data-title="{}" href="#">{}</a>"##,
            escape_html(title),
            title
        )
    });
    external_link()
        .replace_all(&internal, |caps: &Captures| {
            let href = scheme().replace(&caps[1], "");
            format!(r#"<a href="{}">{}</a>"#, href, &caps[2])
        })
        .into_owned()
}

/// Post-render pass over a fragment's anchors
///
/// Internal anchors get an [`InternalLinkHandler`] built from their
/// `data-title`; every other anchor is marked `target="_blank"`. Handlers are
/// set rather than added and an existing `target` is replaced, so applying
/// the pass again leaves the fragment unchanged.
pub fn annotate_links(mut fragment: Fragment) -> Fragment {
    let mut handlers = Vec::new();
    let mut index = 0usize;
    let markup = anchor_open_pattern()
        .replace_all(fragment.markup(), |caps: &Captures| {
            let raw = caps.get(1).map_or("", |m| m.as_str());
            let attrs = parse_attributes(raw);
            let internal = attrs.iter().any(|(name, value)| {
                name == "class" && value.split_whitespace().any(|c| c == "internal")
            });
            let current = index;
            index += 1;

            if internal {
                let title = attrs
                    .iter()
                    .find(|(name, _)| name == "data-title")
                    .map(|(_, value)| value.clone())
                    .unwrap_or_default();
                handlers.push((current, InternalLinkHandler::new(title)));
                caps[0].to_string()
            } else {
                let stripped = target_attribute().replace_all(raw, "");
                let stripped = stripped.trim_end();
                format!(r#"<a{} target="_blank">"#, stripped)
            }
        })
        .into_owned();

    fragment.set_markup(markup);
    for (i, handler) in handlers {
        fragment.set_handler(i, handler);
    }
    fragment
}
