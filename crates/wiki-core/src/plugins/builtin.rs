use crate::capabilities::{Part, HTML, JSON, MARKDOWN};
use crate::errors::{Result, WikiError};
use crate::model::Item;
use crate::reactive::Value;
use crate::render::{linked, Fragment};

use super::{Plugin, Renderer};

pub const UNKNOWN_TYPE: &str = "unknown";
pub const PARAGRAPH_TYPE: &str = "paragraph";
pub const HTML_TYPE: &str = "html";
pub const MARKDOWN_TYPE: &str = "markdown";

fn arg<'a>(values: &'a [Value], position: usize, name: &str) -> Result<&'a Value> {
    values.get(position).ok_or_else(|| WikiError::CapabilityMismatch {
        expected: name.to_string(),
        found: "nothing".to_string(),
    })
}

/// Diagnostic rendering: the type tag and the whole item as JSON
pub(super) fn unknown() -> Plugin {
    Plugin::new(UNKNOWN_TYPE, &[HTML, JSON], |item: &Item| -> Renderer {
        let item = item.clone();
        Box::new(move |values: &[Value]| -> Result<Fragment> {
            let html = arg(values, 0, HTML)?.as_html()?;
            let json = arg(values, 1, JSON)?.as_json()?;
            let dump = json.stringify(&item)?;
            Ok(html.template(&[
                Part::Markup("<div class=\"item unknown\"><p><em>Unknown type:</em> "),
                Part::Text(&item.kind),
                Part::Markup("</p><pre class=\"inspector\">"),
                Part::Text(&dump),
                Part::Markup("</pre></div>"),
            ]))
        })
    })
}

pub(super) fn paragraph() -> Plugin {
    Plugin::new(PARAGRAPH_TYPE, &[HTML], |item: &Item| -> Renderer {
        let text = linked(&item.text);
        Box::new(move |values: &[Value]| -> Result<Fragment> {
            let html = arg(values, 0, HTML)?.as_html()?;
            Ok(html.template(&[
                Part::Markup("<p>"),
                Part::Markup(&text),
                Part::Markup("</p>"),
            ]))
        })
    })
}

/// Item text is trusted markup
pub(super) fn html() -> Plugin {
    Plugin::new(HTML_TYPE, &[HTML], |item: &Item| -> Renderer {
        let text = linked(&item.text);
        Box::new(move |values: &[Value]| -> Result<Fragment> {
            let html = arg(values, 0, HTML)?.as_html()?;
            Ok(html.markup(text.as_str()))
        })
    })
}

pub(super) fn markdown() -> Plugin {
    Plugin::new(MARKDOWN_TYPE, &[MARKDOWN], |item: &Item| -> Renderer {
        let text = linked(&item.text);
        Box::new(move |values: &[Value]| -> Result<Fragment> {
            let md = arg(values, 0, MARKDOWN)?.as_markdown()?;
            Ok(md.render(&text))
        })
    })
}
