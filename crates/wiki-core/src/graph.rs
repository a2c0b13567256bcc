//! Panel graph builder
//!
//! Turns a panel into a reactive module:
//!
//! - `title` - the page title, no inputs
//! - `item{id}` - one node per story item, reading its plugin's capabilities
//! - `panel` - the article wrapping the title and every item node, observed
//!
//! Items whose renderer fails still produce a fragment, a short error notice
//! in place of the item, so one bad item never blanks the panel.

use crate::capabilities::{Part, HTML};
use crate::errors::{Result, WikiError};
use crate::model::{Item, Panel};
use crate::plugins::PluginRegistry;
use crate::reactive::{ModuleId, Observer, Runtime, Value};
use crate::render::{annotate_links, escape_html, Fragment};
use crate::{log_op_end, log_op_error, log_op_start};

pub const TITLE_NODE: &str = "title";
pub const PANEL_NODE: &str = "panel";

/// Node name for a story item
pub fn item_node_name(item: &Item) -> String {
    format!("item{}", item.id)
}

/// Build the reactive module for `panel` and attach `observer` to its
/// `panel` node
///
/// Nothing is evaluated here; call [`Runtime::compute`] to settle the graph.
///
/// # Errors
///
/// Returns an error only if the freshly created module cannot be found,
/// which indicates a runtime bug.
pub fn build_panel_graph(
    runtime: &mut Runtime,
    registry: &PluginRegistry,
    panel: &Panel,
    observer: Box<dyn Observer>,
) -> Result<ModuleId> {
    log_op_start!(
        "build_panel_graph",
        panel_id = %panel.id,
        story_len = panel.page.story.len()
    );
    let start = std::time::Instant::now();

    let result = build_panel_graph_impl(runtime, registry, panel, observer).map_err(|e| {
        log_op_error!(
            "build_panel_graph",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "build_panel_graph",
        duration_ms = start.elapsed().as_millis() as u64,
        panel_id = %panel.id
    );
    Ok(result)
}

fn build_panel_graph_impl(
    runtime: &mut Runtime,
    registry: &PluginRegistry,
    panel: &Panel,
    observer: Box<dyn Observer>,
) -> Result<ModuleId> {
    let id = runtime.module();
    let module = runtime.module_mut(id)?;

    let title = Value::Text(panel.page.title.clone());
    module.constant(TITLE_NODE, title);

    for item in &panel.page.story {
        let plugin = registry.lookup(&item.kind);
        if plugin.kind() != item.kind {
            tracing::debug!(item_id = %item.id, item_type = %item.kind, "no plugin for type, using fallback");
        }

        let name = item_node_name(item);
        let renderer = plugin.renderer(item);
        let node = name.clone();
        module.define(name, plugin.deps().to_vec(), move |values| {
            let fragment = renderer(values).unwrap_or_else(|err| render_failure(&node, &err));
            Ok(Value::Fragment(annotate_links(fragment)))
        });
    }

    let mut inputs = vec![HTML.to_string(), TITLE_NODE.to_string()];
    inputs.extend(panel.page.story.iter().map(item_node_name));
    let panel_id = panel.id.clone();
    let flag = panel.flag.clone();
    module.define(PANEL_NODE, inputs, move |values| {
        compose_panel(&panel_id, &flag, values)
    });
    module.observe(PANEL_NODE, observer)?;

    Ok(id)
}

fn render_failure(node: &str, err: &WikiError) -> Fragment {
    tracing::warn!(node = %node, error = %err, "item render failed");
    Fragment::new(format!(
        "<div class=\"item error\"><p><em>Render failed:</em> {}</p></div>",
        escape_html(&err.to_string())
    ))
}

fn compose_panel(panel_id: &str, flag: &str, values: &[Value]) -> Result<Value> {
    let (html, rest) = values.split_first().ok_or_else(|| WikiError::Internal {
        message: "panel node evaluated without inputs".to_string(),
    })?;
    let html = html.as_html()?;
    let (title, items) = rest.split_first().ok_or_else(|| WikiError::Internal {
        message: "panel node evaluated without a title".to_string(),
    })?;
    let title = title.as_text()?;
    let items = items
        .iter()
        .map(Value::as_fragment)
        .collect::<Result<Vec<_>>>()?;

    let mut parts = vec![
        Part::Markup("<article id=\"panel"),
        Part::Text(panel_id),
        Part::Markup("\">\n<div class=twins></div>\n<header><h1><img src=\""),
        Part::Text(flag),
        Part::Markup("\"> "),
        Part::Text(title),
        Part::Markup("</h1></header>\n"),
    ];
    for item in items {
        parts.push(Part::Fragment(item));
        parts.push(Part::Markup("\n"));
    }
    parts.push(Part::Markup("<footer></footer>\n</article>"));

    Ok(Value::Fragment(html.template(&parts)))
}
