//! Lineup - the ordered panels on screen, and the controller that drives them
//!
//! Every panel moves through `Constructed -> GraphBuilt -> Rendered`. A panel
//! is rendered once its `panel` node has settled fulfilled; later edits keep
//! it rendered as the runtime recomputes it.

use std::sync::Arc;

use crate::capabilities::{CapabilityProvider, StandardLibrary};
use crate::config::WikiConfig;
use crate::errors::{Result, WikiError};
use crate::graph::{build_panel_graph, PANEL_NODE};
use crate::model::{PageDescriptor, Panel, Sitemap};
use crate::plugins::PluginRegistry;
use crate::reactive::{ComputeReport, ModuleId, Runtime};
use crate::surface::Surface;
use crate::{log_op_end, log_op_error, log_op_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Constructed,
    GraphBuilt,
    Rendered,
}

#[derive(Debug, Clone)]
pub struct LineupEntry {
    panel: Panel,
    state: PanelState,
    module: Option<ModuleId>,
}

impl LineupEntry {
    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn module(&self) -> Option<ModuleId> {
        self.module
    }
}

/// Ordered sequence of panels, append-only
#[derive(Debug, Clone, Default)]
pub struct Lineup {
    entries: Vec<LineupEntry>,
}

impl Lineup {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, panel: Panel) -> usize {
        self.entries.push(LineupEntry {
            panel,
            state: PanelState::Constructed,
            module: None,
        });
        self.entries.len() - 1
    }

    pub fn entries(&self) -> &[LineupEntry] {
        &self.entries
    }

    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.entries.iter().map(|e| &e.panel)
    }

    pub fn get(&self, panel_id: &str) -> Option<&LineupEntry> {
        self.entries.iter().find(|e| e.panel.id == panel_id)
    }

    /// # Errors
    ///
    /// Returns `WikiError::PanelNotFound` if no panel has this id.
    pub fn state(&self, panel_id: &str) -> Result<PanelState> {
        self.get(panel_id)
            .map(LineupEntry::state)
            .ok_or_else(|| WikiError::PanelNotFound {
                panel_id: panel_id.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Wiki - lineup, plugins, runtime and surface wired together
#[derive(Debug)]
pub struct Wiki {
    config: WikiConfig,
    registry: PluginRegistry,
    runtime: Runtime,
    surface: Surface,
    lineup: Lineup,
}

impl Wiki {
    /// Controller with the standard plugins and capability library
    pub fn new(config: WikiConfig) -> Self {
        let library = Arc::new(StandardLibrary::new(config.markdown));
        Self::with_parts(config, PluginRegistry::standard(), library)
    }

    pub fn with_parts(
        config: WikiConfig,
        registry: PluginRegistry,
        library: Arc<dyn CapabilityProvider>,
    ) -> Self {
        Self {
            config,
            registry,
            runtime: Runtime::new(library),
            surface: Surface::new(),
            lineup: Lineup::new(),
        }
    }

    /// Append a panel to the lineup and build its graph
    ///
    /// The panel's `panel` node is observed into the configured mount point.
    /// Call [`render`](Self::render) to evaluate it.
    ///
    /// # Errors
    ///
    /// Returns `WikiError::ReplaceNotImplemented` when `replace_id` is given;
    /// the lineup is left unchanged.
    pub fn add_panel(&mut self, panel: Panel, replace_id: Option<&str>) -> Result<ModuleId> {
        log_op_start!("add_panel", panel_id = %panel.id, lineup_len = self.lineup.len());
        let start = std::time::Instant::now();

        let result = self.add_panel_impl(panel, replace_id).map_err(|e| {
            log_op_error!(
                "add_panel",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "add_panel",
            duration_ms = start.elapsed().as_millis() as u64,
            lineup_len = self.lineup.len()
        );
        Ok(result)
    }

    fn add_panel_impl(&mut self, panel: Panel, replace_id: Option<&str>) -> Result<ModuleId> {
        if let Some(replace_id) = replace_id {
            return Err(WikiError::ReplaceNotImplemented {
                replace_id: replace_id.to_string(),
            });
        }

        let index = self.lineup.push(panel);
        let observer = Box::new(self.surface.mount(&self.config.mount));
        let entry = &mut self.lineup.entries[index];
        let module = build_panel_graph(&mut self.runtime, &self.registry, &entry.panel, observer)?;
        entry.module = Some(module);
        entry.state = PanelState::GraphBuilt;
        Ok(module)
    }

    /// Settle every stale node and mark panels whose `panel` node is
    /// fulfilled as rendered
    pub async fn render(&mut self) -> ComputeReport {
        let report = self.runtime.compute().await;
        for entry in &mut self.lineup.entries {
            let Some(module) = entry.module else {
                continue;
            };
            let fulfilled = self
                .runtime
                .module_ref(module)
                .ok()
                .and_then(|m| m.value(PANEL_NODE))
                .is_some();
            if fulfilled {
                entry.state = PanelState::Rendered;
            }
        }
        report
    }

    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PluginRegistry {
        &mut self.registry
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Direct access to the runtime, e.g. to redefine a node
    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    /// Markup currently shown at the configured mount point
    pub fn markup(&self) -> String {
        self.surface.render(&self.config.mount)
    }
}

/// Find a page by title across site maps
///
/// Titles compare case-insensitively; contexts are searched in order and
/// entries in document order, and the first match wins. `None` when nothing
/// matches.
pub fn find_page<'a>(title: &str, context: &'a [Sitemap]) -> Option<&'a PageDescriptor> {
    let wanted = title.to_lowercase();
    let found = context
        .iter()
        .flat_map(Sitemap::descriptors)
        .find(|d| d.title.to_lowercase() == wanted);
    tracing::debug!(title = %title, sitemaps = context.len(), found = found.is_some(), "find_page");
    found
}
