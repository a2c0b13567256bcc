//! Plugin registry - maps item types to renderers
//!
//! A plugin declares the capabilities its renderer needs and, given an item,
//! produces a [`Renderer`] that turns those capability values into a
//! fragment. Lookup is a first-match scan; an item whose type no plugin
//! claims is rendered by the single `unknown` plugin.

mod builtin;

use std::fmt;
use std::sync::Arc;

use crate::errors::{Result, WikiError};
use crate::model::Item;
use crate::reactive::Value;
use crate::render::Fragment;

pub use builtin::{HTML_TYPE, MARKDOWN_TYPE, PARAGRAPH_TYPE, UNKNOWN_TYPE};

/// Renders one item from its resolved capabilities, in declared order
pub type Renderer = Box<dyn Fn(&[Value]) -> Result<Fragment> + Send + Sync>;

/// Builds the renderer for an item
pub type RenderFn = Arc<dyn Fn(&Item) -> Renderer + Send + Sync>;

#[derive(Clone)]
pub struct Plugin {
    kind: String,
    deps: Vec<String>,
    render: RenderFn,
}

impl Plugin {
    pub fn new<F>(kind: impl Into<String>, deps: &[&str], render: F) -> Self
    where
        F: Fn(&Item) -> Renderer + Send + Sync + 'static,
    {
        Self {
            kind: kind.into(),
            deps: deps.iter().map(|d| d.to_string()).collect(),
            render: Arc::new(render),
        }
    }

    /// Item type this plugin claims
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Capability names the renderer reads
    pub fn deps(&self) -> &[String] {
        &self.deps
    }

    pub fn renderer(&self, item: &Item) -> Renderer {
        (self.render)(item)
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("kind", &self.kind)
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

/// Ordered list of plugins; the first plugin claiming a type wins
#[derive(Debug, Clone)]
pub struct PluginRegistry {
    plugins: Vec<Plugin>,
}

impl PluginRegistry {
    /// Registry holding only the `unknown` fallback
    pub fn new() -> Self {
        Self {
            plugins: vec![builtin::unknown()],
        }
    }

    /// Registry with the fallback plus `paragraph`, `html` and `markdown`
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry
            .plugins
            .extend([builtin::paragraph(), builtin::html(), builtin::markdown()]);
        registry
    }

    /// Append a plugin
    ///
    /// A plugin for a type that is already claimed is kept but never found
    /// by [`lookup`](Self::lookup).
    ///
    /// # Errors
    ///
    /// Returns `WikiError::DuplicatePlugin` for a second `unknown` plugin.
    pub fn register(&mut self, plugin: Plugin) -> Result<()> {
        if plugin.kind == UNKNOWN_TYPE {
            return Err(WikiError::DuplicatePlugin { kind: plugin.kind });
        }
        if self.plugins.iter().any(|p| p.kind == plugin.kind) {
            tracing::warn!(kind = %plugin.kind, "plugin shadowed by an earlier registration");
        }
        self.plugins.push(plugin);
        Ok(())
    }

    /// Plugin for `kind`, or the `unknown` fallback
    pub fn lookup(&self, kind: &str) -> &Plugin {
        self.plugins
            .iter()
            .find(|p| p.kind == kind)
            .unwrap_or_else(|| self.fallback())
    }

    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    fn fallback(&self) -> &Plugin {
        // The fallback is installed by the constructor and can never be removed
        &self.plugins[0]
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
