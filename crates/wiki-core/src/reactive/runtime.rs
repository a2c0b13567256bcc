use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use futures::future::join_all;

use crate::capabilities::{CapabilityProvider, StandardLibrary};
use crate::config::MarkdownConfig;
use crate::errors::{Result, WikiError};
use crate::{log_op_end, log_op_start};

use super::module::{Builtins, ComputeReport, Module, ModuleId};

/// Runtime - owns modules and the builtins they read
pub struct Runtime {
    library: Arc<dyn CapabilityProvider>,
    modules: Vec<Module>,
    builtins: Builtins,
}

impl Runtime {
    pub fn new(library: Arc<dyn CapabilityProvider>) -> Self {
        Self {
            library,
            modules: Vec::new(),
            builtins: HashMap::new(),
        }
    }

    /// Runtime backed by [`StandardLibrary`]
    pub fn with_standard_library(markdown: MarkdownConfig) -> Self {
        Self::new(Arc::new(StandardLibrary::new(markdown)))
    }

    /// Create an empty module
    pub fn module(&mut self) -> ModuleId {
        let id = ModuleId(self.modules.len());
        self.modules.push(Module::new(id));
        id
    }

    /// # Errors
    ///
    /// Returns `WikiError::ModuleNotFound` for a handle from another runtime.
    pub fn module_ref(&self, id: ModuleId) -> Result<&Module> {
        self.modules
            .get(id.0)
            .ok_or(WikiError::ModuleNotFound { module: id.0 })
    }

    /// # Errors
    ///
    /// Returns `WikiError::ModuleNotFound` for a handle from another runtime.
    pub fn module_mut(&mut self, id: ModuleId) -> Result<&mut Module> {
        self.modules
            .get_mut(id.0)
            .ok_or(WikiError::ModuleNotFound { module: id.0 })
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn is_stale(&self) -> bool {
        self.modules.iter().any(Module::is_stale)
    }

    /// Settle every stale node in every module
    ///
    /// Builtins that stale nodes read are resolved first, concurrently, and
    /// cached for the lifetime of the runtime. Node failures are recorded as
    /// rejected states, never returned.
    pub async fn compute(&mut self) -> ComputeReport {
        log_op_start!("compute", modules = self.modules.len());
        let start = std::time::Instant::now();

        let wanted: BTreeSet<String> = self
            .modules
            .iter()
            .flat_map(Module::external_inputs)
            .filter(|name| !self.builtins.contains_key(name))
            .collect();

        let library = Arc::clone(&self.library);
        let resolved = join_all(wanted.into_iter().map(|name| {
            let library = Arc::clone(&library);
            async move {
                let value = library.resolve(&name).await;
                (name, value)
            }
        }))
        .await;
        for (name, value) in resolved {
            if value.is_none() {
                tracing::debug!(builtin = %name, "no provider for builtin");
            }
            self.builtins.insert(name, value);
        }

        let mut report = ComputeReport::default();
        for module in &mut self.modules {
            report.merge(module.settle(&self.builtins));
        }

        log_op_end!(
            "compute",
            duration_ms = start.elapsed().as_millis() as u64,
            evaluated = report.evaluated,
            rejected = report.rejected
        );
        report
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("modules", &self.modules)
            .field("builtins", &self.builtins.keys().collect::<Vec<_>>())
            .finish()
    }
}
