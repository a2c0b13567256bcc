//! Surface - named mount points that collect rendered panels
//!
//! Each observer handed out by [`Surface::mount`] owns one slot at that
//! mount point; slots keep the order in which they were claimed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::errors::WikiError;
use crate::reactive::{Observer, Value};
use crate::render::{escape_html, Fragment};

#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Claimed, nothing settled yet
    Pending,
    Rendered(Fragment),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct Surface {
    mounts: Arc<Mutex<HashMap<String, Vec<Slot>>>>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next slot at `mount` and return the observer that fills it
    pub fn mount(&self, mount: &str) -> MountObserver {
        let slot = {
            let mut mounts = self.lock();
            let slots = mounts.entry(mount.to_string()).or_default();
            slots.push(Slot::Pending);
            slots.len() - 1
        };
        MountObserver {
            surface: self.clone(),
            mount: mount.to_string(),
            slot,
        }
    }

    pub fn slots(&self, mount: &str) -> Vec<Slot> {
        self.lock().get(mount).cloned().unwrap_or_default()
    }

    /// Rendered fragments at `mount`, skipping pending and failed slots
    pub fn fragments(&self, mount: &str) -> Vec<Fragment> {
        self.slots(mount)
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Rendered(fragment) => Some(fragment),
                _ => None,
            })
            .collect()
    }

    /// Markup of every settled slot at `mount`, one per line
    pub fn render(&self, mount: &str) -> String {
        self.slots(mount)
            .iter()
            .filter_map(|slot| match slot {
                Slot::Pending => None,
                Slot::Rendered(fragment) => Some(fragment.markup().to_string()),
                Slot::Failed(message) => Some(format!(
                    "<div class=\"error\">{}</div>",
                    escape_html(message)
                )),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn set(&self, mount: &str, index: usize, slot: Slot) {
        if let Some(target) = self
            .lock()
            .get_mut(mount)
            .and_then(|slots| slots.get_mut(index))
        {
            *target = slot;
        }
    }

    /// Slot updates are single assignments, so state behind a poisoned lock
    /// is still consistent
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Slot>>> {
        self.mounts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Observer that writes a node's settled value into one surface slot
#[derive(Debug)]
pub struct MountObserver {
    surface: Surface,
    mount: String,
    slot: usize,
}

impl MountObserver {
    pub fn slot(&self) -> usize {
        self.slot
    }
}

impl Observer for MountObserver {
    fn fulfilled(&mut self, _name: &str, value: &Value) {
        self.surface
            .set(&self.mount, self.slot, Slot::Rendered(value.to_fragment()));
    }

    fn rejected(&mut self, name: &str, error: &WikiError) {
        tracing::warn!(node = %name, error = %error, "observed node rejected");
        self.surface
            .set(&self.mount, self.slot, Slot::Failed(error.to_string()));
    }
}
