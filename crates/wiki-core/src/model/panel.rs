use serde::{Deserialize, Serialize};

use super::page::Page;

/// Panel - a page wrapped with a display icon and identity
///
/// A fresh panel is created every time a page is shown, so two panels may
/// wrap equal pages under different ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub id: String,
    /// Icon reference shown in the panel header
    pub flag: String,
    pub page: Page,
}

impl Panel {
    pub fn new(id: impl Into<String>, flag: impl Into<String>, page: Page) -> Self {
        Self {
            id: id.into(),
            flag: flag.into(),
            page,
        }
    }

    pub fn title(&self) -> &str {
        &self.page.title
    }
}
