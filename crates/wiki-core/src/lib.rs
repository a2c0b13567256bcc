//! Wiki Core - reactive composition of wiki pages into rendered panels
//!
//! This crate provides:
//! - Page, item, journal and site map models
//! - Link markup rewriting and post-render link annotation
//! - A plugin registry mapping item types to renderers
//! - A reactive runtime of named nodes with incremental recomputation
//! - The panel graph builder and the lineup controller that drives it
//! - Ghost page synthesis and remote site map / page fetching

pub mod capabilities;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod ghost;
pub mod graph;
pub mod lineup;
pub mod logging_facility;
pub mod model;
pub mod plugins;
pub mod reactive;
pub mod render;
pub mod surface;

// Re-export commonly used types
pub use config::WikiConfig;
pub use errors::{ExError, ExErrorKind, Result, WikiError};
pub use fetch::{FetchFailure, Fetcher};
pub use ghost::{demo_lineup, ghost};
pub use graph::build_panel_graph;
pub use lineup::{find_page, Lineup, PanelState, Wiki};
pub use model::{Item, Page, PageDescriptor, Panel, Sitemap};
pub use plugins::{Plugin, PluginRegistry};
pub use reactive::{Runtime, Value};
pub use render::{annotate_links, linked, Fragment};
