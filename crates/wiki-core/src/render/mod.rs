//! Markup production: link annotation and rendered fragments

pub mod fragment;
pub mod links;

pub use fragment::{Anchor, Fragment, FragmentBuilder, InternalLinkHandler, Navigation};
pub use links::{annotate_links, escape_html, linked};
