//! Core types shared across the wiki facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Identifiers**: random panel and item identifiers
//! - **Schema constants**: Canonical field keys and event names

pub mod ids;
pub mod schema;

pub use ids::{random_id, random_u32};
