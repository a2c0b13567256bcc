//! Reactive runtime - named nodes recomputed when their inputs change
//!
//! A [`Runtime`] owns any number of [`Module`]s. Each module holds a set of
//! named nodes; a node declares the names of its inputs and a definition that
//! maps input values to its own value. Inputs not defined in the module are
//! resolved as builtins through the runtime's
//! [`CapabilityProvider`](crate::capabilities::CapabilityProvider).
//!
//! Evaluation is incremental: defining or redefining a node marks it and
//! everything downstream stale, and [`Runtime::compute`] settles only stale
//! nodes, in dependency order. Observers attached to nodes are told when a
//! node settles.
//!
//! Failure never escapes as a panic or an `Err` from `compute`; it becomes
//! the node's rejected state and flows to dependents:
//!
//! - a name defined more than once rejects every node with that name
//! - an input that is neither a node nor a builtin rejects the node
//! - nodes on or behind a dependency cycle are rejected

mod module;
mod observer;
mod runtime;
mod value;

pub use module::{ComputeReport, Definition, Module, ModuleId, NodeState};
pub use observer::{NullObserver, Observer};
pub use runtime::Runtime;
pub use value::Value;
