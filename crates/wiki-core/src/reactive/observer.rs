use crate::errors::WikiError;

use super::value::Value;

/// Receives settlement notifications for one node
pub trait Observer: Send {
    /// The node is about to be recomputed
    fn pending(&mut self, _name: &str) {}

    fn fulfilled(&mut self, name: &str, value: &Value);

    fn rejected(&mut self, name: &str, error: &WikiError);
}

/// Observer that discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn fulfilled(&mut self, _name: &str, _value: &Value) {}

    fn rejected(&mut self, _name: &str, _error: &WikiError) {}
}
