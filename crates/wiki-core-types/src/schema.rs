//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_PANEL_ID: &str = "panel_id";
pub const FIELD_ITEM_ID: &str = "item_id";
pub const FIELD_ITEM_TYPE: &str = "item_type";
pub const FIELD_NODE: &str = "node";
pub const FIELD_DOMAIN: &str = "domain";

// Collection sizes
pub const FIELD_STORY_LEN: &str = "story_len";
pub const FIELD_LINEUP_LEN: &str = "lineup_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
