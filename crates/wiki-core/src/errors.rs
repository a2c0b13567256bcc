use thiserror::Error;

/// Result type alias using WikiError
pub type Result<T> = std::result::Result<T, WikiError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised by the wiki engine. Each kind maps to a stable error code that can be
/// used for programmatic error handling, testing, and diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidItem,
    NotFound,

    // Reactive graph
    DuplicateDefinition,
    UnresolvedInput,
    CycleDetected,

    // Rendering
    Render,

    // Integration/IO
    /// Remote fetch failed: network rejection, non-success status or malformed document
    ExternalService,
    Serialization,
    Configuration,

    /// A valid transition that is not yet implemented in this build
    NotImplemented,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidItem => "ERR_INVALID_ITEM",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::DuplicateDefinition => "ERR_DUPLICATE_DEFINITION",
            ExErrorKind::UnresolvedInput => "ERR_UNRESOLVED_INPUT",
            ExErrorKind::CycleDetected => "ERR_CYCLE_DETECTED",
            ExErrorKind::Render => "ERR_RENDER",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::NotImplemented => "ERR_NOT_IMPLEMENTED",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    node: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            node: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (panel id, item id, replace target)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add reactive node context
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the reactive node context, if any
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(node) = &self.node {
            write!(f, " (node: {})", node)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for wiki engine operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WikiError {
    // ===== Structural Errors =====
    /// A story item could not be constructed from its seed
    #[error("Invalid item: {reason}")]
    InvalidItem { reason: String },

    /// Reactive node not found in its module
    #[error("Node not found: {node}")]
    NodeNotFound { node: String },

    /// Module handle does not belong to this runtime
    #[error("Module not found: {module}")]
    ModuleNotFound { module: usize },

    /// Panel not present in the lineup
    #[error("Panel not found: {panel_id}")]
    PanelNotFound { panel_id: String },

    // ===== Reactive Graph Errors =====
    /// Node name defined more than once within one module
    #[error("{node} is defined more than once")]
    DuplicateDefinition { node: String },

    /// A node input is neither a module node nor a library capability
    #[error("{input} is not defined (required by {node})")]
    UnresolvedInput { node: String, input: String },

    /// Node participates in a dependency cycle
    #[error("Circular definition involving {node}")]
    CycleDetected { node: String },

    // ===== Render Errors =====
    /// A renderer received capability values it cannot use
    #[error("Capability mismatch: expected {expected}, found {found}")]
    CapabilityMismatch { expected: String, found: String },

    /// A node definition failed while producing its value
    #[error("Render failed for {node}: {reason}")]
    RenderFailed { node: String, reason: String },

    /// A second fallback renderer was registered
    #[error("Plugin for type {kind} is already registered")]
    DuplicatePlugin { kind: String },

    // ===== Integration Errors =====
    /// Remote fetch failed (network, status, or malformed document)
    #[error("Fetch of {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Serialization failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    // ===== Unimplemented Transitions =====
    /// Replacing a panel in place is not supported yet
    #[error("Replacing panel {replace_id} in place is not implemented")]
    ReplaceNotImplemented { replace_id: String },

    /// Internal error (should never happen)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<WikiError> for ExError {
    fn from(err: WikiError) -> Self {
        match err {
            WikiError::InvalidItem { reason } => ExError::new(ExErrorKind::InvalidItem)
                .with_message(format!("Invalid item: {}", reason)),

            WikiError::NodeNotFound { node } => ExError::new(ExErrorKind::NotFound)
                .with_node(node)
                .with_message("Node not found"),

            WikiError::ModuleNotFound { module } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(module.to_string())
                .with_message("Module not found"),

            WikiError::PanelNotFound { panel_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(panel_id)
                .with_message("Panel not found in lineup"),

            WikiError::DuplicateDefinition { node } => {
                ExError::new(ExErrorKind::DuplicateDefinition)
                    .with_node(node)
                    .with_message("Node is defined more than once")
            }

            WikiError::UnresolvedInput { node, input } => {
                ExError::new(ExErrorKind::UnresolvedInput)
                    .with_node(node)
                    .with_message(format!("Input {} is not defined", input))
            }

            WikiError::CycleDetected { node } => ExError::new(ExErrorKind::CycleDetected)
                .with_node(node)
                .with_message("Circular definition"),

            WikiError::CapabilityMismatch { expected, found } => {
                ExError::new(ExErrorKind::Render)
                    .with_message(format!("Expected {} capability, found {}", expected, found))
            }

            WikiError::RenderFailed { node, reason } => ExError::new(ExErrorKind::Render)
                .with_node(node)
                .with_message(reason),

            WikiError::DuplicatePlugin { kind } => {
                ExError::new(ExErrorKind::DuplicateDefinition)
                    .with_entity_id(kind)
                    .with_message("Plugin type is already registered")
            }

            WikiError::Fetch { url, reason } => ExError::new(ExErrorKind::ExternalService)
                .with_entity_id(url)
                .with_message(reason),

            WikiError::Configuration { message } => {
                ExError::new(ExErrorKind::Configuration).with_message(message)
            }

            WikiError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            WikiError::ReplaceNotImplemented { replace_id } => {
                ExError::new(ExErrorKind::NotImplemented)
                    .with_op("add_panel")
                    .with_entity_id(replace_id)
                    .with_message("Replacing a panel in place is not implemented")
            }

            WikiError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to WikiError
impl From<serde_json::Error> for WikiError {
    fn from(err: serde_json::Error) -> Self {
        WikiError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from reqwest::Error to WikiError
impl From<reqwest::Error> for WikiError {
    fn from(err: reqwest::Error) -> Self {
        WikiError::Fetch {
            url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            reason: err.to_string(),
        }
    }
}

/// Conversion from config::ConfigError to WikiError
impl From<config::ConfigError> for WikiError {
    fn from(err: config::ConfigError) -> Self {
        WikiError::Configuration {
            message: err.to_string(),
        }
    }
}
