//! Error types for the controller backend.

use sheetanim_backend_sprite::SliceError;
use sheetanim_spec::{BackendError, GraphError};
use thiserror::Error;

/// Errors from an asset store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("unsafe asset path: {0}")]
    UnsafePath(String),

    #[error("IO error at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize '{path}': {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("refusing to save invalid clip '{path}': {reason}")]
    InvalidClip { path: String, reason: String },
}

impl BackendError for StoreError {
    fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "STORE_001",
            StoreError::UnsafePath(_) => "STORE_002",
            StoreError::Io { .. } => "STORE_003",
            StoreError::Serialize { .. } => "STORE_004",
            StoreError::Parse { .. } => "STORE_005",
            StoreError::InvalidClip { .. } => "STORE_006",
        }
    }

    fn category(&self) -> &'static str {
        "store"
    }
}

/// Fatal errors from building or transferring controllers.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A source, destination or template controller does not exist.
    #[error("controller not found: {0}")]
    MissingController(String),

    /// A multi-sheet batch with no entries.
    #[error("no animations to generate")]
    NoAnimations,

    /// The job failed validation.
    #[error("invalid job: {0}")]
    InvalidJob(String),

    #[error(transparent)]
    Slice(#[from] SliceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("failed to hash clip '{name}': {source}")]
    Hash {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BackendError for ControllerError {
    fn code(&self) -> &'static str {
        match self {
            ControllerError::MissingController(_) => "CONTROLLER_001",
            ControllerError::NoAnimations => "CONTROLLER_002",
            ControllerError::InvalidJob(_) => "CONTROLLER_003",
            ControllerError::Slice(e) => e.code(),
            ControllerError::Store(e) => e.code(),
            ControllerError::Graph(_) => "CONTROLLER_004",
            ControllerError::Hash { .. } => "CONTROLLER_005",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            ControllerError::Slice(e) => e.category(),
            ControllerError::Store(e) => e.category(),
            _ => "controller",
        }
    }
}
