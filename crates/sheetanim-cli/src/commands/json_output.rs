//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json` and prints a single [`CommandOutput`]
//! document to stdout. Errors carry either a CLI-level code or the stable
//! code of the backend error that caused them.

use serde::{Deserialize, Serialize};
use sheetanim_spec::{
    BackendError, Controller, GenerationReport, Rect, TransferReport, ValidationError,
    ValidationWarning,
};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_002";
    /// Job failed validation
    pub const INVALID_JOB: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001", "SPRITE_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the JSON path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the JSON path for this warning.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// JSON output shared by every command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    /// Command-specific result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }

    /// Prints the output as pretty JSON to stdout.
    pub fn print(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

/// One grid cell in `slice` output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SliceFrame {
    pub name: String,
    pub rect: Rect,
    pub pivot: [f64; 2],
    /// Whether every pixel of the cell is fully transparent
    pub empty: bool,
}

/// Result of the `slice` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SliceResult {
    pub sheet: String,
    pub width: u32,
    pub height: u32,
    pub rows: u32,
    pub columns: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub frames: Vec<SliceFrame>,
}

/// Result of the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateResult {
    pub job: String,
    /// BLAKE3 hash of the job file
    pub source_hash: String,
}

/// Result of the `generate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResult {
    pub job: String,
    #[serde(flatten)]
    pub report: GenerationReport,
}

/// Result of the `transfer` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResult {
    pub source: String,
    pub destination: String,
    #[serde(flatten)]
    pub report: TransferReport,
}

/// Result of the `inspect` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectResult {
    pub path: String,
    pub layer_count: usize,
    pub state_count: usize,
    pub transition_count: usize,
    pub controller: Controller,
}

/// Converts a ValidationError to a JsonError.
pub fn validation_error_to_json(err: &ValidationError) -> JsonError {
    let mut error = JsonError::new(err.code.to_string(), &err.message);
    if let Some(ref path) = err.path {
        error = error.with_path(path);
    }
    error
}

/// Converts a ValidationWarning to a JsonWarning.
pub fn validation_warning_to_json(warn: &ValidationWarning) -> JsonWarning {
    let mut warning = JsonWarning::new(warn.code.to_string(), &warn.message);
    if let Some(ref path) = warn.path {
        warning = warning.with_path(path);
    }
    warning
}

/// Converts any backend error to a JsonError carrying its stable code.
pub fn backend_error_to_json<E: BackendError>(err: &E) -> JsonError {
    JsonError::new(err.code(), err.message())
}
