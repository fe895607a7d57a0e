//! Error, warning and skip-reason types shared by all sheetanim crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for generation job validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Grid rows or columns is zero
    InvalidGrid,
    /// E002: Pivot outside the unit square
    InvalidPivot,
    /// E003: Sheet path is empty
    MissingSheet,
    /// E004: Multi-sheet batch has no entries
    NoAnimations,
    /// E005: Controller name or path is empty
    InvalidControllerTarget,
    /// E006: Template path is empty
    InvalidTemplate,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidGrid => "E001",
            ErrorCode::InvalidPivot => "E002",
            ErrorCode::MissingSheet => "E003",
            ErrorCode::NoAnimations => "E004",
            ErrorCode::InvalidControllerTarget => "E005",
            ErrorCode::InvalidTemplate => "E006",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes emitted by job validation and controller transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// W001: Source state has no same-named destination state
    MissingState,
    /// W002: Transition target has no same-named destination state
    MissingTargetState,
    /// W003: Source default state has no same-named destination state
    MissingDefaultState,
    /// W004: More automatic animation names than sheet rows
    ExtraAnimationNames,
    /// W005: Single-sheet job defines no animations
    EmptyAnimationList,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::MissingState => "W001",
            WarningCode::MissingTargetState => "W002",
            WarningCode::MissingDefaultState => "W003",
            WarningCode::ExtraAnimationNames => "W004",
            WarningCode::EmptyAnimationList => "W005",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Why a single animation spec (or batch entry) was skipped.
///
/// Skips are recoverable: the batch continues and the reason is reported
/// alongside the partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Name is empty or whitespace.
    InvalidName,
    /// Start frame is before the first frame.
    RangeOutOfBounds,
    /// End frame precedes start frame.
    RangeOutOfOrder,
    /// End frame is past the last available frame.
    RangeExceedsFrameCount,
    /// Name already used in this batch or already a state in the target layer.
    DuplicateName,
    /// Nothing left after dropping empty frames.
    EmptyClip,
    /// Multi-sheet entry whose sheet could not be loaded.
    SheetUnavailable,
    /// Multi-sheet entry whose slice produced an unexpected sprite count.
    SliceMismatch,
}

impl SkipReason {
    /// Returns the stable skip code (e.g., "S001").
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::InvalidName => "S001",
            SkipReason::RangeOutOfBounds => "S002",
            SkipReason::RangeOutOfOrder => "S003",
            SkipReason::RangeExceedsFrameCount => "S004",
            SkipReason::DuplicateName => "S005",
            SkipReason::EmptyClip => "S006",
            SkipReason::SheetUnavailable => "S007",
            SkipReason::SliceMismatch => "S008",
        }
    }

    /// Returns the human-readable reason string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::InvalidName => "invalid name",
            SkipReason::RangeOutOfBounds => "range out of bounds",
            SkipReason::RangeOutOfOrder => "range out of order",
            SkipReason::RangeExceedsFrameCount => "range exceeds frame count",
            SkipReason::DuplicateName => "duplicate name",
            SkipReason::EmptyClip => "empty clip",
            SkipReason::SheetUnavailable => "sheet unavailable",
            SkipReason::SliceMismatch => "slice mismatch",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "sheets.entries\[0\].rows").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for spec operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Job validation failed with one or more errors.
    #[error("job validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the controller graph mutation API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A state with this name already exists in the state machine.
    #[error("state '{0}' already exists")]
    DuplicateState(String),

    /// No state with this name exists in the state machine.
    #[error("state '{0}' not found")]
    UnknownState(String),

    /// A layer with this name already exists in the controller.
    #[error("layer '{0}' already exists")]
    DuplicateLayer(String),

    /// The controller has no layers.
    #[error("controller has no layers")]
    NoLayers,
}

/// Result of job validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for backend errors.
///
/// Each backend error type implements this trait so callers can report a
/// stable code and category without depending on every backend crate.
///
/// # Example
///
/// ```ignore
/// use sheetanim_spec::error::BackendError;
///
/// fn handle_error<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "SPRITE_001" or "CONTROLLER_002".
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    ///
    /// Returns a category like "sprite" or "controller".
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::InvalidGrid.code(), "E001");
        assert_eq!(ErrorCode::InvalidTemplate.code(), "E006");
        assert_eq!(WarningCode::MissingTargetState.code(), "W002");
    }

    #[test]
    fn test_skip_reason_strings() {
        assert_eq!(SkipReason::InvalidName.to_string(), "invalid name");
        assert_eq!(SkipReason::RangeOutOfOrder.as_str(), "range out of order");
        assert_eq!(SkipReason::EmptyClip.code(), "S006");
    }

    #[test]
    fn test_validation_error_display_with_path() {
        let err = ValidationError::with_path(ErrorCode::InvalidGrid, "rows must be >= 1", "sheets.rows");
        assert_eq!(err.to_string(), "E001: rows must be >= 1 (at sheets.rows)");
    }

    #[test]
    fn test_validation_result_into_result() {
        let mut result = ValidationResult::success();
        result.add_warning(ValidationWarning::new(WarningCode::EmptyAnimationList, "nothing"));
        assert!(result.is_ok());
        assert_eq!(result.clone().into_result().unwrap().len(), 1);

        result.add_error(ValidationError::new(ErrorCode::MissingSheet, "no sheet"));
        assert!(!result.is_ok());
        assert_eq!(result.into_result().unwrap_err().len(), 1);
    }
}
