//! Result reports for generation and transfer runs.
//!
//! Reports carry partial results together with every recoverable skip or
//! warning, so the caller decides whether partial success is acceptable.

use serde::{Deserialize, Serialize};

use crate::error::{SkipReason, WarningCode};

/// An animation spec (or batch entry) that was not generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSpec {
    /// Offending spec name (may be empty).
    pub name: String,
    /// Why it was skipped.
    pub reason: SkipReason,
    /// Extra detail, e.g. the offending frame range.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

impl SkippedSpec {
    pub fn new(name: impl Into<String>, reason: SkipReason, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for SkippedSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}': {}", self.name, self.reason)?;
        if !self.detail.is_empty() {
            write!(f, " ({})", self.detail)?;
        }
        Ok(())
    }
}

/// A clip written to the asset store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipOutput {
    /// Clip and state name.
    pub name: String,
    /// Unique asset path the clip was saved at.
    pub path: String,
    /// Keyframes after empty-frame filtering.
    pub keyframes: usize,
    /// Hex-encoded BLAKE3 hash of the serialized clip.
    pub hash: String,
}

/// A non-fatal issue raised while transferring between controllers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferWarning {
    pub code: WarningCode,
    pub message: String,
    /// Layer the issue was found in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
}

impl TransferWarning {
    pub fn new(code: WarningCode, layer: &str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            layer: Some(layer.to_string()),
        }
    }
}

impl std::fmt::Display for TransferWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.layer {
            Some(ref layer) => write!(f, "{}: [{}] {}", self.code, layer, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

/// Outcome of a controller-to-controller transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReport {
    pub parameters_copied: usize,
    /// State and any-state transitions added to the destination.
    pub transitions_copied: usize,
    /// Subset of `transitions_copied` that are any-state transitions.
    pub any_state_transitions_copied: usize,
    /// Placeholder states created in lenient mode.
    pub states_created: usize,
    /// Destination layers created because no same-named layer existed.
    pub layers_created: usize,
    pub warnings: Vec<TransferWarning>,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Number of clips created (one state each).
    pub created: usize,
    pub skipped: Vec<SkippedSpec>,
    pub clips: Vec<ClipOutput>,
    /// Controller the states were added to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_path: Option<String>,
    /// Template import, when a template controller was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TransferReport>,
}

impl GenerationReport {
    /// Records a skip.
    pub fn skip(&mut self, name: impl Into<String>, reason: SkipReason, detail: impl Into<String>) {
        self.skipped.push(SkippedSpec::new(name, reason, detail));
    }

    /// Folds another report's clips and skips into this one.
    pub fn merge(&mut self, other: GenerationReport) {
        self.created += other.created;
        self.skipped.extend(other.skipped);
        self.clips.extend(other.clips);
    }

    /// Returns true if nothing was skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
