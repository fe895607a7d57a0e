//! Transitions and their conditions.

use serde::{Deserialize, Serialize};

/// Comparison applied by a transition condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionMode {
    /// Bool/trigger parameter is set.
    If,
    /// Bool parameter is not set.
    IfNot,
    /// Numeric parameter greater than the threshold.
    Greater,
    /// Numeric parameter less than the threshold.
    Less,
    /// Int parameter equal to the threshold.
    Equals,
    /// Int parameter not equal to the threshold.
    NotEqual,
}

/// A single transition condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Parameter name.
    pub parameter: String,
    /// Comparator.
    pub mode: ConditionMode,
    /// Threshold (ignored by `if`/`if_not`).
    #[serde(default)]
    pub threshold: f32,
}

impl Condition {
    /// Creates a new condition.
    pub fn new(parameter: impl Into<String>, mode: ConditionMode, threshold: f32) -> Self {
        Self {
            parameter: parameter.into(),
            mode,
            threshold,
        }
    }
}

/// Which transitions may interrupt this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptionSource {
    #[default]
    None,
    Source,
    Destination,
    SourceThenDestination,
    DestinationThenSource,
}

/// A directed edge of a state machine.
///
/// The source state is implicit: state transitions live on their source
/// state, any-state transitions on the state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Target state name; `None` for exit transitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_state: Option<String>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub has_exit_time: bool,
    #[serde(default = "default_exit_time")]
    pub exit_time: f32,
    #[serde(default = "default_duration")]
    pub duration: f32,
    #[serde(default)]
    pub offset: f32,
    #[serde(default)]
    pub interruption_source: InterruptionSource,
    #[serde(default = "default_true")]
    pub ordered_interruption: bool,
    #[serde(default = "default_true")]
    pub can_transition_to_self: bool,
    #[serde(default)]
    pub is_exit: bool,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub solo: bool,
}

fn default_exit_time() -> f32 {
    0.75
}

fn default_duration() -> f32 {
    0.25
}

fn default_true() -> bool {
    true
}

impl Transition {
    /// Creates a transition to the named state with default settings.
    pub fn to(state: impl Into<String>) -> Self {
        Self {
            to_state: Some(state.into()),
            is_exit: false,
            ..Self::exit()
        }
    }

    /// Creates an exit transition.
    pub fn exit() -> Self {
        Self {
            to_state: None,
            conditions: Vec::new(),
            has_exit_time: false,
            exit_time: default_exit_time(),
            duration: default_duration(),
            offset: 0.0,
            interruption_source: InterruptionSource::None,
            ordered_interruption: true,
            can_transition_to_self: true,
            is_exit: true,
            mute: false,
            solo: false,
        }
    }

    /// Adds a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Copies every setting except the target from `other`.
    pub fn copy_settings_from(&mut self, other: &Transition) {
        self.conditions = other.conditions.clone();
        self.has_exit_time = other.has_exit_time;
        self.exit_time = other.exit_time;
        self.duration = other.duration;
        self.offset = other.offset;
        self.interruption_source = other.interruption_source;
        self.ordered_interruption = other.ordered_interruption;
        self.can_transition_to_self = other.can_transition_to_self;
        self.is_exit = other.is_exit;
        self.mute = other.mute;
        self.solo = other.solo;
    }
}
