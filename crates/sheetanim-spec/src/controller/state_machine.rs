//! State machine graph keyed by state name.

use serde::{Deserialize, Serialize};

use super::Transition;
use crate::error::GraphError;

/// Graph-editor position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// The origin.
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns true if both components are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// A state bound to a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Name, unique within its state machine.
    pub name: String,
    /// Asset path of the clip played by this state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<String>,
    #[serde(default)]
    pub position: Position,
    /// Outgoing transitions.
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            motion: None,
            position: Position::ZERO,
            transitions: Vec::new(),
        }
    }
}

/// A layer's state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMachine {
    #[serde(default)]
    states: Vec<State>,
    #[serde(default)]
    any_state_transitions: Vec<Transition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_state: Option<String>,
    #[serde(default = "default_entry_position")]
    pub entry_position: Position,
    #[serde(default = "default_any_state_position")]
    pub any_state_position: Position,
    #[serde(default = "default_exit_position")]
    pub exit_position: Position,
}

fn default_entry_position() -> Position {
    Position::new(50.0, 120.0)
}

fn default_any_state_position() -> Position {
    Position::new(50.0, 20.0)
}

fn default_exit_position() -> Position {
    Position::new(800.0, 120.0)
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Creates an empty state machine with the default layout anchors.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            any_state_transitions: Vec::new(),
            default_state: None,
            entry_position: default_entry_position(),
            any_state_position: default_any_state_position(),
            exit_position: default_exit_position(),
        }
    }

    /// States in insertion order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Mutable iterator over states, for edits that keep names intact.
    pub fn states_mut(&mut self) -> impl Iterator<Item = &mut State> {
        self.states.iter_mut()
    }

    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name == name)
    }

    pub fn state_mut(&mut self, name: &str) -> Option<&mut State> {
        self.states.iter_mut().find(|s| s.name == name)
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.state(name).is_some()
    }

    /// Adds a state. The first state added becomes the default state.
    pub fn add_state(&mut self, name: impl Into<String>) -> Result<&mut State, GraphError> {
        let name = name.into();
        if self.has_state(&name) {
            return Err(GraphError::DuplicateState(name));
        }
        if self.default_state.is_none() {
            self.default_state = Some(name.clone());
        }
        self.states.push(State::new(name));
        let idx = self.states.len() - 1;
        Ok(&mut self.states[idx])
    }

    /// Returns the named state, adding it first if absent. The flag is true
    /// when the state was created.
    pub fn ensure_state(&mut self, name: &str) -> (&mut State, bool) {
        match self.states.iter().position(|s| s.name == name) {
            Some(idx) => (&mut self.states[idx], false),
            None => {
                if self.default_state.is_none() {
                    self.default_state = Some(name.to_string());
                }
                self.states.push(State::new(name));
                let idx = self.states.len() - 1;
                (&mut self.states[idx], true)
            }
        }
    }

    /// Adds a transition from `from` to `to` (`None` for an exit transition).
    pub fn add_transition(
        &mut self,
        from: &str,
        to: Option<&str>,
    ) -> Result<&mut Transition, GraphError> {
        if let Some(target) = to {
            if !self.has_state(target) {
                return Err(GraphError::UnknownState(target.to_string()));
            }
        }
        let state = self
            .state_mut(from)
            .ok_or_else(|| GraphError::UnknownState(from.to_string()))?;
        let transition = match to {
            Some(target) => Transition::to(target),
            None => Transition::exit(),
        };
        let idx = state.transitions.len();
        state.transitions.push(transition);
        Ok(&mut state.transitions[idx])
    }

    /// Any-state transitions in insertion order.
    pub fn any_state_transitions(&self) -> &[Transition] {
        &self.any_state_transitions
    }

    /// Adds an any-state transition to the named state.
    pub fn add_any_state_transition(&mut self, to: &str) -> Result<&mut Transition, GraphError> {
        if !self.has_state(to) {
            return Err(GraphError::UnknownState(to.to_string()));
        }
        let idx = self.any_state_transitions.len();
        self.any_state_transitions.push(Transition::to(to));
        Ok(&mut self.any_state_transitions[idx])
    }

    /// Removes every state transition and every any-state transition.
    pub fn clear_transitions(&mut self) {
        for state in &mut self.states {
            state.transitions.clear();
        }
        self.any_state_transitions.clear();
    }

    /// Total number of state and any-state transitions.
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum::<usize>()
            + self.any_state_transitions.len()
    }

    pub fn default_state(&self) -> Option<&str> {
        self.default_state.as_deref()
    }

    /// Sets the default state; the state must exist.
    pub fn set_default_state(&mut self, name: &str) -> Result<(), GraphError> {
        if !self.has_state(name) {
            return Err(GraphError::UnknownState(name.to_string()));
        }
        self.default_state = Some(name.to_string());
        Ok(())
    }
}
