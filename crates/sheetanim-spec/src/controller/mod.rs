//! Animation controller graph.
//!
//! A [`Controller`] owns a parameter bank and an ordered list of uniquely
//! named [`Layer`]s; each layer owns one [`StateMachine`]. Everything is keyed
//! by name, since cross-controller matching is name-based.

mod state_machine;
mod transition;

pub use state_machine::*;
pub use transition::*;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// File extension of persisted controllers.
pub const CONTROLLER_EXTENSION: &str = "controller";

/// Name of the layer every fresh controller starts with.
pub const BASE_LAYER_NAME: &str = "Base Layer";

/// Parameter value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    Bool,
    Int,
    Float,
    Trigger,
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterType::Bool => write!(f, "bool"),
            ParameterType::Int => write!(f, "int"),
            ParameterType::Float => write!(f, "float"),
            ParameterType::Trigger => write!(f, "trigger"),
        }
    }
}

/// A named controller parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParameterType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A named layer owning one state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    #[serde(default)]
    pub state_machine: StateMachine,
}

impl Layer {
    /// Creates a layer with an empty state machine.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state_machine: StateMachine::new(),
        }
    }
}

/// An animation controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    pub name: String,
    #[serde(default)]
    parameters: Vec<Parameter>,
    #[serde(default)]
    layers: Vec<Layer>,
}

impl Controller {
    /// Creates a controller with a single empty base layer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            layers: vec![Layer::new(BASE_LAYER_NAME)],
        }
    }

    /// Creates a controller without any layers.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            layers: Vec::new(),
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameter(name).is_some()
    }

    /// Adds a parameter unless one with the same name exists. Returns true if
    /// it was added; an existing parameter's type is never changed.
    pub fn add_parameter(&mut self, name: impl Into<String>, kind: ParameterType) -> bool {
        let name = name.into();
        if self.has_parameter(&name) {
            return false;
        }
        self.parameters.push(Parameter::new(name, kind));
        true
    }

    pub fn remove_parameter(&mut self, name: &str) -> Option<Parameter> {
        let idx = self.parameters.iter().position(|p| p.name == name)?;
        Some(self.parameters.remove(idx))
    }

    pub fn clear_parameters(&mut self) {
        self.parameters.clear();
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    /// Appends a layer; names must be unique.
    pub fn add_layer(&mut self, layer: Layer) -> Result<&mut Layer, GraphError> {
        if self.layer(&layer.name).is_some() {
            return Err(GraphError::DuplicateLayer(layer.name));
        }
        let idx = self.layers.len();
        self.layers.push(layer);
        Ok(&mut self.layers[idx])
    }

    /// Returns the named layer, appending an empty one if absent. The flag is
    /// true when the layer was created.
    pub fn ensure_layer(&mut self, name: &str) -> (&mut Layer, bool) {
        match self.layers.iter().position(|l| l.name == name) {
            Some(idx) => (&mut self.layers[idx], false),
            None => {
                self.layers.push(Layer::new(name));
                let idx = self.layers.len() - 1;
                (&mut self.layers[idx], true)
            }
        }
    }

    /// State machine of layer 0.
    pub fn base_state_machine(&self) -> Result<&StateMachine, GraphError> {
        self.layers
            .first()
            .map(|l| &l.state_machine)
            .ok_or(GraphError::NoLayers)
    }

    /// Mutable state machine of layer 0.
    pub fn base_state_machine_mut(&mut self) -> Result<&mut StateMachine, GraphError> {
        self.layers
            .first_mut()
            .map(|l| &mut l.state_machine)
            .ok_or(GraphError::NoLayers)
    }

    /// Removes every transition in every layer.
    pub fn clear_transitions(&mut self) {
        for layer in &mut self.layers {
            layer.state_machine.clear_transitions();
        }
    }

    /// Total transition count across layers.
    pub fn transition_count(&self) -> usize {
        self.layers
            .iter()
            .map(|l| l.state_machine.transition_count())
            .sum()
    }

    /// Parses a controller from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the controller to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
