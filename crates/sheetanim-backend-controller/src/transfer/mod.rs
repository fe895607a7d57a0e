//! Transition transfer between controllers.
//!
//! Layers and states are matched by name. The source is never modified.
//!
//! Transfers are additive: running the same transfer twice never duplicates a
//! parameter, but every transition is added again. Use
//! [`TransferOptions::reset_destination_first`] to replace instead of append.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sheetanim_spec::{
    Controller, Position, StateMachine, Transition, TransferReport, TransferWarning, WarningCode,
};

use crate::error::ControllerError;
use crate::store::AssetStore;

/// How missing destination states are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferMode {
    /// Create missing states (with no motion) and keep going.
    #[default]
    Lenient,
    /// Skip anything whose state is missing, with a warning.
    Strict,
}

/// Options for a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransferOptions {
    #[serde(default)]
    pub mode: TransferMode,
    /// Destructive: clears every destination parameter, state transition and
    /// any-state transition before copying.
    #[serde(default)]
    pub reset_destination_first: bool,
}

/// Copies parameters, transitions, any-state transitions, state positions and
/// default states from `source` into `destination`.
///
/// Per-item problems are returned as warnings in the report.
pub fn transfer_between_controllers(
    source: &Controller,
    destination: &mut Controller,
    options: &TransferOptions,
) -> TransferReport {
    let mut report = TransferReport::default();

    if options.reset_destination_first {
        log::info!("resetting parameters and transitions of '{}'", destination.name);
        destination.clear_parameters();
        destination.clear_transitions();
    }

    report.parameters_copied = copy_parameters(source, destination);

    for layer in source.layers() {
        let (dest_layer, created) = destination.ensure_layer(&layer.name);
        if created {
            log::info!("created layer '{}'", layer.name);
            report.layers_created += 1;
        }
        let mut ctx = LayerTransfer {
            layer: &layer.name,
            mode: options.mode,
            report: &mut report,
        };
        ctx.copy_state_transitions(&layer.state_machine, &mut dest_layer.state_machine);
        ctx.copy_any_state_transitions(&layer.state_machine, &mut dest_layer.state_machine);
        copy_positions(&layer.state_machine, &mut dest_layer.state_machine);
        ctx.copy_default_state(&layer.state_machine, &mut dest_layer.state_machine);
    }

    log::info!(
        "transferred {} parameter(s) and {} transition(s) with {} warning(s)",
        report.parameters_copied,
        report.transitions_copied,
        report.warnings.len()
    );
    report
}

/// Adds every source parameter missing from the destination. Returns the
/// number added.
pub fn copy_parameters(source: &Controller, destination: &mut Controller) -> usize {
    source
        .parameters()
        .iter()
        .filter(|p| destination.add_parameter(p.name.clone(), p.kind))
        .count()
}

struct LayerTransfer<'a> {
    layer: &'a str,
    mode: TransferMode,
    report: &'a mut TransferReport,
}

impl LayerTransfer<'_> {
    fn warn(&mut self, code: WarningCode, message: String) {
        log::warn!("[{}] {}", self.layer, message);
        self.report
            .warnings
            .push(TransferWarning::new(code, self.layer, message));
    }

    /// Finds the named destination state, creating it in lenient mode.
    fn resolve_state(&mut self, dest: &mut StateMachine, name: &str) -> bool {
        if dest.has_state(name) {
            return true;
        }
        match self.mode {
            TransferMode::Lenient => {
                dest.ensure_state(name);
                self.report.states_created += 1;
                true
            }
            TransferMode::Strict => false,
        }
    }

    fn copy_state_transitions(&mut self, source: &StateMachine, dest: &mut StateMachine) {
        for state in source.states() {
            let found = self.resolve_state(dest, &state.name);
            if state.transitions.is_empty() {
                continue;
            }
            if !found {
                self.warn(
                    WarningCode::MissingState,
                    format!(
                        "state '{}' not found; skipped {} transition(s)",
                        state.name,
                        state.transitions.len()
                    ),
                );
                continue;
            }

            for transition in &state.transitions {
                let target = match &transition.to_state {
                    Some(target) if !transition.is_exit => Some(target.as_str()),
                    _ => None,
                };
                if let Some(target) = target {
                    if !self.resolve_state(dest, target) {
                        self.warn(
                            WarningCode::MissingTargetState,
                            format!(
                                "target state '{}' of '{}' not found; transition skipped",
                                target, state.name
                            ),
                        );
                        continue;
                    }
                }
                self.add_copy(dest, &state.name, target, transition);
            }
        }
    }

    fn add_copy(
        &mut self,
        dest: &mut StateMachine,
        from: &str,
        to: Option<&str>,
        transition: &Transition,
    ) {
        match dest.add_transition(from, to) {
            Ok(copy) => {
                copy.copy_settings_from(transition);
                self.report.transitions_copied += 1;
            }
            Err(err) => self.warn(WarningCode::MissingState, err.to_string()),
        }
    }

    fn copy_any_state_transitions(&mut self, source: &StateMachine, dest: &mut StateMachine) {
        for transition in source.any_state_transitions() {
            let Some(target) = transition.to_state.as_deref() else {
                self.warn(
                    WarningCode::MissingTargetState,
                    "any-state transition without a target skipped".to_string(),
                );
                continue;
            };
            if !self.resolve_state(dest, target) {
                self.warn(
                    WarningCode::MissingTargetState,
                    format!(
                        "any-state target '{}' not found; transition skipped",
                        target
                    ),
                );
                continue;
            }
            match dest.add_any_state_transition(target) {
                Ok(copy) => {
                    copy.copy_settings_from(transition);
                    self.report.transitions_copied += 1;
                    self.report.any_state_transitions_copied += 1;
                }
                Err(err) => self.warn(WarningCode::MissingTargetState, err.to_string()),
            }
        }
    }

    fn copy_default_state(&mut self, source: &StateMachine, dest: &mut StateMachine) {
        let Some(default) = source.default_state() else {
            return;
        };
        if dest.set_default_state(default).is_err() {
            self.warn(
                WarningCode::MissingDefaultState,
                format!("default state '{}' not found", default),
            );
        }
    }
}

/// Fallback position of the `index`-th unmatched state.
pub fn fallback_position(index: usize) -> Position {
    let offset = 50.0 + 10.0 * index as f32;
    Position::new(offset, offset)
}

/// Matched destination states take the source position, the rest are
/// staggered by index. Entry and any-state anchors are always copied; the
/// exit anchor only when the source's is set.
fn copy_positions(source: &StateMachine, dest: &mut StateMachine) {
    let positions: HashMap<&str, Position> = source
        .states()
        .iter()
        .map(|s| (s.name.as_str(), s.position))
        .collect();

    for (i, state) in dest.states_mut().enumerate() {
        state.position = positions
            .get(state.name.as_str())
            .copied()
            .unwrap_or_else(|| fallback_position(i));
    }

    dest.entry_position = source.entry_position;
    dest.any_state_position = source.any_state_position;
    if !source.exit_position.is_zero() {
        dest.exit_position = source.exit_position;
    }
}

/// Loads both controllers from `store`, transfers and saves the destination.
///
/// A missing source or destination is fatal; nothing is written in that case.
pub fn transfer_between_assets<S: AssetStore + ?Sized>(
    store: &mut S,
    source_path: &str,
    destination_path: &str,
    options: &TransferOptions,
) -> Result<TransferReport, ControllerError> {
    for path in [source_path, destination_path] {
        if !store.exists(path) {
            return Err(ControllerError::MissingController(path.to_string()));
        }
    }
    let source = store.load_controller(source_path)?;
    let mut destination = store.load_controller(destination_path)?;

    let report = transfer_between_controllers(&source, &mut destination, options);

    store.save_controller(destination_path, &destination)?;
    store.save_all()?;
    Ok(report)
}
