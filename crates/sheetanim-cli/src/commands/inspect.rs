//! Inspect command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use sheetanim_backend_controller::{AssetStore, FsAssetStore};
use sheetanim_spec::{Controller, StateMachine, Transition};
use std::process::ExitCode;

use super::json_output::{backend_error_to_json, CommandOutput, InspectResult};

/// Run the inspect command
///
/// # Arguments
/// * `root` - Asset root directory
/// * `controller_path` - Controller path relative to the root
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 if the controller could not be loaded
pub fn run(root: &str, controller_path: &str, json_output: bool) -> Result<ExitCode> {
    let store = FsAssetStore::new(root);
    let loaded = store.load_controller(controller_path);
    log::debug!("inspecting {} under {}", controller_path, root);

    if json_output {
        return match loaded {
            Ok(controller) => {
                CommandOutput::success(inspect_result(controller_path, controller), vec![])
                    .print()?;
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                let error = backend_error_to_json(&err).with_file(controller_path);
                CommandOutput::<InspectResult>::failure(vec![error], vec![]).print()?;
                Ok(ExitCode::from(1))
            }
        };
    }

    let controller = loaded
        .with_context(|| format!("Failed to load controller: {}", controller_path))?;
    print_controller(controller_path, &controller);
    Ok(ExitCode::SUCCESS)
}

fn inspect_result(path: &str, controller: Controller) -> InspectResult {
    InspectResult {
        path: path.to_string(),
        layer_count: controller.layers().len(),
        state_count: controller
            .layers()
            .iter()
            .map(|l| l.state_machine.states().len())
            .sum(),
        transition_count: controller.transition_count(),
        controller,
    }
}

fn print_controller(path: &str, controller: &Controller) {
    println!("{} {}", "Controller:".cyan().bold(), controller.name);
    println!("{} {}", "Path:".dimmed(), path);

    println!("\n{}", "Parameters:".cyan().bold());
    if controller.parameters().is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for parameter in controller.parameters() {
        println!("  {} {:?}", parameter.name, parameter.kind);
    }

    for layer in controller.layers() {
        println!("\n{} {}", "Layer:".cyan().bold(), layer.name);
        print_state_machine(&layer.state_machine);
    }
}

fn print_state_machine(sm: &StateMachine) {
    for state in sm.states() {
        let marker = if sm.default_state() == Some(state.name.as_str()) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        let motion = state.motion.as_deref().unwrap_or("(no motion)");
        println!("  {} {} {}", marker, state.name.bold(), motion.dimmed());
        for transition in &state.transitions {
            println!("      -> {}", describe_transition(transition));
        }
    }
    for transition in sm.any_state_transitions() {
        println!("  {} -> {}", "Any State".yellow(), describe_transition(transition));
    }
}

fn describe_transition(transition: &Transition) -> String {
    let target = match &transition.to_state {
        Some(name) => name.clone(),
        None if transition.is_exit => "Exit".to_string(),
        None => "(none)".to_string(),
    };
    if transition.conditions.is_empty() {
        return target;
    }
    let conditions: Vec<String> = transition
        .conditions
        .iter()
        .map(|c| format!("{} {:?} {}", c.parameter, c.mode, c.threshold))
        .collect();
    format!("{} [{}]", target, conditions.join(", "))
}
