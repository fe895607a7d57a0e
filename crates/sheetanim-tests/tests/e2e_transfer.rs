//! End-to-end transfer tests between controller files on disk.

use pretty_assertions::assert_eq;

use sheetanim_backend_controller::{
    transfer_between_assets, ControllerError, TransferMode, TransferOptions,
};
use sheetanim_spec::{
    Condition, ConditionMode, Controller, Layer, ParameterType, Position, WarningCode,
};
use sheetanim_tests::TestHarness;

const SOURCE: &str = "Controllers/Source.controller";
const DESTINATION: &str = "Controllers/Destination.controller";

fn source_controller() -> Controller {
    let mut controller = Controller::new("Source");
    controller.add_parameter("speed", ParameterType::Float);
    controller.add_parameter("grounded", ParameterType::Bool);

    let sm = controller.base_state_machine_mut().unwrap();
    for (i, name) in ["idle", "walk", "jump"].iter().enumerate() {
        sm.add_state(*name).unwrap().position = Position::new(100.0 * i as f32, 20.0);
    }
    let to_walk = sm.add_transition("idle", Some("walk")).unwrap();
    to_walk
        .conditions
        .push(Condition::new("speed", ConditionMode::Greater, 0.1));
    to_walk.duration = 0.05;
    sm.add_transition("walk", Some("idle")).unwrap();
    sm.add_transition("idle", Some("jump")).unwrap();
    sm.add_transition("jump", None).unwrap();
    sm.add_any_state_transition("jump")
        .unwrap()
        .conditions
        .push(Condition::new("grounded", ConditionMode::IfNot, 0.0));
    sm.set_default_state("walk").unwrap();
    sm.entry_position = Position::new(-200.0, 0.0);
    controller
}

fn destination_controller() -> Controller {
    let mut controller = Controller::new("Destination");
    controller.add_parameter("old", ParameterType::Int);
    let sm = controller.base_state_machine_mut().unwrap();
    sm.add_state("idle").unwrap().motion = Some("Anim/idle.anim".to_string());
    sm.add_state("walk").unwrap().motion = Some("Anim/walk.anim".to_string());
    sm.add_transition("walk", Some("idle")).unwrap();
    controller
}

fn setup() -> TestHarness {
    let harness = TestHarness::new();
    harness.write_controller(SOURCE, &source_controller());
    harness.write_controller(DESTINATION, &destination_controller());
    harness
}

fn parameter_names(controller: &Controller) -> Vec<&str> {
    controller
        .parameters()
        .iter()
        .map(|p| p.name.as_str())
        .collect()
}

#[test]
fn strict_reset_transfer_mirrors_source_where_states_exist() {
    let harness = setup();
    let options = TransferOptions {
        mode: TransferMode::Strict,
        reset_destination_first: true,
    };

    let report =
        transfer_between_assets(&mut harness.store(), SOURCE, DESTINATION, &options).unwrap();

    assert_eq!(report.parameters_copied, 2);
    assert_eq!(report.transitions_copied, 2);
    assert_eq!(report.any_state_transitions_copied, 0);
    assert_eq!(report.states_created, 0);
    let codes: Vec<_> = report.warnings.iter().map(|w| w.code).collect();
    assert_eq!(
        codes,
        vec![
            WarningCode::MissingTargetState,
            WarningCode::MissingState,
            WarningCode::MissingTargetState,
        ]
    );

    let destination = harness.read_controller(DESTINATION);
    assert_eq!(parameter_names(&destination), vec!["speed", "grounded"]);
    assert_eq!(destination.transition_count(), 2);

    let sm = destination.base_state_machine().unwrap();
    assert!(!sm.has_state("jump"));
    assert_eq!(sm.default_state(), Some("walk"));
    assert_eq!(sm.entry_position, Position::new(-200.0, 0.0));

    let idle = sm.state("idle").unwrap();
    assert_eq!(idle.motion.as_deref(), Some("Anim/idle.anim"));
    assert_eq!(idle.position, Position::new(0.0, 20.0));
    assert_eq!(idle.transitions.len(), 1);
    assert_eq!(idle.transitions[0].to_state.as_deref(), Some("walk"));
    assert_eq!(idle.transitions[0].duration, 0.05);
    assert_eq!(idle.transitions[0].conditions[0].parameter, "speed");
}

#[test]
fn repeated_lenient_transfers_duplicate_transitions_not_parameters() {
    let harness = setup();
    let options = TransferOptions::default();

    let first =
        transfer_between_assets(&mut harness.store(), SOURCE, DESTINATION, &options).unwrap();
    assert_eq!(first.parameters_copied, 2);
    assert_eq!(first.transitions_copied, 5);
    assert_eq!(first.any_state_transitions_copied, 1);
    assert_eq!(first.states_created, 1);
    assert!(first.warnings.is_empty());

    let second =
        transfer_between_assets(&mut harness.store(), SOURCE, DESTINATION, &options).unwrap();
    assert_eq!(second.parameters_copied, 0);
    assert_eq!(second.transitions_copied, 5);
    assert_eq!(second.states_created, 0);

    let destination = harness.read_controller(DESTINATION);
    assert_eq!(
        parameter_names(&destination),
        vec!["old", "speed", "grounded"]
    );
    // One pre-existing transition plus two copies of five.
    assert_eq!(destination.transition_count(), 11);

    let sm = destination.base_state_machine().unwrap();
    let jump = sm.state("jump").unwrap();
    assert!(jump.motion.is_none());
    assert_eq!(jump.position, Position::new(200.0, 20.0));
    assert!(jump.transitions.iter().all(|t| t.is_exit));
}

#[test]
fn source_file_is_left_untouched() {
    let harness = setup();
    let path = harness.path().join(SOURCE);
    let before = std::fs::read(&path).unwrap();

    let options = TransferOptions {
        mode: TransferMode::Lenient,
        reset_destination_first: true,
    };
    transfer_between_assets(&mut harness.store(), SOURCE, DESTINATION, &options).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn missing_destination_is_fatal() {
    let harness = TestHarness::new();
    harness.write_controller(SOURCE, &source_controller());

    let err = transfer_between_assets(
        &mut harness.store(),
        SOURCE,
        DESTINATION,
        &TransferOptions::default(),
    )
    .unwrap_err();

    match err {
        ControllerError::MissingController(path) => assert_eq!(path, DESTINATION),
        other => panic!("unexpected error: {}", other),
    }
    assert!(!harness.exists(DESTINATION));
}

#[test]
fn extra_source_layers_are_created() {
    let harness = TestHarness::new();
    let mut source = source_controller();
    let upper = source.add_layer(Layer::new("Upper Body")).unwrap();
    upper.state_machine.add_state("wave").unwrap();
    upper.state_machine.add_state("rest").unwrap();
    upper
        .state_machine
        .add_transition("wave", Some("rest"))
        .unwrap();
    harness.write_controller(SOURCE, &source);
    harness.write_controller(DESTINATION, &destination_controller());

    let report = transfer_between_assets(
        &mut harness.store(),
        SOURCE,
        DESTINATION,
        &TransferOptions::default(),
    )
    .unwrap();

    assert_eq!(report.layers_created, 1);
    let destination = harness.read_controller(DESTINATION);
    let layer = destination.layer("Upper Body").unwrap();
    let wave = layer.state_machine.state("wave").unwrap();
    assert_eq!(wave.transitions[0].to_state.as_deref(), Some("rest"));
}
