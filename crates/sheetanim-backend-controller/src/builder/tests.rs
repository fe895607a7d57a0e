//! Tests for the state-machine builder.

use super::*;
use crate::store::MemoryAssetStore;
use pretty_assertions::assert_eq;
use sheetanim_backend_sprite::{slice_bitmap, Bitmap};
use sheetanim_spec::{
    build_animation_specs_automatic, build_animation_specs_manual, FrameRange, ManualAnimation,
    BASE_LAYER_NAME,
};

const OPAQUE: [u8; 4] = [255, 255, 255, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

/// 1 row of `columns` 4px cells; cells listed in `transparent` are cleared.
fn strip(columns: u32, transparent: &[u32]) -> SlicedSheet {
    let mut bitmap = Bitmap::filled(columns * 4, 4, OPAQUE);
    for &c in transparent {
        bitmap.fill_rect(c * 4, 0, 4, 4, CLEAR);
    }
    slice_bitmap(bitmap, "s", 1, columns, [0.5, 0.5]).unwrap()
}

fn run(
    specs: &[AnimationSpec],
    sheet: &SlicedSheet,
    options: GenerateOptions,
) -> (GenerationReport, Controller, MemoryAssetStore) {
    let mut store = MemoryAssetStore::new();
    let mut controller = Controller::new("hero");
    let report =
        generate_clips_and_states(specs, sheet, &mut controller, "Anim", &options, &mut store)
            .unwrap();
    (report, controller, store)
}

#[test]
fn manual_range_selects_zero_based_frames() {
    let sheet = strip(10, &[]);
    let specs = build_animation_specs_manual(&[ManualAnimation::new("attack", 3, 5, false)]);
    let (report, controller, store) = run(&specs, &sheet, GenerateOptions::default());

    assert_eq!(report.created, 1);
    let clip = store.clip("Anim/attack.anim").unwrap();
    let names: Vec<_> = clip.keyframes.iter().map(|k| k.sprite.name.as_str()).collect();
    assert_eq!(names, vec!["s_r0_c2", "s_r0_c3", "s_r0_c4"]);

    let state = controller.base_state_machine().unwrap().state("attack").unwrap();
    assert_eq!(state.motion.as_deref(), Some("Anim/attack.anim"));
}

#[test]
fn transparent_frames_are_dropped_and_retimed() {
    let sheet = strip(3, &[1]);
    let specs = vec![AnimationSpec::new("blink", FrameRange::new(0, 2), true)];
    let (report, _, store) = run(&specs, &sheet, GenerateOptions::default());

    assert_eq!(report.clips[0].keyframes, 2);
    let clip = store.clip("Anim/blink.anim").unwrap();
    assert_eq!(clip.keyframes[0].time, 0.0);
    assert!((clip.keyframes[1].time - 1.0 / 12.0).abs() < 1e-6);
    assert_eq!(clip.keyframes[1].sprite.name, "s_r0_c2");
    assert!(clip.loop_time);
}

#[test]
fn filter_can_be_disabled() {
    let sheet = strip(3, &[1]);
    let specs = vec![AnimationSpec::new("blink", FrameRange::new(0, 2), false)];
    let options = GenerateOptions {
        filter_empty: false,
        binding: BindingTarget::Image,
    };
    let (_, _, store) = run(&specs, &sheet, options);
    let clip = store.clip("Anim/blink.anim").unwrap();
    assert_eq!(clip.keyframes.len(), 3);
    assert_eq!(clip.binding.target, BindingTarget::Image);
}

#[test]
fn invalid_specs_are_skipped_with_reasons() {
    let sheet = strip(10, &[]);
    let specs = build_animation_specs_manual(&[
        ManualAnimation::new("", 1, 2, false),
        ManualAnimation::new("backwards", 5, 2, false),
        ManualAnimation::new("before", 0, 2, false),
        ManualAnimation::new("past", 9, 11, false),
        ManualAnimation::new("ok", 1, 10, false),
    ]);
    let (report, controller, _) = run(&specs, &sheet, GenerateOptions::default());

    let reasons: Vec<_> = report.skipped.iter().map(|s| s.reason).collect();
    assert_eq!(
        reasons,
        vec![
            SkipReason::InvalidName,
            SkipReason::RangeOutOfOrder,
            SkipReason::RangeOutOfBounds,
            SkipReason::RangeExceedsFrameCount,
        ]
    );
    assert_eq!(report.skipped[1].name, "backwards");
    assert_eq!(report.skipped[1].reason.to_string(), "range out of order");
    assert_eq!(report.created, 1);
    assert_eq!(controller.base_state_machine().unwrap().states().len(), 1);
}

#[test]
fn unsafe_names_are_skipped_and_batch_continues() {
    let sheet = strip(6, &[]);
    let specs = vec![
        AnimationSpec::new("idle", FrameRange::new(0, 1), true),
        AnimationSpec::new("../evil", FrameRange::new(2, 3), false),
        AnimationSpec::new("C:\\evil", FrameRange::new(2, 3), false),
        AnimationSpec::new("walk", FrameRange::new(4, 5), true),
    ];
    let (report, controller, store) = run(&specs, &sheet, GenerateOptions::default());

    assert_eq!(report.created, 2);
    let skipped: Vec<_> = report
        .skipped
        .iter()
        .map(|s| (s.name.as_str(), s.reason))
        .collect();
    assert_eq!(
        skipped,
        vec![
            ("../evil", SkipReason::InvalidName),
            ("C:\\evil", SkipReason::InvalidName),
        ]
    );
    let sm = controller.base_state_machine().unwrap();
    assert!(sm.has_state("idle"));
    assert!(sm.has_state("walk"));
    assert!(!sm.has_state("../evil"));
    assert!(store.exists("Anim/walk.anim"));
    assert!(!store.exists("evil.anim"));
}

#[test]
fn duplicate_names_are_skipped() {
    let sheet = strip(4, &[]);
    let specs = vec![
        AnimationSpec::new("idle", FrameRange::new(0, 1), true),
        AnimationSpec::new("idle", FrameRange::new(2, 3), true),
        AnimationSpec::new("existing", FrameRange::new(0, 0), false),
    ];
    let mut store = MemoryAssetStore::new();
    let mut controller = Controller::new("hero");
    controller
        .base_state_machine_mut()
        .unwrap()
        .add_state("existing")
        .unwrap();

    let report = generate_clips_and_states(
        &specs,
        &sheet,
        &mut controller,
        "Anim",
        &GenerateOptions::default(),
        &mut store,
    )
    .unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.skipped.len(), 2);
    assert!(report
        .skipped
        .iter()
        .all(|s| s.reason == SkipReason::DuplicateName));
    assert_eq!(store.clip_paths().collect::<Vec<_>>(), vec!["Anim/idle.anim"]);
}

#[test]
fn fully_transparent_range_is_an_empty_clip() {
    let sheet = strip(4, &[2, 3]);
    let specs = vec![
        AnimationSpec::new("ghost", FrameRange::new(2, 3), false),
        AnimationSpec::new("solid", FrameRange::new(0, 1), false),
    ];
    let (report, controller, store) = run(&specs, &sheet, GenerateOptions::default());

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::EmptyClip);
    assert!(store.clip("Anim/ghost.anim").is_none());
    assert!(!controller.base_state_machine().unwrap().has_state("ghost"));
    assert!(controller.base_state_machine().unwrap().has_state("solid"));
}

#[test]
fn automatic_specs_cover_every_frame() {
    let bitmap = Bitmap::filled(12, 8, OPAQUE);
    let sheet = slice_bitmap(bitmap, "hero", 2, 3, [0.5, 0.5]).unwrap();
    let specs = build_animation_specs_automatic(&["idle", "walk"], &[true, false], 3);
    let (report, controller, _) = run(&specs, &sheet, GenerateOptions::default());

    let total: usize = report.clips.iter().map(|c| c.keyframes).sum();
    assert_eq!(total, 6);
    assert_eq!(controller.base_state_machine().unwrap().default_state(), Some("idle"));
}

#[test]
fn colliding_clip_paths_get_suffixes() {
    let sheet = strip(2, &[]);
    let specs = vec![AnimationSpec::new("idle", FrameRange::new(0, 1), true)];
    let mut store = MemoryAssetStore::new();

    let mut first = Controller::new("a");
    generate_clips_and_states(
        &specs,
        &sheet,
        &mut first,
        "Anim",
        &GenerateOptions::default(),
        &mut store,
    )
    .unwrap();
    let mut second = Controller::new("b");
    let report = generate_clips_and_states(
        &specs,
        &sheet,
        &mut second,
        "Anim",
        &GenerateOptions::default(),
        &mut store,
    )
    .unwrap();

    assert_eq!(report.clips[0].path, "Anim/idle_1.anim");
    let state = second.base_state_machine().unwrap().state("idle").unwrap();
    assert_eq!(state.motion.as_deref(), Some("Anim/idle_1.anim"));
}

#[test]
fn clip_hash_is_recorded_and_stable() {
    let sheet = strip(2, &[]);
    let specs = vec![AnimationSpec::new("idle", FrameRange::new(0, 1), true)];
    let (report, _, store) = run(&specs, &sheet, GenerateOptions::default());

    let hash = &report.clips[0].hash;
    assert_eq!(hash.len(), 64);
    assert_eq!(&clip_hash(store.clip("Anim/idle.anim").unwrap()).unwrap(), hash);
}

#[test]
fn layerless_controller_is_fatal() {
    let sheet = strip(2, &[]);
    let specs = vec![AnimationSpec::new("idle", FrameRange::new(0, 1), true)];
    let mut store = MemoryAssetStore::new();
    let mut controller = Controller::empty("bare");
    let err = generate_clips_and_states(
        &specs,
        &sheet,
        &mut controller,
        "Anim",
        &GenerateOptions::default(),
        &mut store,
    )
    .unwrap_err();
    assert!(matches!(err, ControllerError::Graph(_)));
}

#[test]
fn new_controller_paths() {
    let mut store = MemoryAssetStore::new();
    let flat = prepare_new_controller(&mut store, "Animations", "Hero", false).unwrap();
    assert_eq!(flat.path, "Animations/Hero.controller");
    assert_eq!(flat.save_dir, "Animations");
    assert_eq!(flat.controller.layers()[0].name, BASE_LAYER_NAME);

    let nested = prepare_new_controller(&mut store, "Animations/", "Boss", true).unwrap();
    assert_eq!(nested.path, "Animations/Boss/Boss.controller");
    assert_eq!(nested.save_dir, "Animations/Boss");
    assert!(store.exists("Animations/Boss"));
    assert!(store.controller("Animations/Boss/Boss.controller").is_some());
}

#[test]
fn existing_controller_paths() {
    let mut store = MemoryAssetStore::new();
    store.insert_controller("Anim/Hero.controller", Controller::new("Hero"));

    let prepared = prepare_existing_controller(&mut store, "Anim/Hero.controller", None).unwrap();
    assert_eq!(prepared.save_dir, "Anim");

    let prepared =
        prepare_existing_controller(&mut store, "Anim/Hero.controller", Some("Clips/Hero/"))
            .unwrap();
    assert_eq!(prepared.save_dir, "Clips/Hero");

    let err = prepare_existing_controller(&mut store, "Anim/None.controller", None).unwrap_err();
    assert!(matches!(err, ControllerError::MissingController(_)));
}

#[test]
fn save_directory_resolution() {
    assert_eq!(resolve_save_directory("A/B/c.controller", None), "A/B");
    assert_eq!(resolve_save_directory("c.controller", None), "");
    assert_eq!(resolve_save_directory("A/c.controller", Some("  ")), "A");
    assert_eq!(resolve_save_directory("A/c.controller", Some("X")), "X");
}
