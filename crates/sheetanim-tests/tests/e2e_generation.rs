//! End-to-end generation tests: sheet PNG + job on disk -> clips + controller.

use pretty_assertions::assert_eq;
use serde_json::json;

use sheetanim_backend_controller::{run_job, ControllerError};
use sheetanim_backend_sprite::{Bitmap, SliceError};
use sheetanim_spec::{GenerationJob, SkipReason, CLIP_FRAME_RATE};
use sheetanim_tests::{grid_sheet, write_rgb_png, TestHarness, TRANSPARENT};

fn load_job(harness: &TestHarness, job: serde_json::Value) -> GenerationJob {
    let path = harness.write_job("job.json", &job);
    GenerationJob::from_file(&path).expect("job should parse")
}

fn single_job(
    sheet: &str,
    rows: u32,
    columns: u32,
    animations: serde_json::Value,
) -> serde_json::Value {
    json!({
        "controller": { "kind": "new", "directory": "Animations", "name": "Hero" },
        "sheets": {
            "mode": "single",
            "sheet": sheet,
            "rows": rows,
            "columns": columns,
            "animations": animations
        }
    })
}

fn assert_time(actual: f32, frame: usize) {
    let expected = frame as f32 / CLIP_FRAME_RATE;
    assert!(
        (actual - expected).abs() < 1e-6,
        "keyframe time {} != {}",
        actual,
        expected
    );
}

#[test]
fn automatic_rows_become_states_with_clips() {
    let harness = TestHarness::new();
    // Row 1, column 1 is empty and gets filtered out of "walk".
    harness.write_sheet("Sprites/hero.png", &grid_sheet(2, 3, &[4]));
    let job = load_job(
        &harness,
        single_job(
            "Sprites/hero.png",
            2,
            3,
            json!({ "automatic": [{ "name": "idle", "loop": true }, { "name": "walk" }] }),
        ),
    );

    let mut store = harness.store();
    let report = run_job(&job, &mut store, &harness.bitmaps()).unwrap();

    assert_eq!(report.created, 2);
    assert!(report.is_complete());
    assert_eq!(report.controller_path.as_deref(), Some("Animations/Hero.controller"));

    let idle = harness.read_clip("Animations/idle.anim");
    assert!(idle.loop_time);
    assert_eq!(idle.keyframes.len(), 3);
    for (i, keyframe) in idle.keyframes.iter().enumerate() {
        assert_time(keyframe.time, i);
    }

    let walk = harness.read_clip("Animations/walk.anim");
    assert!(!walk.loop_time);
    let sprites: Vec<_> = walk.keyframes.iter().map(|k| k.sprite.name.as_str()).collect();
    assert_eq!(sprites, vec!["hero_r1_c0", "hero_r1_c2"]);
    assert_time(walk.keyframes[1].time, 1);

    let controller = harness.read_controller("Animations/Hero.controller");
    let sm = controller.base_state_machine().unwrap();
    assert_eq!(
        sm.state("idle").unwrap().motion.as_deref(),
        Some("Animations/idle.anim")
    );
    assert_eq!(
        sm.state("walk").unwrap().motion.as_deref(),
        Some("Animations/walk.anim")
    );
}

#[test]
fn reported_hash_matches_written_clip() {
    let harness = TestHarness::new();
    harness.write_sheet("hero.png", &grid_sheet(1, 2, &[]));
    let job = load_job(
        &harness,
        single_job("hero.png", 1, 2, json!({ "automatic": [{ "name": "idle" }] })),
    );

    let report = run_job(&job, &mut harness.store(), &harness.bitmaps()).unwrap();

    let clip = &report.clips[0];
    assert_eq!(clip.path, "Animations/idle.anim");
    assert_eq!(clip.keyframes, 2);
    let bytes = std::fs::read(harness.path().join(&clip.path)).unwrap();
    assert_eq!(clip.hash, blake3::hash(&bytes).to_hex().to_string());
}

#[test]
fn manual_range_without_filter_keeps_empty_frames() {
    let harness = TestHarness::new();
    harness.write_sheet("hero.png", &grid_sheet(1, 10, &[3]));
    let mut job = single_job(
        "hero.png",
        1,
        10,
        json!({ "manual": [
            { "name": "attack", "start_frame": 3, "end_frame": 5 },
            { "name": "", "start_frame": 1, "end_frame": 1 },
            { "name": "broken", "start_frame": 5, "end_frame": 2 }
        ] }),
    );
    job["filter_empty"] = json!(false);
    let job = load_job(&harness, job);

    let report = run_job(&job, &mut harness.store(), &harness.bitmaps()).unwrap();

    assert_eq!(report.created, 1);
    let reasons: Vec<_> = report.skipped.iter().map(|s| s.reason).collect();
    assert_eq!(
        reasons,
        vec![SkipReason::InvalidName, SkipReason::RangeOutOfOrder]
    );

    let attack = harness.read_clip("Animations/attack.anim");
    let sprites: Vec<_> = attack
        .keyframes
        .iter()
        .map(|k| k.sprite.name.as_str())
        .collect();
    assert_eq!(sprites, vec!["hero_r0_c2", "hero_r0_c3", "hero_r0_c4"]);
}

#[test]
fn fully_transparent_animation_is_skipped_without_asset() {
    let harness = TestHarness::new();
    harness.write_sheet("blank.png", &Bitmap::filled(8, 4, TRANSPARENT));
    let job = load_job(
        &harness,
        single_job("blank.png", 1, 2, json!({ "automatic": [{ "name": "idle" }] })),
    );

    let report = run_job(&job, &mut harness.store(), &harness.bitmaps()).unwrap();

    assert_eq!(report.created, 0);
    assert_eq!(report.skipped[0].reason, SkipReason::EmptyClip);
    assert!(!harness.exists("Animations/idle.anim"));
    let controller = harness.read_controller("Animations/Hero.controller");
    assert!(controller.base_state_machine().unwrap().states().is_empty());
}

#[test]
fn clip_name_collision_gets_numeric_suffix() {
    let harness = TestHarness::new();
    harness.write_sheet("hero.png", &grid_sheet(1, 2, &[]));
    std::fs::create_dir_all(harness.path().join("Animations")).unwrap();
    std::fs::write(harness.path().join("Animations/idle.anim"), "{}").unwrap();
    let job = load_job(
        &harness,
        single_job("hero.png", 1, 2, json!({ "automatic": [{ "name": "idle" }] })),
    );

    let report = run_job(&job, &mut harness.store(), &harness.bitmaps()).unwrap();

    assert_eq!(report.clips[0].path, "Animations/idle_1.anim");
    let controller = harness.read_controller("Animations/Hero.controller");
    let idle = controller.base_state_machine().unwrap().state("idle").unwrap();
    assert_eq!(idle.motion.as_deref(), Some("Animations/idle_1.anim"));
}

#[test]
fn missing_sheet_aborts_before_writing() {
    let harness = TestHarness::new();
    let job = load_job(
        &harness,
        single_job("missing.png", 1, 2, json!({ "automatic": [{ "name": "idle" }] })),
    );

    let err = run_job(&job, &mut harness.store(), &harness.bitmaps()).unwrap_err();

    assert!(matches!(
        err,
        ControllerError::Slice(SliceError::InvalidSheet { .. })
    ));
    assert!(!harness.exists("Animations"));
}

#[test]
fn multi_sheet_batch_reads_rgb_sheets_and_skips_missing() {
    let harness = TestHarness::new();
    write_rgb_png(&harness.path().join("Sprites/fx.png"), 12, 4);
    harness.write_sheet("Sprites/hero.png", &grid_sheet(1, 4, &[]));
    let job = load_job(
        &harness,
        json!({
            "controller": { "kind": "new", "create_subfolder": true },
            "sheets": {
                "mode": "multiple",
                "entries": [
                    { "name": "fx", "sheet": "Sprites/fx.png", "columns": 3, "loop": true },
                    { "name": "gone", "sheet": "Sprites/gone.png", "columns": 3 },
                    { "name": "hero", "sheet": "Sprites/hero.png", "columns": 4 }
                ]
            }
        }),
    );

    let report = run_job(&job, &mut harness.store(), &harness.bitmaps()).unwrap();

    assert_eq!(report.created, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "gone");
    assert_eq!(report.skipped[0].reason, SkipReason::SheetUnavailable);

    let dir = "Animations/SpriteAnimatorController";
    let fx = harness.read_clip(&format!("{}/fx.anim", dir));
    assert!(fx.loop_time);
    assert_eq!(fx.keyframes.len(), 3);
    assert_eq!(
        harness
            .read_clip(&format!("{}/hero.anim", dir))
            .keyframes
            .len(),
        4
    );

    let controller =
        harness.read_controller(&format!("{}/SpriteAnimatorController.controller", dir));
    let names: Vec<_> = controller
        .base_state_machine()
        .unwrap()
        .states()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["fx", "hero"]);
}

#[test]
fn existing_controller_keeps_states_and_gains_new_ones() {
    let harness = TestHarness::new();
    harness.write_sheet("hero.png", &grid_sheet(2, 2, &[]));

    let mut existing = sheetanim_spec::Controller::new("Hero");
    existing
        .base_state_machine_mut()
        .unwrap()
        .add_state("idle")
        .unwrap();
    harness.write_controller("Characters/Hero.controller", &existing);

    let job = load_job(
        &harness,
        json!({
            "controller": { "kind": "existing", "path": "Characters/Hero.controller" },
            "sheets": {
                "mode": "single",
                "sheet": "hero.png",
                "rows": 2,
                "columns": 2,
                "animations": { "automatic": [{ "name": "idle" }, { "name": "run" }] }
            }
        }),
    );

    let report = run_job(&job, &mut harness.store(), &harness.bitmaps()).unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.skipped[0].reason, SkipReason::DuplicateName);
    let controller = harness.read_controller("Characters/Hero.controller");
    let sm = controller.base_state_machine().unwrap();
    assert!(sm.state("idle").unwrap().motion.is_none());
    assert_eq!(
        sm.state("run").unwrap().motion.as_deref(),
        Some("Characters/run.anim")
    );
}
