//! sheetanim Spec Library
//!
//! This crate provides the data model shared by every sheetanim crate: sliced
//! sub-images, animation specs and clips, the animation controller graph,
//! generation jobs with their validation, and run reports.
//!
//! # Overview
//!
//! A generation run slices a sprite sheet into a grid of [`SubImage`]s, turns
//! named frame ranges ([`AnimationSpec`]) into 12 fps [`AnimationClip`]s and
//! binds each clip to a new state of a [`Controller`]. The pixel work lives in
//! `sheetanim-backend-sprite`; asset persistence and controller editing live in
//! `sheetanim-backend-controller`.
//!
//! # Example
//!
//! ```
//! use sheetanim_spec::{build_animation_specs_automatic, FrameRange};
//!
//! let specs = build_animation_specs_automatic(&["idle", "walk"], &[true], 4);
//! assert_eq!(specs[1].frames, FrameRange::new(4, 7));
//! assert!(specs[0].looping);
//! assert!(!specs[1].looping);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error, warning and skip-reason types
//! - [`sprite`]: Sub-images, animation specs and clips
//! - [`controller`]: Controller, layer, state machine and transition types
//! - [`job`]: Generation job files
//! - [`report`]: Generation and transfer reports
//! - [`validation`]: Job validation

pub mod controller;
pub mod error;
pub mod job;
pub mod report;
pub mod sprite;
pub mod validation;

// Re-export commonly used types at the crate root
pub use controller::{
    Condition, ConditionMode, Controller, InterruptionSource, Layer, Parameter, ParameterType,
    Position, State, StateMachine, Transition, BASE_LAYER_NAME, CONTROLLER_EXTENSION,
};
pub use error::{
    BackendError, ErrorCode, GraphError, SkipReason, SpecError, ValidationError, ValidationResult,
    ValidationWarning, WarningCode,
};
pub use job::{
    AnimationDefinitions, ControllerTarget, GenerationJob, MultiSheetEntry, SheetSource,
    SingleSheet, TemplateMode, TemplateSource, DEFAULT_CONTROLLER_DIRECTORY,
    DEFAULT_CONTROLLER_NAME,
};
pub use report::{ClipOutput, GenerationReport, SkippedSpec, TransferReport, TransferWarning};
pub use sprite::{
    build_animation_specs_automatic, build_animation_specs_manual, is_valid_pivot, AnimationClip,
    AnimationSpec, AutomaticAnimation, BindingTarget, CurveBinding, FrameRange, Keyframe,
    ManualAnimation, Rect, SubImage, CLIP_EXTENSION, CLIP_FRAME_RATE, DEFAULT_PIVOT,
};
pub use validation::validate_job;
