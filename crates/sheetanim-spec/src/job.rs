//! Generation job files.
//!
//! A job is the JSON document a caller hands to the generator: where the
//! controller lives, which sheet(s) to slice, and how animations are defined.
//!
//! ```json
//! {
//!   "controller": { "kind": "new", "directory": "Animations/Hero", "name": "Hero" },
//!   "template": { "path": "Animations/Base.controller", "mode": "full" },
//!   "sheets": {
//!     "mode": "single",
//!     "sheet": "Sprites/hero.png",
//!     "rows": 2,
//!     "columns": 4,
//!     "animations": { "automatic": [ { "name": "idle", "loop": true }, { "name": "walk" } ] }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::sprite::{
    build_animation_specs_automatic, build_animation_specs_manual, AnimationSpec,
    AutomaticAnimation, BindingTarget, ManualAnimation, DEFAULT_PIVOT,
};

/// Default directory for fresh controllers.
pub const DEFAULT_CONTROLLER_DIRECTORY: &str = "Animations";

/// Default name for fresh controllers.
pub const DEFAULT_CONTROLLER_NAME: &str = "SpriteAnimatorController";

/// A complete generation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationJob {
    /// Controller to add states to.
    #[serde(default)]
    pub controller: ControllerTarget,

    /// Optional template controller to import parameters (and more) from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateSource>,

    /// Component the generated clips animate.
    #[serde(default)]
    pub binding: BindingTarget,

    /// Drop fully transparent frames before assembling clips.
    #[serde(default = "default_filter_empty")]
    pub filter_empty: bool,

    /// Sheet(s) to slice.
    pub sheets: SheetSource,
}

fn default_filter_empty() -> bool {
    true
}

/// Where generated states go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControllerTarget {
    /// Create `{directory}/{name}.controller`.
    New {
        #[serde(default = "default_directory")]
        directory: String,
        #[serde(default = "default_controller_name")]
        name: String,
        /// Nest the controller and its clips in `{directory}/{name}/`.
        #[serde(default)]
        create_subfolder: bool,
    },
    /// Reuse an existing controller asset.
    Existing {
        path: String,
        /// Clip directory; defaults to the controller's own directory.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        save_path: Option<String>,
    },
}

fn default_directory() -> String {
    DEFAULT_CONTROLLER_DIRECTORY.to_string()
}

fn default_controller_name() -> String {
    DEFAULT_CONTROLLER_NAME.to_string()
}

impl Default for ControllerTarget {
    fn default() -> Self {
        ControllerTarget::New {
            directory: default_directory(),
            name: default_controller_name(),
            create_subfolder: false,
        }
    }
}

/// How much of a template controller is imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateMode {
    /// Parameters only.
    #[default]
    Parameters,
    /// Parameters, transitions, any-state transitions, positions and default
    /// state, creating missing states.
    Full,
}

/// Template controller reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSource {
    pub path: String,
    #[serde(default)]
    pub mode: TemplateMode,
}

/// Sheets to slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SheetSource {
    /// One sheet, several animations.
    Single(SingleSheet),
    /// Several sheets, one animation each.
    Multiple { entries: Vec<MultiSheetEntry> },
}

/// A single sheet with grid and animation definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleSheet {
    /// Asset path of the sheet image.
    pub sheet: String,
    #[serde(default = "default_grid")]
    pub rows: u32,
    #[serde(default = "default_grid")]
    pub columns: u32,
    /// Pivot applied to every slice.
    #[serde(default = "default_pivot")]
    pub pivot: [f64; 2],
    pub animations: AnimationDefinitions,
}

/// Animation definitions of a single sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationDefinitions {
    /// One animation per row, index-aligned.
    Automatic(Vec<AutomaticAnimation>),
    /// Explicit 1-based frame ranges.
    Manual(Vec<ManualAnimation>),
}

impl AnimationDefinitions {
    pub fn len(&self) -> usize {
        match self {
            AnimationDefinitions::Automatic(v) => v.len(),
            AnimationDefinitions::Manual(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One sheet of a multi-sheet batch; all of its frames form one clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSheetEntry {
    pub name: String,
    pub sheet: String,
    #[serde(default = "default_grid")]
    pub rows: u32,
    #[serde(default = "default_grid")]
    pub columns: u32,
    #[serde(default = "default_pivot")]
    pub pivot: [f64; 2],
    #[serde(default, rename = "loop")]
    pub looping: bool,
}

fn default_grid() -> u32 {
    1
}

fn default_pivot() -> [f64; 2] {
    DEFAULT_PIVOT
}

impl SingleSheet {
    /// Converts the definitions into animation specs.
    pub fn animation_specs(&self) -> Vec<AnimationSpec> {
        match &self.animations {
            AnimationDefinitions::Automatic(rows) => {
                let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
                let loops: Vec<bool> = rows.iter().map(|r| r.looping).collect();
                build_animation_specs_automatic(&names, &loops, self.columns)
            }
            AnimationDefinitions::Manual(entries) => build_animation_specs_manual(entries),
        }
    }
}

impl GenerationJob {
    /// Parses a job from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a job file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serializes the job to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::FrameRange;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_minimal_single_sheet_job() {
        let json = r#"{
            "sheets": {
                "mode": "single",
                "sheet": "Sprites/hero.png",
                "rows": 2,
                "columns": 3,
                "animations": { "automatic": [ { "name": "idle", "loop": true }, { "name": "walk" } ] }
            }
        }"#;
        let job = GenerationJob::from_json(json).unwrap();

        assert_eq!(job.controller, ControllerTarget::default());
        assert!(job.filter_empty);
        assert_eq!(job.binding, BindingTarget::SpriteRenderer);
        assert!(job.template.is_none());

        let SheetSource::Single(sheet) = &job.sheets else {
            panic!("expected single sheet");
        };
        assert_eq!(sheet.pivot, [0.5, 0.5]);
        let specs = sheet.animation_specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].frames, FrameRange::new(3, 5));
        assert!(specs[0].looping);
    }

    #[test]
    fn parse_manual_existing_controller_job() {
        let json = r#"{
            "controller": { "kind": "existing", "path": "Anim/Hero.controller", "save_path": "Anim/Clips" },
            "template": { "path": "Anim/Base.controller", "mode": "full" },
            "binding": "image",
            "filter_empty": false,
            "sheets": {
                "mode": "single",
                "sheet": "hero.png",
                "rows": 1,
                "columns": 10,
                "animations": { "manual": [ { "name": "attack", "start_frame": 3, "end_frame": 5 } ] }
            }
        }"#;
        let job = GenerationJob::from_json(json).unwrap();
        assert_eq!(
            job.controller,
            ControllerTarget::Existing {
                path: "Anim/Hero.controller".to_string(),
                save_path: Some("Anim/Clips".to_string()),
            }
        );
        assert_eq!(job.template.as_ref().unwrap().mode, TemplateMode::Full);
        assert_eq!(job.binding, BindingTarget::Image);
        assert!(!job.filter_empty);

        let SheetSource::Single(sheet) = &job.sheets else {
            panic!("expected single sheet");
        };
        assert_eq!(sheet.animation_specs()[0].frames, FrameRange::new(2, 4));
    }

    #[test]
    fn parse_multi_sheet_job() {
        let json = r#"{
            "controller": { "kind": "new", "name": "Fx", "create_subfolder": true },
            "sheets": {
                "mode": "multiple",
                "entries": [
                    { "name": "explode", "sheet": "fx/explode.png", "rows": 2, "columns": 4, "loop": false },
                    { "name": "smoke", "sheet": "fx/smoke.png", "columns": 8, "pivot": [0.5, 0.0], "loop": true }
                ]
            }
        }"#;
        let job = GenerationJob::from_json(json).unwrap();
        let SheetSource::Multiple { entries } = &job.sheets else {
            panic!("expected multiple sheets");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].rows, 1);
        assert_eq!(entries[1].pivot, [0.5, 0.0]);
        assert!(entries[1].looping);
        assert_eq!(
            job.controller,
            ControllerTarget::New {
                directory: DEFAULT_CONTROLLER_DIRECTORY.to_string(),
                name: "Fx".to_string(),
                create_subfolder: true,
            }
        );
    }

    #[test]
    fn unknown_top_level_field_rejected() {
        let json = r#"{ "sheets": { "mode": "multiple", "entries": [] }, "extra": 1 }"#;
        assert!(GenerationJob::from_json(json).is_err());
    }

    #[test]
    fn job_json_roundtrip() {
        let job = GenerationJob {
            controller: ControllerTarget::default(),
            template: None,
            binding: BindingTarget::Image,
            filter_empty: true,
            sheets: SheetSource::Multiple {
                entries: vec![MultiSheetEntry {
                    name: "a".to_string(),
                    sheet: "a.png".to_string(),
                    rows: 1,
                    columns: 2,
                    pivot: [0.5, 0.5],
                    looping: false,
                }],
            },
        };
        let json = job.to_json_pretty().unwrap();
        assert_eq!(GenerationJob::from_json(&json).unwrap(), job);
    }
}
