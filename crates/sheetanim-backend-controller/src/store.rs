//! Asset stores for clips and controllers.
//!
//! [`FsAssetStore`] persists JSON documents under an asset root on disk;
//! [`MemoryAssetStore`] keeps everything in memory. Both hand out unique clip
//! paths on collision (`idle.anim`, `idle_1.anim`, ...).

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use sheetanim_spec::{AnimationClip, Controller};

use crate::error::StoreError;
use crate::paths;

/// Persistence for generated assets. Paths are asset paths relative to the
/// store's root.
pub trait AssetStore {
    /// Creates a directory and its parents; existing directories are fine.
    fn create_directory(&mut self, path: &str) -> Result<(), StoreError>;

    /// Returns true if a file or directory exists at the path.
    fn exists(&self, path: &str) -> bool;

    /// Saves a clip at `path`, or at the first free `_n` variant of it.
    /// Returns the path actually written.
    fn save_clip(&mut self, clip: &AnimationClip, path: &str) -> Result<String, StoreError>;

    /// Creates and persists a fresh controller named after the file stem.
    fn create_controller(&mut self, path: &str) -> Result<Controller, StoreError>;

    fn load_controller(&self, path: &str) -> Result<Controller, StoreError>;

    fn save_controller(&mut self, path: &str, controller: &Controller) -> Result<(), StoreError>;

    /// Flushes pending writes.
    fn save_all(&mut self) -> Result<(), StoreError>;
}

fn check_path(path: &str) -> Result<(), StoreError> {
    match paths::asset_path_errors(path).into_iter().next() {
        Some(message) => Err(StoreError::UnsafePath(message)),
        None => Ok(()),
    }
}

fn check_clip(clip: &AnimationClip, path: &str) -> Result<(), StoreError> {
    clip.validate().map_err(|reason| StoreError::InvalidClip {
        path: path.to_string(),
        reason,
    })
}

/// Filesystem store rooted at an asset directory.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
    written: usize,
}

impl FsAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: 0,
        }
    }

    /// Filesystem path of an asset path.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        check_path(path)?;
        Ok(self.root.join(path))
    }

    fn write(&mut self, path: &str, contents: &str) -> Result<(), StoreError> {
        let full = self.resolve(path)?;
        if let Some(dir) = full.parent() {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: paths::parent(path).to_string(),
                source,
            })?;
        }
        std::fs::write(&full, contents).map_err(|source| StoreError::Io {
            path: path.to_string(),
            source,
        })?;
        self.written += 1;
        Ok(())
    }
}

impl AssetStore for FsAssetStore {
    fn create_directory(&mut self, path: &str) -> Result<(), StoreError> {
        let full = self.resolve(path)?;
        std::fs::create_dir_all(&full).map_err(|source| StoreError::Io {
            path: path.to_string(),
            source,
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.exists()).unwrap_or(false)
    }

    fn save_clip(&mut self, clip: &AnimationClip, path: &str) -> Result<String, StoreError> {
        check_path(path)?;
        check_clip(clip, path)?;
        let unique = paths::unique_path(path, |p| self.exists(p));
        let json = clip.to_json_pretty().map_err(|source| StoreError::Serialize {
            path: unique.clone(),
            source,
        })?;
        self.write(&unique, &json)?;
        log::info!("saved clip '{}' to {}", clip.name, unique);
        Ok(unique)
    }

    fn create_controller(&mut self, path: &str) -> Result<Controller, StoreError> {
        if self.exists(path) {
            log::warn!("replacing existing controller at {}", path);
        }
        let controller = Controller::new(paths::file_stem(path));
        self.save_controller(path, &controller)?;
        log::info!("created controller {}", path);
        Ok(controller)
    }

    fn load_controller(&self, path: &str) -> Result<Controller, StoreError> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Err(StoreError::NotFound(path.to_string()));
        }
        let json = std::fs::read_to_string(&full).map_err(|source| StoreError::Io {
            path: path.to_string(),
            source,
        })?;
        Controller::from_json(&json).map_err(|source| StoreError::Parse {
            path: path.to_string(),
            source,
        })
    }

    fn save_controller(&mut self, path: &str, controller: &Controller) -> Result<(), StoreError> {
        let json = controller
            .to_json_pretty()
            .map_err(|source| StoreError::Serialize {
                path: path.to_string(),
                source,
            })?;
        self.write(path, &json)
    }

    fn save_all(&mut self) -> Result<(), StoreError> {
        // Writes go straight to disk; nothing is buffered.
        log::debug!("{} asset(s) written under {}", self.written, self.root.display());
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetStore {
    directories: BTreeSet<String>,
    clips: BTreeMap<String, AnimationClip>,
    controllers: BTreeMap<String, Controller>,
    flushes: usize,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clip(&self, path: &str) -> Option<&AnimationClip> {
        self.clips.get(path)
    }

    /// Clip paths in sorted order.
    pub fn clip_paths(&self) -> impl Iterator<Item = &str> {
        self.clips.keys().map(String::as_str)
    }

    pub fn controller(&self, path: &str) -> Option<&Controller> {
        self.controllers.get(path)
    }

    /// Inserts a controller directly, e.g. a template prepared by a test.
    pub fn insert_controller(&mut self, path: impl Into<String>, controller: Controller) {
        self.controllers.insert(path.into(), controller);
    }

    /// Number of `save_all` calls.
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl AssetStore for MemoryAssetStore {
    fn create_directory(&mut self, path: &str) -> Result<(), StoreError> {
        check_path(path)?;
        let mut current = path.trim_end_matches('/');
        while !current.is_empty() {
            self.directories.insert(current.to_string());
            current = paths::parent(current);
        }
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.clips.contains_key(path)
            || self.controllers.contains_key(path)
            || self.directories.contains(path)
    }

    fn save_clip(&mut self, clip: &AnimationClip, path: &str) -> Result<String, StoreError> {
        check_path(path)?;
        check_clip(clip, path)?;
        let unique = paths::unique_path(path, |p| self.exists(p));
        self.clips.insert(unique.clone(), clip.clone());
        Ok(unique)
    }

    fn create_controller(&mut self, path: &str) -> Result<Controller, StoreError> {
        let controller = Controller::new(paths::file_stem(path));
        self.save_controller(path, &controller)?;
        Ok(controller)
    }

    fn load_controller(&self, path: &str) -> Result<Controller, StoreError> {
        self.controllers
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    fn save_controller(&mut self, path: &str, controller: &Controller) -> Result<(), StoreError> {
        check_path(path)?;
        self.controllers.insert(path.to_string(), controller.clone());
        Ok(())
    }

    fn save_all(&mut self) -> Result<(), StoreError> {
        self.flushes += 1;
        Ok(())
    }
}
