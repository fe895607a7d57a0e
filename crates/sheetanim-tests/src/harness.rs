//! Test harness owning a temporary asset root.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;
use tempfile::TempDir;

use sheetanim_backend_controller::{AssetStore, FsAssetStore};
use sheetanim_backend_sprite::{Bitmap, FsBitmapSource};
use sheetanim_spec::{AnimationClip, Controller};

/// Result of running the sheetanim CLI.
#[derive(Debug)]
pub struct CliResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Create a CliResult from a Command Output.
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Assert that the command succeeded.
    pub fn assert_success(&self) {
        assert!(
            self.success,
            "Command failed with exit code {}.\nstdout: {}\nstderr: {}",
            self.exit_code, self.stdout, self.stderr
        );
    }

    /// Assert that the command failed.
    pub fn assert_failure(&self) {
        assert!(
            !self.success,
            "Expected command to fail, but it succeeded.\nstdout: {}",
            self.stdout
        );
    }

    /// Parse stdout as the JSON document printed by `--json`.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}): {}", e, self.stdout))
    }
}

/// A temporary asset root plus helpers to populate and read it.
pub struct TestHarness {
    /// Asset root for sheets, jobs, clips and controllers.
    pub work_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
        }
    }

    /// Get the asset root path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Asset root as a string, for APIs and CLI arguments that take `&str`.
    pub fn root(&self) -> &str {
        self.path().to_str().expect("temp dir path is not UTF-8")
    }

    /// Filesystem store over the asset root.
    pub fn store(&self) -> FsAssetStore {
        FsAssetStore::new(self.path())
    }

    /// Bitmap source over the asset root.
    pub fn bitmaps(&self) -> FsBitmapSource {
        FsBitmapSource::new(self.path())
    }

    /// Encode `bitmap` as PNG at the asset path `rel`.
    pub fn write_sheet(&self, rel: &str, bitmap: &Bitmap) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create sheet directory");
        }
        let bytes = bitmap.to_png_bytes().expect("Failed to encode sheet");
        fs::write(&path, bytes).expect("Failed to write sheet");
        path
    }

    /// Write a job file at the asset path `rel`.
    pub fn write_job(&self, rel: &str, job: &serde_json::Value) -> PathBuf {
        let path = self.path().join(rel);
        let json = serde_json::to_string_pretty(job).expect("Failed to serialize job");
        fs::write(&path, json).expect("Failed to write job");
        path
    }

    /// Save a controller at the asset path `rel`.
    pub fn write_controller(&self, rel: &str, controller: &Controller) {
        self.store()
            .save_controller(rel, controller)
            .expect("Failed to save controller");
    }

    /// Load the controller at the asset path `rel`.
    pub fn read_controller(&self, rel: &str) -> Controller {
        self.store()
            .load_controller(rel)
            .unwrap_or_else(|e| panic!("Failed to load controller {}: {}", rel, e))
    }

    /// Load the clip at the asset path `rel`.
    pub fn read_clip(&self, rel: &str) -> AnimationClip {
        let json = fs::read_to_string(self.path().join(rel))
            .unwrap_or_else(|e| panic!("Failed to read clip {}: {}", rel, e));
        AnimationClip::from_json(&json)
            .unwrap_or_else(|e| panic!("Failed to parse clip {}: {}", rel, e))
    }

    /// Whether an asset exists at `rel`.
    pub fn exists(&self, rel: &str) -> bool {
        self.path().join(rel).exists()
    }

    /// Run the sheetanim CLI with the given arguments.
    ///
    /// The asset root is the working directory, so `--root` can be omitted.
    pub fn run_cli(&self, args: &[&str]) -> CliResult {
        let manifest_path = sheetanim_manifest_path();

        let output = Command::new("cargo")
            .args(["run", "--quiet", "--manifest-path"])
            .arg(&manifest_path)
            .args(["-p", "sheetanim-cli", "--bin", "sheetanim", "--"])
            .args(args)
            .current_dir(self.path())
            .output();

        match output {
            Ok(out) => CliResult::from_output(out),
            Err(e) => CliResult {
                success: false,
                exit_code: -1,
                stdout: String::new(),
                stderr: format!("Failed to run CLI: {}", e),
            },
        }
    }
}

fn sheetanim_manifest_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let manifest_path = manifest_dir.join("..").join("..").join("Cargo.toml");
        manifest_path.canonicalize().unwrap_or(manifest_path)
    })
    .clone()
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
