//! sheetanim Controller Backend
//!
//! This crate turns sliced sprite sheets into clip assets and controller
//! states, and moves parameters and transitions between controllers.
//!
//! # Features
//!
//! - **Asset stores**: filesystem and in-memory persistence with unique clip paths
//! - **State-machine builder**: one saved clip and one state per animation spec
//! - **Template seeding**: parameter-only or full imports from a template controller
//! - **Transfer engine**: name-matched copy of parameters, transitions, positions
//!   and default states, in lenient or strict mode
//! - **Job runner**: single-sheet and multi-sheet generation jobs end to end
//!
//! # Example
//!
//! ```
//! use sheetanim_backend_controller::{
//!     transfer_between_controllers, TransferMode, TransferOptions,
//! };
//! use sheetanim_spec::{Controller, ParameterType};
//!
//! let mut source = Controller::new("source");
//! source.add_parameter("speed", ParameterType::Float);
//! let mut destination = Controller::new("destination");
//!
//! let options = TransferOptions {
//!     mode: TransferMode::Strict,
//!     reset_destination_first: false,
//! };
//! let report = transfer_between_controllers(&source, &mut destination, &options);
//! assert_eq!(report.parameters_copied, 1);
//! ```

pub mod builder;
pub mod error;
pub mod job;
pub mod paths;
pub mod store;
pub mod template;
pub mod transfer;

pub use builder::{
    clip_hash, generate_clips_and_states, prepare_existing_controller, prepare_new_controller,
    resolve_save_directory, GenerateOptions, PreparedController,
};
pub use error::{ControllerError, StoreError};
pub use job::run_job;
pub use store::{AssetStore, FsAssetStore, MemoryAssetStore};
pub use template::seed_from_template;
pub use transfer::{
    copy_parameters, fallback_position, transfer_between_assets, transfer_between_controllers,
    TransferMode, TransferOptions,
};
