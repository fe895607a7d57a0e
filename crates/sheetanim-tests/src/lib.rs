//! sheetanim End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the two user-facing flows:
//!
//! - **Generation**: sprite sheet + job file -> clip files + controller
//! - **Transfer**: controller -> controller parameter and transition copy
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sheetanim-tests
//! ```
//!
//! The CLI tests run the `sheetanim` binary through `cargo run`, so the first
//! run also builds the CLI.

pub mod fixtures;
pub mod harness;

pub use fixtures::{grid_sheet, write_rgb_png, CELL_SIZE, OPAQUE, TRANSPARENT};
pub use harness::{CliResult, TestHarness};
