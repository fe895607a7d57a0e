//! CLI command implementations

pub mod generate;
pub mod inspect;
pub mod json_output;
pub mod slice;
pub mod transfer;
pub mod validate;

mod reporting;
