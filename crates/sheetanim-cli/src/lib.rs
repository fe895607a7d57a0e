//! sheetanim CLI library.
//!
//! This crate provides the command implementations behind the `sheetanim`
//! binary. Each command runs against a filesystem asset root and prints
//! either colored human output or a JSON document.

pub mod commands;
