//! Helpers shared by the workspace crates: environment lookup and config files.

pub mod config;
pub mod env;
