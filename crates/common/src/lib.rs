//! Shared helpers for the todo workspace: logging setup, runtime
//! environment checks and small response types used across crates.

pub mod env;
pub mod types;
pub mod utils;
