//! CLI command implementations.

pub mod config;
pub mod execute;
pub mod version;
