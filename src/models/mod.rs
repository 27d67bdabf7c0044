//! Data structures shared by the store and the CLI.

pub mod profile;
pub mod project_config;
