//! AWS-style credentials file management.
//!
//! Reads and rewrites an INI-like credentials store of named profiles,
//! replacing or appending one profile at a time behind a numbered backup.
//!
//! ## Modules
//! - `cli` — Command-line handlers and prompt collaborators
//! - `core` — Parser, serializer, merger, backups, and the store itself
//! - `models` — Data structures
//! - `util` — Filesystem helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod util;
