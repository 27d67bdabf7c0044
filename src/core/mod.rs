//! Core logic: the credentials codec, merging, backups, and the store.

pub mod backup;
pub mod credstore;
pub mod error;
pub mod merger;
pub mod parser;
pub mod paths;
pub mod project;
pub mod serializer;
