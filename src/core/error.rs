//! Error types for the parser, merger, and store.
//!
//! None of these carry line contents: a malformed line may hold a secret,
//! so only its number is reported.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single line could not be interpreted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LineFault {
    #[error("key/value entry before any [profile] header")]
    OrphanEntry,
    #[error("expected `key = value` or `[profile]`")]
    MissingSeparator,
    #[error("profile header has an empty name")]
    EmptyName,
    #[error("entry has an empty key")]
    EmptyKey,
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// Why a profile cannot be written without changing its meaning on read-back.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldFault {
    #[error("profile name is empty")]
    EmptyName,
    #[error("entry has an empty key")]
    EmptyKey,
    #[error("key contains `=`")]
    SeparatorInKey,
    #[error("entry would read back as a [profile] header")]
    ReadsAsHeader,
    #[error("name, key or value contains a line break")]
    LineBreak,
    #[error("name, key or value has leading or trailing whitespace")]
    Padded,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("read credentials: {0}")]
    Io(#[from] io::Error),
    #[error("line {line_number}: {fault}")]
    MalformedLine { line_number: usize, fault: LineFault },
}

#[derive(Debug, Error)]
pub enum MergeError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("write merged credentials: {0}")]
    Write(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credentials directory not accessible: {}", path.display())]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("read {}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("write {}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: line {line_number}: {fault}", path.display())]
    MalformedLine {
        path: PathBuf,
        line_number: usize,
        fault: LineFault,
    },
    #[error("no backup found for {}", path.display())]
    BackupNotFound { path: PathBuf },
    #[error("profile {name:?} cannot be stored: {fault}")]
    Unrepresentable { name: String, fault: FieldFault },
}

impl StoreError {
    /// Attach a path to a parse failure; read errors become `ReadFailure`.
    pub(crate) fn from_parse(path: PathBuf, err: ParseError) -> Self {
        match err {
            ParseError::Io(source) => StoreError::ReadFailure { path, source },
            ParseError::MalformedLine { line_number, fault } => StoreError::MalformedLine {
                path,
                line_number,
                fault,
            },
        }
    }
}
