//! Error types.
//!
//! The date, range, assignment and search modules never fail; bad input
//! degrades to `None`, `true` or a zero score. Errors only come from reading
//! data files and from the command line.

use std::path::PathBuf;

use thiserror::Error;
use timeline_types::EntityKind;

/// Failure while loading the data directory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data directory not found: {}", .0.display())]
    MissingDir(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("cannot walk data directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result type alias for command line operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by the `bible_timeline` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("no {kind} with id `{id}`")]
    NotFound { kind: EntityKind, id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
