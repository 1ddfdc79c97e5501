// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::ast::{Field, Kind};

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Parse error in {origin} at line {line}")]
    Parse { origin: String, line: usize },

    #[error("Field {field:?} is not declared for {kind:?} nodes")]
    Schema { kind: Kind, field: Field },

    #[error("Malformed AST encoding: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Submission already stored for {owner} (lab {lab})")]
    Duplicate { owner: String, lab: u32 },

    #[error("No submission stored for {owner} (lab {lab})")]
    NotFound { owner: String, lab: u32 },

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid exclude pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

// Allow `?` on std::io::Error by converting to Error::Io with unknown path.
impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for Error {
    fn from(e: walkdir::Error) -> Self {
        Error::Other(e.to_string())
    }
}

impl Error {
    /// Attaches a path to an I/O error.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Error::Io {
            source,
            path: path.into(),
        }
    }
}
