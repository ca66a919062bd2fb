//! Error types for reqcheck.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid command-line configuration. Raised before the engine is touched.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Only part of the single-request triplet was supplied
    #[error("url, context, and type must be either all provided or none provided")]
    PartialRequest,

    /// A single request was given alongside a record file
    #[error("--requests cannot be combined with url, context, and type (got '{}')", .0.display())]
    ConflictingSource(PathBuf),

    /// A rule file could not be read
    #[error("failed to read rules '{}': {source}", .path.display())]
    ReadRules {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record file could not be opened
    #[error("failed to open requests '{}': {source}", .path.display())]
    OpenRequests {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Broken record stream, or results that could not be written. Aborts the
/// whole run.
#[derive(Error, Debug)]
pub enum StreamError {
    /// Line is not valid UTF-8
    #[error("line {line}: invalid UTF-8 ({source}): {raw}")]
    Encoding {
        line: usize,
        /// Line with invalid sequences replaced
        raw: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Line is not valid JSON
    #[error("line {line}: invalid JSON ({source}): {raw}")]
    Syntax {
        line: usize,
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// Line is JSON but lacks a string `url`, `type` or `context`
    #[error("line {line}: record must contain string keys \"url\", \"type\", and \"context\": {raw}")]
    MissingKeys { line: usize, raw: String },

    /// Result could not be encoded
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),

    /// Reading records or writing results failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The engine could not evaluate a well-formed record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("engine rejected request: {0}")]
    InvalidRequest(String),
}

/// Token outside both request type vocabularies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown request type: {0}")]
pub struct UnknownType(pub String);

/// Fatal error for a run.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// Result type alias for reqcheck runs.
pub type Result<T> = std::result::Result<T, CheckError>;
