//! Error types for the challenge engine and the embedded catalogs.

use thiserror::Error;

/// A configuration the engine refuses to start with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("item pool is empty")]
    EmptyPool,

    #[error("option count must be at least {min}, got {got}")]
    TooFewOptions { got: usize, min: usize },

    #[error("option count must be at most {max}, got {got}")]
    TooManyOptions { got: usize, max: usize },

    #[error("time limit must be greater than zero")]
    ZeroTimeLimit,

    #[error("question limit must be greater than zero")]
    ZeroQuestionLimit,

    #[error("reverse direction requested but reverse mode is not supported")]
    ReverseUnsupported,
}

/// Errors raised while reading or filtering an embedded catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file {0} not found")]
    MissingFile(String),

    #[error("catalog file {0} is not valid utf-8")]
    NotUtf8(String),

    #[error("malformed catalog {name}: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown kana group {0}")]
    UnknownGroup(usize),

    #[error("no {0} entries for the selected levels")]
    EmptySelection(&'static str),
}
