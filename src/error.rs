//! Crate error type
//!
//! Only setup-time failures surface as errors. Runtime state errors (stale
//! entity ids, double removal) are silent no-ops inside the simulation.

use thiserror::Error;

/// Errors surfaced to the caller
#[derive(Debug, Error)]
pub enum Error {
    /// A map element lacks an attribute its kind requires
    #[error("map element <{tag}> is missing attribute `{attribute}`")]
    MissingAttribute { tag: String, attribute: String },

    /// A numeric attribute could not be parsed
    #[error("map attribute `{attribute}` has invalid number `{value}`")]
    InvalidNumber { attribute: String, value: String },

    /// A polygon `points` list is malformed
    #[error("map polygon has malformed points `{0}`")]
    InvalidPoints(String),

    /// The element kind is not one the factory can build
    #[error("unknown map element kind `{kind}` on <{tag}>")]
    UnknownKind { tag: String, kind: String },

    #[error("map has no start marker")]
    MissingStart,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
