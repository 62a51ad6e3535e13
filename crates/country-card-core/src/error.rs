// crates/country-card-core/src/error.rs
use thiserror::Error;

/// Errors produced by the country card core.
///
/// Rendering never returns this type: public output is always producible from
/// whatever attributes are persisted. Errors surface only at the edges (parsing
/// user input, loading files, talking to a post source).
#[derive(Debug, Error)]
pub enum CardError {
    /// A code that is not a key of the country table.
    #[error("Unknown country code: {0:?}")]
    UnknownCountry(String),

    /// Saved block markup that does not carry a readable block comment.
    #[error("Invalid block markup: {0}")]
    InvalidMarkup(String),

    /// The post source failed to answer a query.
    #[error("Post search failed: {0}")]
    Search(String),

    #[error("Block type already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CardError>;
