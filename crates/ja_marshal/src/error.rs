use alloc::string::String;

use ja_tag::TagError;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Errors raised while building a document.
///
/// All of them abort the whole top-level call, no partial payload is
/// returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MarshalError {
    #[error("bad jsonapi field descriptor: {0}")]
    BadFieldSpec(#[from] TagError),

    #[error("id should be either a string or an integer, found {found}")]
    BadPrimaryKeyType { found: &'static str },

    #[error("models should be a homogeneous sequence of resources: `{found}` follows `{expected}`")]
    ExpectedSequence { expected: String, found: String },

    #[error("invalid timestamp literal `{0}`")]
    BadTimestamp(String),

    #[error("relationships nested deeper than the configured limit of {0}")]
    DepthExceeded(usize),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias of this crate.
pub type Result<T, E = MarshalError> = core::result::Result<T, E>;
