//! Error types for the lattice wallet core.

use thiserror::Error;

/// Core errors raised by codecs, key handling, amounts and block hashing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Wrong-length key or seed, non-hex text, bad base32 length or alphabet.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Amount that cannot be represented (too many decimals, negative, too wide).
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    /// Syntactically valid address whose prefix or checksum does not match.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl CoreError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        CoreError::MalformedInput(msg.into())
    }
}

impl From<hex::FromHexError> for CoreError {
    fn from(e: hex::FromHexError) -> Self {
        CoreError::MalformedInput(e.to_string())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
