use thiserror::Error;

/// Wallet core error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Malformed hex/Base58/Base64 text or a buffer of the wrong length
    #[error("Invalid input format: {0}")]
    InputFormat(String),

    /// Base58Check checksum did not match the payload
    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        expected: String,
        actual: String,
    },

    /// Private key out of curve range, or bad WIF version/compression flag
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Elliptic-curve derivation, signing or recovery failed
    #[error("Crypto operation failed: {0}")]
    CryptoOperation(String),

    /// OS random source unavailable or short read
    #[error("Entropy source error: {0}")]
    EntropySource(String),
}

pub type Result<T> = std::result::Result<T, WalletError>;

impl From<hex::FromHexError> for WalletError {
    fn from(err: hex::FromHexError) -> Self {
        WalletError::InputFormat(format!("invalid hex: {}", err))
    }
}

impl From<rand::Error> for WalletError {
    fn from(err: rand::Error) -> Self {
        WalletError::EntropySource(err.to_string())
    }
}
