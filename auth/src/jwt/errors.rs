use thiserror::Error;

/// Error type for JWT operations.
///
/// Decoding failures (bad signature, malformed structure, expiry) all surface
/// as `InvalidToken`; the message is for logs only.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid token lifetime: {0}")]
    InvalidLifetime(String),
}
