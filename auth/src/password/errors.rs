use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password too long: maximum {max} bytes, got {actual}")]
    PasswordTooLong { max: usize, actual: usize },

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    #[error("Invalid work factor: {0}")]
    InvalidWorkFactor(String),
}
