use thiserror::Error;

/// Errors raised while logging a user in or authorizing a request.
///
/// Everything except `Internal` is the caller's fault and surfaces as 401.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Missing or malformed Authorization header")]
    MissingOrMalformedHeader,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    Expired,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Short label for log lines; never carries token material.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::MissingOrMalformedHeader => "missing_or_malformed_header",
            AuthError::InvalidToken(_) => "invalid_token",
            AuthError::Expired => "expired",
            AuthError::Internal(_) => "internal",
        }
    }
}

impl From<auth::AuthenticationError> for AuthError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            auth::AuthenticationError::MissingOrMalformedHeader => {
                AuthError::MissingOrMalformedHeader
            }
            auth::AuthenticationError::InvalidToken(reason) => AuthError::InvalidToken(reason),
            auth::AuthenticationError::Expired => AuthError::Expired,
            auth::AuthenticationError::Internal(reason) => AuthError::Internal(reason),
        }
    }
}
