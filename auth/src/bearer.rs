use thiserror::Error;

/// Authorization scheme accepted by [`extract_bearer_token`].
pub const BEARER_SCHEME: &str = "Bearer";

/// Error type for bearer header parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Missing or malformed Authorization header")]
    MissingOrMalformedHeader,
}

/// Extract the token from an `Authorization` header value.
///
/// The value must be exactly two space-separated fields, the first being the
/// literal `Bearer` scheme and the second a non-empty token.
///
/// # Arguments
/// * `header` - Raw header value, `None` if the header is absent
///
/// # Returns
/// The token field, borrowed from the header value
///
/// # Errors
/// * `MissingOrMalformedHeader` - Header absent or not of the form `Bearer <token>`
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, BearerError> {
    let header = header.ok_or(BearerError::MissingOrMalformedHeader)?;

    let mut fields = header.split(' ');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(BearerError::MissingOrMalformedHeader),
    }
}
