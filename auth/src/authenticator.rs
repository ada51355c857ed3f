use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::bearer::extract_bearer_token;
use crate::bearer::BearerError;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT handling.
///
/// Provides the two operations request handlers need: turning credentials
/// into a token, and turning an `Authorization` header back into a user id.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Instant the access token stops being valid
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
///
/// Every variant except `Internal` is a client-side failure and maps to an
/// unauthorized response; the variants stay distinct for logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
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

impl From<PasswordError> for AuthenticationError {
    fn from(err: PasswordError) -> Self {
        AuthenticationError::Internal(err.to_string())
    }
}

impl From<JwtError> for AuthenticationError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => AuthenticationError::Expired,
            JwtError::InvalidToken(_) | JwtError::InvalidSubject(_) => {
                AuthenticationError::InvalidToken(err.to_string())
            }
            JwtError::MissingSecret | JwtError::EncodingFailed(_) => {
                AuthenticationError::Internal(err.to_string())
            }
        }
    }
}

impl From<BearerError> for AuthenticationError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::MissingOrMalformedHeader => AuthenticationError::MissingOrMalformedHeader,
        }
    }
}

impl Authenticator {
    /// Create a new authenticator from already configured parts.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher carrying the configured work factor
    /// * `jwt_handler` - Token handler holding the signing secret
    pub fn new(password_hasher: PasswordHasher, jwt_handler: JwtHandler) -> Self {
        Self {
            password_hasher,
            jwt_handler,
        }
    }

    /// Create an authenticator with default hashing costs.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    pub fn from_secret(jwt_secret: &[u8]) -> Result<Self, JwtError> {
        Ok(Self::new(PasswordHasher::new(), JwtHandler::new(jwt_secret)?))
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Password too long or hashing failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a JWT for the user.
    ///
    /// CPU-bound: verification runs the full Argon2 cost.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - User the token is issued for
    /// * `ttl` - Token lifetime
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Internal` - Stored hash is corrupt or token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: Uuid,
        ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let issued = self.jwt_handler.issue(user_id, ttl)?;
        let expires_at = issued.expires_at().ok_or_else(|| {
            AuthenticationError::Internal("Token expiry out of range".to_string())
        })?;

        Ok(AuthenticationResult {
            access_token: issued.token,
            expires_at,
        })
    }

    /// Spend a full verification on a login whose email matched no user.
    ///
    /// Runs the hasher against its placeholder hash so an unknown email takes
    /// as long as a wrong password for a known one. CPU-bound.
    ///
    /// # Returns
    /// * `InvalidCredentials` - Always, unless the placeholder fails to verify
    /// * `Internal` - Placeholder hash was rejected by the verifier
    pub fn reject_unknown_user(&self, password: &str) -> AuthenticationError {
        let placeholder = self.password_hasher.placeholder_hash();

        match self.password_hasher.verify(password, &placeholder) {
            Ok(_) => AuthenticationError::InvalidCredentials,
            Err(err) => AuthenticationError::from(err),
        }
    }

    /// Resolve an `Authorization` header value into the user it authorizes.
    ///
    /// # Arguments
    /// * `header` - Raw header value, `None` if absent
    ///
    /// # Errors
    /// * `MissingOrMalformedHeader` - Header absent or not `Bearer <token>`
    /// * `InvalidToken` - Bad signature, wrong issuer, or unparsable subject
    /// * `Expired` - Token lifetime has elapsed
    pub fn authorize(&self, header: Option<&str>) -> Result<Uuid, AuthenticationError> {
        let token = extract_bearer_token(header)?;
        self.validate_token(token)
    }

    /// Validate a raw JWT and return its user id.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, wrong issuer, or unparsable subject
    /// * `Expired` - Token lifetime has elapsed
    pub fn validate_token(&self, token: &str) -> Result<Uuid, AuthenticationError> {
        Ok(self.jwt_handler.validate(token)?)
    }
}
