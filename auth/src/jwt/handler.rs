use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::claims::ISSUER;
use super::errors::JwtError;
use super::ttl::max_token_ttl;

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

impl IssuedToken {
    /// Expiration of the issued token.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims.expires_at()
    }
}

/// JWT token handler for issuing and validating access tokens.
///
/// Uses HS256 (HMAC with SHA-256). The secret is fixed at construction and
/// shared by the issue and validate paths.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Issue a signed token for a user.
    ///
    /// A `ttl` above the one-hour ceiling is clamped to the ceiling. A zero or
    /// negative `ttl` is honoured as-is and yields a token that is already
    /// expired.
    ///
    /// # Arguments
    /// * `user_id` - Subject of the token
    /// * `ttl` - Requested lifetime
    ///
    /// # Errors
    /// * `EncodingFailed` - Token serialization or signing failed
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<IssuedToken, JwtError> {
        let ttl = ttl.min(max_token_ttl());
        let claims = Claims::for_user(user_id, Utc::now(), ttl)
            .ok_or_else(|| JwtError::EncodingFailed("Token expiry out of range".to_string()))?;

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }

    /// Validate a token and return the user it was issued for.
    ///
    /// Checks, in order: signature, issuer, expiry, subject.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, its signature does not match, or the issuer is wrong
    /// * `TokenExpired` - Current time is at or past the `exp` claim
    /// * `InvalidSubject` - Subject does not parse as a user id
    pub fn validate(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.decode(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        claims
            .user_id()
            .map_err(|e| JwtError::InvalidSubject(e.to_string()))
    }

    /// Decode a token after checking its signature and issuer.
    ///
    /// Expiry and subject are not checked here; use [`JwtHandler::validate`]
    /// for authorization decisions.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, its signature does not match, or the issuer is wrong
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        // Expiry is checked by `validate` without leeway
        validation.validate_exp = false;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}
