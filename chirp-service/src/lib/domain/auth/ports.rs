use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::Session;
use crate::domain::user::models::UserId;

/// Port for credential login and bearer-token authorization.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Internal` - Storage, hashing, or signing failure
    async fn login(&self, command: LoginCommand) -> Result<Session, AuthError>;

    /// Resolve an `Authorization` header value into a user id.
    ///
    /// # Errors
    /// * `MissingOrMalformedHeader` - Header absent or not `Bearer <token>`
    /// * `InvalidToken` - Signature, issuer, or subject rejected
    /// * `Expired` - Token lifetime has elapsed
    fn authorize(&self, header: Option<&str>) -> Result<UserId, AuthError>;
}
