use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::Session;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Login and authorization backed by the user store.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    // Unknown emails pay the same Argon2 cost as a wrong password
    async fn reject_unknown_user(&self, password: String) -> AuthError {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.reject_unknown_user(&password))
            .await
            .map(AuthError::from)
            .unwrap_or_else(|e| {
                AuthError::Internal(format!("Credential check task failed: {}", e))
            })
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, AuthError> {
        let found = self
            .repository
            .find_by_email(&command.email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let Some(user) = found else {
            return Err(self.reject_unknown_user(command.password).await);
        };

        let ttl = auth::effective_ttl(command.expires_in_seconds);
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash = user.password_hash.clone();
        let user_id = user.id.0;

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &password_hash, user_id, ttl)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Credential check task failed: {}", e)))?
        .map_err(AuthError::from)?;

        tracing::info!(user_id = %user.id, expires_at = %result.expires_at, "User logged in");

        Ok(Session {
            user,
            token: result.access_token,
            expires_at: result.expires_at,
        })
    }

    fn authorize(&self, header: Option<&str>) -> Result<UserId, AuthError> {
        self.authenticator
            .authorize(header)
            .map(UserId)
            .map_err(AuthError::from)
    }
}
