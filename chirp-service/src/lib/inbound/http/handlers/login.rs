use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::required_field;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::Session;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;

    let command = body.try_into_command()?;

    state
        .auth_service
        .login(command)
        .await
        .map_err(|e| {
            tracing::warn!(reason = e.kind(), "Login rejected");
            ApiError::from(e)
        })
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    expires_in_seconds: Option<i64>,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        let email = required_field(self.email, "email")?;
        let password = required_field(self.password, "password")?;

        // An address that cannot be valid cannot belong to any user
        let email =
            EmailAddress::new(email).map_err(|_| ApiError::from(AuthError::InvalidCredentials))?;

        Ok(LoginCommand {
            email,
            password,
            expires_in_seconds: self.expires_in_seconds,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub token: String,
}

impl From<&Session> for LoginResponseData {
    fn from(session: &Session) -> Self {
        Self {
            id: session.user.id.to_string(),
            created_at: session.user.created_at,
            updated_at: session.user.updated_at,
            email: session.user.email.as_str().to_string(),
            token: session.token.clone(),
        }
    }
}
