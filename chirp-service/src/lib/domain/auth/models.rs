use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;

/// Credentials submitted to the login endpoint.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
    /// Requested token lifetime; clamped to one hour when absent or out of range
    pub expires_in_seconds: Option<i64>,
}

/// A logged-in user together with the access token issued for them.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
