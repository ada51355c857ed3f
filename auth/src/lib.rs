//! Authentication utilities library
//!
//! Provides the credential and token infrastructure for the chirp service:
//! - Password hashing (Argon2id) with a tunable work factor
//! - JWT issuance and validation bound to a user id
//! - Bearer token extraction from `Authorization` headers
//! - Authentication coordination
//!
//! Services define their own authentication ports and adapt these
//! implementations; nothing here knows about HTTP or storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let user_id = Uuid::new_v4();
//! let issued = handler.issue(user_id, Duration::minutes(10)).unwrap();
//! assert_eq!(handler.validate(&issued.token).unwrap(), user_id);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{effective_ttl, Authenticator};
//! use uuid::Uuid;
//!
//! let auth = Authenticator::from_secret(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let user_id = Uuid::new_v4();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth
//!     .authenticate("password123", &hash, user_id, effective_ttl(None))
//!     .unwrap();
//!
//! // Authorize a later request
//! let header = format!("Bearer {}", result.access_token);
//! assert_eq!(auth.authorize(Some(&header)).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::extract_bearer_token;
pub use bearer::BearerError;
pub use jwt::effective_ttl;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::MAX_TOKEN_TTL_SECONDS;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::WorkFactor;
