use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpBodyError;
use crate::domain::chirp::errors::ChirpIdError;
use crate::domain::user::models::UserId;

/// A short public post authored by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: ChirpBody,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    /// Generate a new random chirp ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp body value type
///
/// Holds text that is non-empty, at most 140 characters, and already passed
/// through the profanity filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    pub const MAX_LENGTH: usize = 140;
    const PROFANE_WORDS: [&'static str; 3] = ["kerfuffle", "sharbert", "fornax"];
    const CENSORED: &'static str = "****";

    /// Create a validated, cleaned chirp body.
    ///
    /// # Errors
    /// * `Empty` - Body is empty
    /// * `TooLong` - Body is longer than 140 characters
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        if body.is_empty() {
            return Err(ChirpBodyError::Empty);
        }

        Self::clean(&body).map(Self)
    }

    /// Rebuild a body read back from storage, where it was already cleaned.
    pub fn from_stored(body: String) -> Self {
        Self(body)
    }

    /// Check the length limit and censor profane words.
    ///
    /// Words are split on single spaces and compared case-insensitively, so
    /// punctuation attached to a word keeps it from matching.
    ///
    /// # Errors
    /// * `TooLong` - Body is longer than 140 characters
    pub fn clean(body: &str) -> Result<String, ChirpBodyError> {
        let length = body.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        let cleaned = body
            .split(' ')
            .map(|word| {
                let lowered = word.to_lowercase();
                if Self::PROFANE_WORDS.contains(&lowered.as_str()) {
                    Self::CENSORED
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        Ok(cleaned)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a chirp on behalf of an authorized user
#[derive(Debug)]
pub struct CreateChirpCommand {
    pub body: ChirpBody,
    pub author: UserId,
}
