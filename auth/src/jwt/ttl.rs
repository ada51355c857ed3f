use chrono::Duration;

/// Longest lifetime an access token may have.
pub const MAX_TOKEN_TTL_SECONDS: i64 = 3600;

/// Longest lifetime an access token may have, as a duration.
pub fn max_token_ttl() -> Duration {
    Duration::seconds(MAX_TOKEN_TTL_SECONDS)
}

/// Resolve a client-requested lifetime into the lifetime actually issued.
///
/// Absent, non-positive, or over-ceiling requests fall back to the ceiling.
pub fn effective_ttl(requested_seconds: Option<i64>) -> Duration {
    match requested_seconds {
        Some(seconds) if seconds > 0 && seconds <= MAX_TOKEN_TTL_SECONDS => {
            Duration::seconds(seconds)
        }
        _ => max_token_ttl(),
    }
}
