pub mod claims;
pub mod errors;
pub mod handler;
pub mod ttl;

pub use claims::Claims;
pub use claims::ISSUER;
pub use errors::JwtError;
pub use handler::IssuedToken;
pub use handler::JwtHandler;
pub use ttl::effective_ttl;
pub use ttl::MAX_TOKEN_TTL_SECONDS;
