pub mod auth;
pub mod chirp;
pub mod user;
