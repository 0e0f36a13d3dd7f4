pub mod auth;
pub mod play;
