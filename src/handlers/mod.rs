pub mod auth;
pub mod leaderboard;
pub mod play;
pub mod question;
pub mod quiz;
pub mod theme;
