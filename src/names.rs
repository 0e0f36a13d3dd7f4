pub const USER_SESSION_COOKIE_NAME: &str = "user_session";

/// How many players a leaderboard returns, global or per quiz.
pub const LEADERBOARD_SIZE: i64 = 10;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn cookie(name: &str, value: &str) -> String {
    format!("{name}={value}; HttpOnly; Max-Age=3600; Secure; Path=/; SameSite=Strict")
}

pub fn clear_cookie(name: &str) -> String {
    format!("{name}=; HttpOnly; Max-Age=0; Secure; Path=/; SameSite=Strict")
}
