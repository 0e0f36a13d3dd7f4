pub mod db;
pub mod extractors;
pub mod game;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod services;

use axum::Router;

use db::Db;
use services::{auth::AuthService, play::PlayService};

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub auth: AuthService,
    pub play: PlayService,
}

impl AppState {
    pub fn new(db: Db) -> Self {
        Self {
            auth: AuthService::new(db.clone()),
            play: PlayService::new(db.clone()),
            db,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::auth::routes())
        .merge(handlers::theme::routes())
        .merge(handlers::question::routes())
        .merge(handlers::quiz::routes())
        .merge(handlers::play::routes())
        .merge(handlers::leaderboard::routes())
        .with_state(state)
}
