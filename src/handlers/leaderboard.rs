use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::{
    extractors::AuthGuard,
    game, names,
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/quizzes/hall-of-fame/global", get(global_hall_of_fame))
        .route("/api/quizzes/hall-of-fame/{id}", get(quiz_hall_of_fame))
}

/// Top players across all quizzes with their per-quiz breakdown. Reads the
/// whole ledger at call time, no caching.
async fn global_hall_of_fame(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state
        .db
        .leaderboard_rows()
        .await
        .reject("could not read scores")?;

    let ranked = game::rank_global(rows, names::LEADERBOARD_SIZE as usize);
    Ok(Json(ranked))
}

async fn quiz_hall_of_fame(
    State(state): State<AppState>,
    Path(quiz_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let top = state
        .db
        .quiz_top(quiz_id, names::LEADERBOARD_SIZE)
        .await
        .reject("could not read scores")?;

    Ok(Json(top))
}
