use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    extractors::AuthGuard,
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/themes", get(list_themes).post(create_theme))
        .route(
            "/api/themes/{id}",
            axum::routing::put(update_theme).delete(delete_theme),
        )
}

async fn list_themes(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let themes = state.db.themes().await.reject("could not list themes")?;
    Ok(Json(themes))
}

#[derive(Deserialize)]
struct ThemeBody {
    name: String,
}

async fn create_theme(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<ThemeBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::Input("theme name must not be empty"));
    }

    let theme = state
        .db
        .create_theme(body.name.trim())
        .await
        .reject_input("could not create theme")?;

    Ok((StatusCode::CREATED, Json(theme)))
}

async fn update_theme(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Path(theme_id): Path<i32>,
    Json(body): Json<ThemeBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::Input("theme name must not be empty"));
    }

    let theme = state
        .db
        .rename_theme(theme_id, body.name.trim())
        .await
        .reject("could not rename theme")?
        .ok_or(AppError::NotFound("theme not found"))?;

    Ok(Json(theme))
}

async fn delete_theme(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Path(theme_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .db
        .delete_theme(theme_id)
        .await
        .reject("could not delete theme")?;

    if !deleted {
        return Err(AppError::NotFound("theme not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
