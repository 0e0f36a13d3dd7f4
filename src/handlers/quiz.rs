use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    extractors::AuthGuard,
    models::CreateQuizBody,
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/quizzes", get(list_quizzes).post(create_quiz))
        .route("/api/quizzes/created", get(created_quizzes))
        .route(
            "/api/quizzes/{id}",
            get(get_quiz).put(update_quiz).delete(delete_quiz),
        )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizFilter {
    theme_id: Option<i32>,
}

async fn list_quizzes(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Query(filter): Query<QuizFilter>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = state
        .db
        .quizzes(filter.theme_id)
        .await
        .reject("could not list quizzes")?;

    Ok(Json(quizzes))
}

async fn created_quizzes(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = state
        .db
        .quizzes_by_creator(user.id)
        .await
        .reject("could not list quizzes")?;

    Ok(Json(quizzes))
}

async fn get_quiz(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Path(quiz_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = state
        .db
        .get_quiz(quiz_id)
        .await
        .reject("could not get quiz")?
        .ok_or(AppError::NotFound("quiz not found"))?;

    Ok(Json(quiz))
}

async fn create_quiz(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<CreateQuizBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.title.trim().is_empty() || body.theme.trim().is_empty() {
        return Err(AppError::Input("quiz title and theme are required"));
    }

    // Any non-empty question set is accepted; every question must satisfy
    // the 4-answer/designator invariant before anything is written.
    if body.questions.is_empty() {
        return Err(AppError::Input("a quiz needs at least one question"));
    }

    for question in &body.questions {
        question.validate().map_err(AppError::Input)?;
    }

    let quiz_id = state
        .db
        .create_quiz_bundle(
            body.title.trim(),
            body.theme.trim(),
            &body.questions,
            user.id,
        )
        .await
        .reject("could not create quiz")?;

    let quiz = state
        .db
        .get_quiz(quiz_id)
        .await
        .reject("could not get quiz")?
        .ok_or(AppError::Internal("quiz missing after create"))?;

    Ok((StatusCode::CREATED, Json(quiz)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateQuizBody {
    title: Option<String>,
    theme_id: Option<i32>,
    question_ids: Option<Vec<i32>>,
}

async fn update_quiz(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(quiz_id): Path<i32>,
    Json(body): Json<UpdateQuizBody>,
) -> Result<impl IntoResponse, AppError> {
    let creator = state
        .db
        .quiz_creator(quiz_id)
        .await
        .reject("could not check quiz")?
        .ok_or(AppError::NotFound("quiz not found"))?;

    if creator != user.id {
        return Err(AppError::Forbidden);
    }

    if let Some(question_ids) = &body.question_ids {
        if question_ids.is_empty() {
            return Err(AppError::Input("a quiz needs at least one question"));
        }
    }

    state
        .db
        .update_quiz(
            quiz_id,
            body.title.as_deref(),
            body.theme_id,
            body.question_ids.as_deref(),
        )
        .await
        .reject("could not update quiz")?;

    let quiz = state
        .db
        .get_quiz(quiz_id)
        .await
        .reject("could not get quiz")?
        .ok_or(AppError::NotFound("quiz not found"))?;

    Ok(Json(quiz))
}

async fn delete_quiz(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(quiz_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let creator = state
        .db
        .quiz_creator(quiz_id)
        .await
        .reject("could not check quiz")?
        .ok_or(AppError::NotFound("quiz not found"))?;

    if creator != user.id {
        return Err(AppError::Forbidden);
    }

    state
        .db
        .delete_quiz(quiz_id)
        .await
        .reject("could not delete quiz")?;

    Ok(StatusCode::NO_CONTENT)
}
