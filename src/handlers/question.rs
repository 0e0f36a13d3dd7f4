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
    game::{self, ChoiceMode, GameError},
    models::QuestionInput,
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/questions", get(questions_by_theme).post(create_question))
        .route("/api/questions/created", get(created_questions))
        .route(
            "/api/questions/{id}",
            axum::routing::put(update_question).delete(delete_question),
        )
        .route("/api/questions/{id}/propositions", get(propositions))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeFilter {
    theme_id: i32,
}

async fn questions_by_theme(
    State(state): State<AppState>,
    Query(filter): Query<ThemeFilter>,
) -> Result<impl IntoResponse, AppError> {
    let questions = state
        .db
        .questions_by_theme(filter.theme_id)
        .await
        .reject("could not list questions")?;

    Ok(Json(questions))
}

async fn created_questions(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let questions = state
        .db
        .questions_by_creator(user.id)
        .await
        .reject("could not list questions")?;

    Ok(Json(questions))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionBody {
    #[serde(flatten)]
    question: QuestionInput,
    theme_id: i32,
}

async fn create_question(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<QuestionBody>,
) -> Result<impl IntoResponse, AppError> {
    body.question.validate().map_err(AppError::Input)?;

    let theme_exists = state
        .db
        .theme_exists(body.theme_id)
        .await
        .reject("could not check theme")?;
    if !theme_exists {
        return Err(AppError::Input("theme does not exist"));
    }

    let question = state
        .db
        .create_question(&body.question, body.theme_id, user.id)
        .await
        .reject("could not create question")?;

    Ok((StatusCode::CREATED, Json(question)))
}

async fn update_question(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(question_id): Path<i32>,
    Json(body): Json<QuestionBody>,
) -> Result<impl IntoResponse, AppError> {
    body.question.validate().map_err(AppError::Input)?;

    let creator = state
        .db
        .question_creator(question_id)
        .await
        .reject("could not check question")?
        .ok_or(AppError::NotFound("question not found"))?;

    if creator != user.id {
        return Err(AppError::Forbidden);
    }

    let question = state
        .db
        .update_question(question_id, &body.question, body.theme_id)
        .await
        .reject("could not update question")?;

    Ok(Json(question))
}

async fn delete_question(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(question_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let creator = state
        .db
        .question_creator(question_id)
        .await
        .reject("could not check question")?
        .ok_or(AppError::NotFound("question not found"))?;

    if creator != user.id {
        return Err(AppError::Forbidden);
    }

    state
        .db
        .delete_question(question_id)
        .await
        .reject("could not delete question")?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct PropositionsQuery {
    mode: ChoiceMode,
}

/// Answer choices for a positional mode. Cash has no propositions, which
/// the `ChoiceMode` query type enforces: any other mode value is a 400.
async fn propositions(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Path(question_id): Path<i32>,
    Query(query): Query<PropositionsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let record = state
        .db
        .get_question(question_id)
        .await
        .reject("could not get question")?
        .ok_or(AppError::NotFound("question not found"))?;

    let question = record.into_play().map_err(|e| {
        tracing::warn!("question {question_id} is not playable: {e}");
        AppError::NotFound("question not found or misconfigured")
    })?;

    let mut rng = rand::thread_rng();
    let props = game::propositions(&question, query.mode, &mut rng).map_err(|e| match e {
        GameError::InsufficientDistractors(_) => {
            tracing::error!("{e}");
            AppError::Internal("could not build propositions")
        }
        GameError::MalformedQuestion(_) => AppError::NotFound("question not found or misconfigured"),
    })?;

    Ok(Json(props))
}
