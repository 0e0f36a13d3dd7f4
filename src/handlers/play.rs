use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use serde::Deserialize;

use crate::{
    extractors::AuthGuard,
    game::Submission,
    rejections::{AppError, ResultExt},
    services::play::SubmitOutcome,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/quizzes/submit", post(submit_answer))
}

/// The submission is tagged by mode, so a body whose fields do not match
/// its mode (or an unknown mode) is rejected as a 400 before it gets here.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBody {
    quiz_id: i32,
    question_id: i32,
    #[serde(flatten)]
    submission: Submission,
}

async fn submit_answer(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Json(body): Json<SubmitBody>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state
        .play
        .submit(user.id, body.quiz_id, body.question_id, &body.submission)
        .await
        .reject("could not score submission")?;

    match outcome {
        SubmitOutcome::Scored(evaluation) => Ok(Json(evaluation)),
        SubmitOutcome::QuestionNotFound => Err(AppError::NotFound("question not found")),
        SubmitOutcome::MalformedQuestion => {
            Err(AppError::NotFound("question not found or misconfigured"))
        }
    }
}
