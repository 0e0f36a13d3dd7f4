// Database model structs

use serde::Serialize;

use crate::game::{GameError, PlayQuestion};

#[derive(Clone, sqlx::FromRow)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
}

#[derive(Serialize, sqlx::FromRow)]
pub struct Theme {
    pub id: i32,
    pub name: String,
}

/// A full question row, including the correct-answer position. Only ever
/// serialized back to its creator.
#[derive(Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: i32,
    pub label: String,
    pub answer1: String,
    pub answer2: String,
    pub answer3: String,
    pub answer4: String,
    pub correct_answer: i32,
    pub theme_id: i32,
    pub creator_id: i32,
}

impl QuestionRecord {
    /// Converts the stored row into a validated play question. Fails with
    /// `MalformedQuestion` if the row violates the 4-answer/designator
    /// invariant.
    pub fn into_play(self) -> Result<PlayQuestion, GameError> {
        PlayQuestion::new(
            self.id,
            self.label,
            [self.answer1, self.answer2, self.answer3, self.answer4],
            self.correct_answer,
        )
    }
}

/// A question as shown to players: the correct-answer position is withheld.
#[derive(Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPublic {
    pub id: i32,
    pub label: String,
    pub answer1: String,
    pub answer2: String,
    pub answer3: String,
    pub answer4: String,
}

#[derive(Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: i32,
    pub title: String,
    pub theme_id: i32,
    pub theme_name: String,
    pub creator_id: i32,
    pub creator_email: String,
    pub question_count: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDetail {
    pub id: i32,
    pub title: String,
    pub theme_id: i32,
    pub theme_name: String,
    pub creator_id: i32,
    pub creator_email: String,
    pub questions: Vec<QuestionPublic>,
}

#[derive(Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub user_id: i32,
    pub quiz_id: i32,
    pub score: i32,
}

/// One row of a per-quiz hall of fame.
#[derive(Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuizTopRow {
    pub user_id: i32,
    pub email: String,
    pub score: i32,
}
