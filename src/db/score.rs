use color_eyre::Result;

use super::models::{QuizTopRow, ScoreEntry};
use super::Db;
use crate::game::LeaderboardRow;

impl Db {
    /// Adds `delta` to the player's cumulative score for a quiz, creating
    /// the ledger row on first use. The upsert-increment is a single
    /// statement, so concurrent submissions for the same (player, quiz)
    /// pair cannot lose updates. Returns the new total.
    pub async fn record_score(&self, user_id: i32, quiz_id: i32, delta: i32) -> Result<i32> {
        let total: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO scores (user_id, quiz_id, score) VALUES ($1, $2, $3)
            ON CONFLICT (user_id, quiz_id)
            DO UPDATE SET score = scores.score + EXCLUDED.score
            RETURNING score
            "#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(delta)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("score recorded for user={user_id} quiz={quiz_id}: +{delta} (total {total})");
        Ok(total)
    }

    pub async fn scores_for_quiz(&self, quiz_id: i32) -> Result<Vec<ScoreEntry>> {
        let entries = sqlx::query_as::<_, ScoreEntry>(
            "SELECT user_id, quiz_id, score FROM scores WHERE quiz_id = $1 ORDER BY score DESC, user_id",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn scores_for_player(&self, user_id: i32) -> Result<Vec<ScoreEntry>> {
        let entries = sqlx::query_as::<_, ScoreEntry>(
            "SELECT user_id, quiz_id, score FROM scores WHERE user_id = $1 ORDER BY score DESC, quiz_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Top scorers of one quiz, best first, ties broken ascending by user
    /// id. Only the email identity is joined, never the password hash.
    pub async fn quiz_top(&self, quiz_id: i32, limit: i64) -> Result<Vec<QuizTopRow>> {
        let rows = sqlx::query_as::<_, QuizTopRow>(
            r#"
            SELECT s.user_id, u.email, s.score
            FROM scores s
            JOIN users u ON u.id = s.user_id
            WHERE s.quiz_id = $1
            ORDER BY s.score DESC, s.user_id
            LIMIT $2
            "#,
        )
        .bind(quiz_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Every ledger row joined with player identity and quiz title, as
    /// input for the global hall-of-fame ranking.
    pub async fn leaderboard_rows(&self) -> Result<Vec<LeaderboardRow>> {
        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r#"
            SELECT s.user_id, u.email, s.quiz_id, q.title AS quiz_title, s.score
            FROM scores s
            JOIN users u ON u.id = s.user_id
            JOIN quizzes q ON q.id = s.quiz_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
