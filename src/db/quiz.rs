use color_eyre::Result;

use super::models::{QuestionPublic, QuizDetail, QuizSummary};
use super::Db;
use crate::models::QuestionInput;

impl Db {
    /// Creates a quiz bundle atomically in one transaction: the theme is
    /// upserted by name, the questions batch-inserted via UNNEST and linked
    /// to the new quiz. Nothing is visible to other readers unless all of
    /// it commits.
    pub async fn create_quiz_bundle(
        &self,
        title: &str,
        theme_name: &str,
        questions: &[QuestionInput],
        creator_id: i32,
    ) -> Result<i32> {
        let mut tx = self.pool.begin().await?;

        let theme_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO themes (name) VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(theme_name)
        .fetch_one(&mut *tx)
        .await?;

        let quiz_id: i32 = sqlx::query_scalar(
            "INSERT INTO quizzes (title, theme_id, creator_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(title)
        .bind(theme_id)
        .bind(creator_id)
        .fetch_one(&mut *tx)
        .await?;

        // Batch INSERT all questions via UNNEST, collecting the new ids.
        let labels: Vec<String> = questions.iter().map(|q| q.label.clone()).collect();
        let answer1: Vec<String> = questions.iter().map(|q| q.answer1.clone()).collect();
        let answer2: Vec<String> = questions.iter().map(|q| q.answer2.clone()).collect();
        let answer3: Vec<String> = questions.iter().map(|q| q.answer3.clone()).collect();
        let answer4: Vec<String> = questions.iter().map(|q| q.answer4.clone()).collect();
        let correct: Vec<i32> = questions.iter().map(|q| q.correct_answer).collect();

        let question_ids: Vec<i32> = sqlx::query_scalar(
            r#"
            INSERT INTO questions (label, answer1, answer2, answer3, answer4, correct_answer, theme_id, creator_id)
            SELECT t.label, t.answer1, t.answer2, t.answer3, t.answer4, t.correct, $7, $8
            FROM UNNEST($1::TEXT[], $2::TEXT[], $3::TEXT[], $4::TEXT[], $5::TEXT[], $6::INT4[])
                AS t(label, answer1, answer2, answer3, answer4, correct)
            RETURNING id
            "#,
        )
        .bind(&labels)
        .bind(&answer1)
        .bind(&answer2)
        .bind(&answer3)
        .bind(&answer4)
        .bind(&correct)
        .bind(theme_id)
        .bind(creator_id)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO quiz_questions (quiz_id, question_id)
            SELECT $1, q FROM UNNEST($2::INT4[]) AS t(q)
            "#,
        )
        .bind(quiz_id)
        .bind(&question_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "new quiz created: id={quiz_id} with {} questions by user_id={creator_id}",
            question_ids.len()
        );
        Ok(quiz_id)
    }

    pub async fn quizzes(&self, theme_id: Option<i32>) -> Result<Vec<QuizSummary>> {
        let quizzes = sqlx::query_as::<_, QuizSummary>(
            r#"
            SELECT
              quizzes.id AS id,
              quizzes.title AS title,
              quizzes.theme_id AS theme_id,
              themes.name AS theme_name,
              quizzes.creator_id AS creator_id,
              users.email AS creator_email,
              COUNT(quiz_questions.question_id) AS question_count
            FROM quizzes
            JOIN themes ON themes.id = quizzes.theme_id
            JOIN users ON users.id = quizzes.creator_id
            LEFT JOIN quiz_questions ON quiz_questions.quiz_id = quizzes.id
            WHERE $1::INT4 IS NULL OR quizzes.theme_id = $1
            GROUP BY quizzes.id, quizzes.title, quizzes.theme_id, themes.name, quizzes.creator_id, users.email
            ORDER BY quizzes.id
            "#,
        )
        .bind(theme_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(quizzes)
    }

    pub async fn quizzes_by_creator(&self, creator_id: i32) -> Result<Vec<QuizSummary>> {
        let quizzes = sqlx::query_as::<_, QuizSummary>(
            r#"
            SELECT
              quizzes.id AS id,
              quizzes.title AS title,
              quizzes.theme_id AS theme_id,
              themes.name AS theme_name,
              quizzes.creator_id AS creator_id,
              users.email AS creator_email,
              COUNT(quiz_questions.question_id) AS question_count
            FROM quizzes
            JOIN themes ON themes.id = quizzes.theme_id
            JOIN users ON users.id = quizzes.creator_id
            LEFT JOIN quiz_questions ON quiz_questions.quiz_id = quizzes.id
            WHERE quizzes.creator_id = $1
            GROUP BY quizzes.id, quizzes.title, quizzes.theme_id, themes.name, quizzes.creator_id, users.email
            ORDER BY quizzes.id
            "#,
        )
        .bind(creator_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(quizzes)
    }

    /// Fetches a quiz with its questions for play. The correct-answer
    /// positions stay server-side.
    pub async fn get_quiz(&self, quiz_id: i32) -> Result<Option<QuizDetail>> {
        let header = sqlx::query_as::<_, QuizSummary>(
            r#"
            SELECT
              quizzes.id AS id,
              quizzes.title AS title,
              quizzes.theme_id AS theme_id,
              themes.name AS theme_name,
              quizzes.creator_id AS creator_id,
              users.email AS creator_email,
              0::INT8 AS question_count
            FROM quizzes
            JOIN themes ON themes.id = quizzes.theme_id
            JOIN users ON users.id = quizzes.creator_id
            WHERE quizzes.id = $1
            "#,
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let questions = sqlx::query_as::<_, QuestionPublic>(
            r#"
            SELECT q.id, q.label, q.answer1, q.answer2, q.answer3, q.answer4
            FROM quiz_questions qq
            JOIN questions q ON q.id = qq.question_id
            WHERE qq.quiz_id = $1
            ORDER BY q.id
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(QuizDetail {
            id: header.id,
            title: header.title,
            theme_id: header.theme_id,
            theme_name: header.theme_name,
            creator_id: header.creator_id,
            creator_email: header.creator_email,
            questions,
        }))
    }

    pub async fn quiz_creator(&self, quiz_id: i32) -> Result<Option<i32>> {
        let creator: Option<i32> = sqlx::query_scalar("SELECT creator_id FROM quizzes WHERE id = $1")
            .bind(quiz_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(creator)
    }

    /// Updates title, theme and the question set in one transaction. `None`
    /// fields keep their current value; a `Some` question list replaces the
    /// whole set.
    pub async fn update_quiz(
        &self,
        quiz_id: i32,
        title: Option<&str>,
        theme_id: Option<i32>,
        question_ids: Option<&[i32]>,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE quizzes
            SET title = COALESCE($1, title),
                theme_id = COALESCE($2, theme_id)
            WHERE id = $3
            "#,
        )
        .bind(title)
        .bind(theme_id)
        .bind(quiz_id)
        .execute(&mut *tx)
        .await?;

        if let Some(question_ids) = question_ids {
            sqlx::query("DELETE FROM quiz_questions WHERE quiz_id = $1")
                .bind(quiz_id)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                r#"
                INSERT INTO quiz_questions (quiz_id, question_id)
                SELECT $1, q FROM UNNEST($2::INT4[]) AS t(q)
                "#,
            )
            .bind(quiz_id)
            .bind(question_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!("quiz updated: id={quiz_id}");
        Ok(())
    }

    pub async fn delete_quiz(&self, quiz_id: i32) -> Result<()> {
        sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(quiz_id)
            .execute(&self.pool)
            .await?;

        tracing::info!("quiz deleted: id={quiz_id}");
        Ok(())
    }
}
