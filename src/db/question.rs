use color_eyre::Result;

use super::models::QuestionRecord;
use super::Db;
use crate::models::QuestionInput;

const QUESTION_COLUMNS: &str =
    "id, label, answer1, answer2, answer3, answer4, correct_answer, theme_id, creator_id";

impl Db {
    pub async fn create_question(
        &self,
        input: &QuestionInput,
        theme_id: i32,
        creator_id: i32,
    ) -> Result<QuestionRecord> {
        let question = sqlx::query_as::<_, QuestionRecord>(&format!(
            r#"
            INSERT INTO questions (label, answer1, answer2, answer3, answer4, correct_answer, theme_id, creator_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {QUESTION_COLUMNS}
            "#,
        ))
        .bind(&input.label)
        .bind(&input.answer1)
        .bind(&input.answer2)
        .bind(&input.answer3)
        .bind(&input.answer4)
        .bind(input.correct_answer)
        .bind(theme_id)
        .bind(creator_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            "new question created: id={} for theme={theme_id} by user_id={creator_id}",
            question.id
        );
        Ok(question)
    }

    pub async fn get_question(&self, question_id: i32) -> Result<Option<QuestionRecord>> {
        let question = sqlx::query_as::<_, QuestionRecord>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1",
        ))
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    pub async fn questions_by_theme(&self, theme_id: i32) -> Result<Vec<QuestionRecord>> {
        let questions = sqlx::query_as::<_, QuestionRecord>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE theme_id = $1 ORDER BY id",
        ))
        .bind(theme_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    pub async fn questions_by_creator(&self, creator_id: i32) -> Result<Vec<QuestionRecord>> {
        let questions = sqlx::query_as::<_, QuestionRecord>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE creator_id = $1 ORDER BY id",
        ))
        .bind(creator_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    /// Looks up who created a question, or `None` if the id does not resolve.
    pub async fn question_creator(&self, question_id: i32) -> Result<Option<i32>> {
        let creator: Option<i32> =
            sqlx::query_scalar("SELECT creator_id FROM questions WHERE id = $1")
                .bind(question_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(creator)
    }

    pub async fn update_question(
        &self,
        question_id: i32,
        input: &QuestionInput,
        theme_id: i32,
    ) -> Result<QuestionRecord> {
        let question = sqlx::query_as::<_, QuestionRecord>(&format!(
            r#"
            UPDATE questions
            SET label = $1, answer1 = $2, answer2 = $3, answer3 = $4, answer4 = $5,
                correct_answer = $6, theme_id = $7
            WHERE id = $8
            RETURNING {QUESTION_COLUMNS}
            "#,
        ))
        .bind(&input.label)
        .bind(&input.answer1)
        .bind(&input.answer2)
        .bind(&input.answer3)
        .bind(&input.answer4)
        .bind(input.correct_answer)
        .bind(theme_id)
        .bind(question_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("question updated: id={question_id}");
        Ok(question)
    }

    pub async fn delete_question(&self, question_id: i32) -> Result<()> {
        sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(question_id)
            .execute(&self.pool)
            .await?;

        tracing::info!("question deleted: id={question_id}");
        Ok(())
    }
}
