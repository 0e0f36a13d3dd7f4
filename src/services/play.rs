use color_eyre::Result;

use crate::db::models::QuestionRecord;
use crate::db::Db;
use crate::game::{evaluate, Evaluation, GameError, Submission};

// ---------------------------------------------------------------------------
// PlayRepository trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait PlayRepository: Send + Sync {
    fn get_question(
        &self,
        question_id: i32,
    ) -> impl std::future::Future<Output = Result<Option<QuestionRecord>>> + Send;

    fn record_score(
        &self,
        user_id: i32,
        quiz_id: i32,
        delta: i32,
    ) -> impl std::future::Future<Output = Result<i32>> + Send;
}

impl PlayRepository for Db {
    async fn get_question(&self, question_id: i32) -> Result<Option<QuestionRecord>> {
        Db::get_question(self, question_id).await
    }

    async fn record_score(&self, user_id: i32, quiz_id: i32, delta: i32) -> Result<i32> {
        Db::record_score(self, user_id, quiz_id, delta).await
    }
}

// ---------------------------------------------------------------------------
// PlayService
// ---------------------------------------------------------------------------

pub enum SubmitOutcome {
    /// The submission was evaluated; any positive score is already in the
    /// ledger.
    Scored(Evaluation),
    /// The question id does not resolve.
    QuestionNotFound,
    /// The stored question violates the 4-answer/designator invariant and
    /// is not playable.
    MalformedQuestion,
}

pub struct PlayService<R: PlayRepository = Db> {
    repo: R,
}

impl<R: PlayRepository + Clone> Clone for PlayService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: PlayRepository> PlayService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Evaluates one answer submission and records the awarded points.
    /// Only positive scores touch the ledger; incorrect answers leave no
    /// trace. The increment is atomic in the repository, so concurrent
    /// submissions for the same (player, quiz) pair accumulate correctly.
    pub async fn submit(
        &self,
        user_id: i32,
        quiz_id: i32,
        question_id: i32,
        submission: &Submission,
    ) -> Result<SubmitOutcome> {
        let Some(record) = self.repo.get_question(question_id).await? else {
            return Ok(SubmitOutcome::QuestionNotFound);
        };

        let question = match record.into_play() {
            Ok(question) => question,
            Err(e @ GameError::MalformedQuestion(_)) => {
                tracing::warn!("rejecting submission: {e}");
                return Ok(SubmitOutcome::MalformedQuestion);
            }
            Err(e) => return Err(e.into()),
        };

        let evaluation = evaluate(&question, submission);

        if evaluation.score > 0 {
            self.repo
                .record_score(user_id, quiz_id, evaluation.score)
                .await?;
        }

        Ok(SubmitOutcome::Scored(evaluation))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::game::Position;

    fn record(correct_answer: i32) -> QuestionRecord {
        QuestionRecord {
            id: 1,
            label: "Capital of France?".to_string(),
            answer1: "Paris".to_string(),
            answer2: "Lyon".to_string(),
            answer3: "Marseille".to_string(),
            answer4: "Toulouse".to_string(),
            correct_answer,
            theme_id: 1,
            creator_id: 1,
        }
    }

    fn cash(text: &str) -> Submission {
        Submission::Cash {
            answer_text: text.to_string(),
        }
    }

    fn square(raw: u8) -> Submission {
        Submission::Square {
            answer_id: Position::new(raw).unwrap(),
        }
    }

    #[tokio::test]
    async fn correct_cash_answer_records_five_points() {
        let mut mock = MockPlayRepository::new();
        mock.expect_get_question()
            .returning(|_| Box::pin(async { Ok(Some(record(1))) }));
        mock.expect_record_score()
            .withf(|user_id, quiz_id, delta| *user_id == 9 && *quiz_id == 4 && *delta == 5)
            .times(1)
            .returning(|_, _, delta| Box::pin(async move { Ok(delta) }));

        let outcome = PlayService::new(mock)
            .submit(9, 4, 1, &cash("Paris"))
            .await
            .unwrap();

        match outcome {
            SubmitOutcome::Scored(eval) => {
                assert!(eval.is_correct);
                assert_eq!(eval.score, 5);
                assert_eq!(eval.correct_answer, "Paris");
            }
            _ => panic!("expected Scored"),
        }
    }

    #[tokio::test]
    async fn incorrect_answer_never_touches_the_ledger() {
        let mut mock = MockPlayRepository::new();
        mock.expect_get_question()
            .returning(|_| Box::pin(async { Ok(Some(record(1))) }));
        mock.expect_record_score().times(0);

        let outcome = PlayService::new(mock)
            .submit(9, 4, 1, &square(2))
            .await
            .unwrap();

        match outcome {
            SubmitOutcome::Scored(eval) => {
                assert!(!eval.is_correct);
                assert_eq!(eval.score, 0);
            }
            _ => panic!("expected Scored"),
        }
    }

    #[tokio::test]
    async fn consecutive_correct_answers_accumulate_in_one_entry() {
        let total = Arc::new(Mutex::new(0));
        let ledger_total = Arc::clone(&total);

        let mut mock = MockPlayRepository::new();
        mock.expect_get_question()
            .returning(|id| Box::pin(async move { Ok(Some(QuestionRecord { id, ..record(1) })) }));
        mock.expect_record_score()
            .times(2)
            .returning(move |_, _, delta| {
                let total = Arc::clone(&ledger_total);
                Box::pin(async move {
                    let mut total = total.lock().unwrap();
                    *total += delta;
                    Ok(*total)
                })
            });

        let service = PlayService::new(mock);
        service.submit(9, 4, 1, &cash("Paris")).await.unwrap();
        service.submit(9, 4, 2, &cash("Paris")).await.unwrap();

        assert_eq!(*total.lock().unwrap(), 10);
    }

    #[tokio::test]
    async fn unknown_question_is_not_found() {
        let mut mock = MockPlayRepository::new();
        mock.expect_get_question()
            .returning(|_| Box::pin(async { Ok(None) }));
        mock.expect_record_score().times(0);

        let outcome = PlayService::new(mock)
            .submit(9, 4, 404, &cash("Paris"))
            .await
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::QuestionNotFound));
    }

    #[tokio::test]
    async fn malformed_stored_question_is_not_playable() {
        let mut mock = MockPlayRepository::new();
        mock.expect_get_question()
            .returning(|_| Box::pin(async { Ok(Some(record(7))) }));
        mock.expect_record_score().times(0);

        let outcome = PlayService::new(mock)
            .submit(9, 4, 1, &cash("Paris"))
            .await
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::MalformedQuestion));
    }
}
