//! Quiz-play rules: answer choices, submission scoring and ranking.
//!
//! Everything in this module is pure. Randomness is injected by the caller
//! and persistence lives in the service layer, so the rules are testable
//! without a database.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod evaluate;
mod leaderboard;
mod propositions;

pub use evaluate::{evaluate, similarity, Evaluation, Submission, CASH_SIMILARITY_THRESHOLD};
pub use leaderboard::{rank_global, GlobalEntry, LeaderboardRow, QuizScore};
pub use propositions::{propositions, Proposition};

/// Every question carries exactly this many answer texts.
pub const ANSWER_COUNT: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("question {0} has an empty answer or an out-of-range correct-answer position")]
    MalformedQuestion(i32),

    #[error("question {0} has no incorrect answer to pair for duo mode")]
    InsufficientDistractors(i32),
}

/// The three play modes with their fixed point values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Cash,
    Square,
    Duo,
}

impl GameMode {
    pub fn points(self) -> i32 {
        match self {
            GameMode::Cash => 5,
            GameMode::Square => 3,
            GameMode::Duo => 1,
        }
    }
}

/// The modes that present answer choices. Cash is free-typed and has no
/// propositions, so it is unrepresentable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceMode {
    Square,
    Duo,
}

/// One-based answer position, always within 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Position(u8);

impl Position {
    pub fn new(raw: u8) -> Option<Self> {
        (1..=ANSWER_COUNT as u8).contains(&raw).then_some(Self(raw))
    }

    /// Zero-based index into the answer array.
    pub fn index(self) -> usize {
        usize::from(self.0) - 1
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u8::deserialize(deserializer)?;
        Position::new(raw)
            .ok_or_else(|| serde::de::Error::custom("answer position must be between 1 and 4"))
    }
}

/// A question validated for play: four non-empty answers and a
/// correct-answer position known to be in range. Stored records are checked
/// once when converted into this type, never at access time.
#[derive(Debug, Clone)]
pub struct PlayQuestion {
    pub id: i32,
    pub label: String,
    pub answers: [String; ANSWER_COUNT],
    pub correct: Position,
}

impl PlayQuestion {
    pub fn new(
        id: i32,
        label: String,
        answers: [String; ANSWER_COUNT],
        correct_answer: i32,
    ) -> Result<Self, GameError> {
        let correct = u8::try_from(correct_answer)
            .ok()
            .and_then(Position::new)
            .ok_or(GameError::MalformedQuestion(id))?;

        if answers.iter().any(|a| a.trim().is_empty()) {
            return Err(GameError::MalformedQuestion(id));
        }

        Ok(Self {
            id,
            label,
            answers,
            correct,
        })
    }

    pub fn correct_text(&self) -> &str {
        &self.answers[self.correct.index()]
    }
}

#[cfg(test)]
pub(crate) fn sample_question() -> PlayQuestion {
    PlayQuestion::new(
        1,
        "Capital of France?".to_string(),
        [
            "Paris".to_string(),
            "Lyon".to_string(),
            "Marseille".to_string(),
            "Toulouse".to_string(),
        ],
        1,
    )
    .expect("sample question is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_accepts_one_through_four() {
        for raw in 1..=4 {
            assert!(Position::new(raw).is_some());
        }
        assert!(Position::new(0).is_none());
        assert!(Position::new(5).is_none());
    }

    #[test]
    fn position_indexes_into_answer_array() {
        let question = sample_question();
        assert_eq!(question.correct_text(), "Paris");
    }

    #[test]
    fn out_of_range_designator_is_rejected() {
        let result = PlayQuestion::new(
            7,
            "Q".to_string(),
            ["a".into(), "b".into(), "c".into(), "d".into()],
            5,
        );
        assert_eq!(result.unwrap_err(), GameError::MalformedQuestion(7));

        let result = PlayQuestion::new(
            7,
            "Q".to_string(),
            ["a".into(), "b".into(), "c".into(), "d".into()],
            0,
        );
        assert_eq!(result.unwrap_err(), GameError::MalformedQuestion(7));
    }

    #[test]
    fn empty_answer_text_is_rejected() {
        let result = PlayQuestion::new(
            7,
            "Q".to_string(),
            ["a".into(), "  ".into(), "c".into(), "d".into()],
            1,
        );
        assert_eq!(result.unwrap_err(), GameError::MalformedQuestion(7));
    }

    #[test]
    fn mode_point_values() {
        assert_eq!(GameMode::Cash.points(), 5);
        assert_eq!(GameMode::Square.points(), 3);
        assert_eq!(GameMode::Duo.points(), 1);
    }
}
