use serde::Deserialize;

use crate::game::Position;

/// A question as authored by a user, before it gets an id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    pub label: String,
    pub answer1: String,
    pub answer2: String,
    pub answer3: String,
    pub answer4: String,
    pub correct_answer: i32,
}

impl QuestionInput {
    /// Checks the question invariant on the way in: four non-empty answers
    /// and a correct-answer position within 1..=4.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.label.trim().is_empty() {
            return Err("question label must not be empty");
        }

        let answers = [&self.answer1, &self.answer2, &self.answer3, &self.answer4];
        if answers.iter().any(|a| a.trim().is_empty()) {
            return Err("all four answers must be filled in");
        }

        u8::try_from(self.correct_answer)
            .ok()
            .and_then(Position::new)
            .map(|_| ())
            .ok_or("correct answer must be one of the four positions")
    }
}

/// Payload for the transactional quiz-bundle create: theme (upserted by
/// name), freshly authored questions and the quiz itself.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizBody {
    pub title: String,
    pub theme: String,
    pub questions: Vec<QuestionInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(correct_answer: i32) -> QuestionInput {
        QuestionInput {
            label: "Capital of France?".to_string(),
            answer1: "Paris".to_string(),
            answer2: "Lyon".to_string(),
            answer3: "Marseille".to_string(),
            answer4: "Toulouse".to_string(),
            correct_answer,
        }
    }

    #[test]
    fn accepts_a_well_formed_question() {
        assert!(input(1).validate().is_ok());
        assert!(input(4).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_designators() {
        assert!(input(0).validate().is_err());
        assert!(input(5).validate().is_err());
        assert!(input(-1).validate().is_err());
    }

    #[test]
    fn rejects_blank_answers_and_labels() {
        let mut bad = input(1);
        bad.answer3 = "   ".to_string();
        assert!(bad.validate().is_err());

        let mut bad = input(1);
        bad.label = String::new();
        assert!(bad.validate().is_err());
    }
}
