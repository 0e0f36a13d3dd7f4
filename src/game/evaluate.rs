use serde::{Deserialize, Serialize};

use super::{GameMode, PlayQuestion, Position};

/// Minimum Sørensen–Dice similarity for a free-typed cash answer to count
/// as correct.
pub const CASH_SIMILARITY_THRESHOLD: f64 = 0.9;

/// A submitted answer, tagged by mode. Each variant carries exactly the
/// field its mode needs, so a text answer for a positional mode (or the
/// reverse) fails to deserialize instead of reaching the evaluator.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Submission {
    Cash {
        #[serde(rename = "answerText")]
        answer_text: String,
    },
    Square {
        #[serde(rename = "answerId")]
        answer_id: Position,
    },
    Duo {
        #[serde(rename = "answerId")]
        answer_id: Position,
    },
}

impl Submission {
    pub fn mode(&self) -> GameMode {
        match self {
            Submission::Cash { .. } => GameMode::Cash,
            Submission::Square { .. } => GameMode::Square,
            Submission::Duo { .. } => GameMode::Duo,
        }
    }
}

/// Outcome of scoring one submission. Mirrors the wire response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub is_correct: bool,
    pub correct_answer: String,
    pub score: i32,
}

/// Normalized string similarity in [0, 1]: the Sørensen–Dice coefficient
/// over character bigrams. Symmetric and 1.0 for identical strings.
/// Case-sensitive; callers lower-case both sides.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::sorensen_dice(a, b)
}

/// Scores a submission against the stored correct answer. Pure: recording
/// the awarded points is the caller's job.
pub fn evaluate(question: &PlayQuestion, submission: &Submission) -> Evaluation {
    let is_correct = match submission {
        Submission::Cash { answer_text } => {
            let score = similarity(
                &answer_text.to_lowercase(),
                &question.correct_text().to_lowercase(),
            );
            score >= CASH_SIMILARITY_THRESHOLD
        }
        Submission::Square { answer_id } | Submission::Duo { answer_id } => {
            *answer_id == question.correct
        }
    };

    Evaluation {
        is_correct,
        correct_answer: question.correct_text().to_string(),
        score: if is_correct {
            submission.mode().points()
        } else {
            0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::super::sample_question;
    use super::*;

    fn position(raw: u8) -> Position {
        Position::new(raw).unwrap()
    }

    #[test]
    fn similarity_is_symmetric_and_normalized() {
        assert_eq!(similarity("paris", "paris"), 1.0);
        assert_eq!(similarity("paris", "tokyo"), 0.0);
        assert_eq!(similarity("night", "nacht"), similarity("nacht", "night"));

        let score = similarity("healed", "sealed");
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn square_awards_three_points_only_for_the_correct_position() {
        let question = sample_question();

        for raw in 1..=4u8 {
            let result = evaluate(
                &question,
                &Submission::Square {
                    answer_id: position(raw),
                },
            );
            if raw == question.correct.number() {
                assert!(result.is_correct);
                assert_eq!(result.score, 3);
            } else {
                assert!(!result.is_correct);
                assert_eq!(result.score, 0);
            }
            assert_eq!(result.correct_answer, "Paris");
        }
    }

    #[test]
    fn duo_awards_one_point_only_for_the_correct_position() {
        let question = sample_question();

        for raw in 1..=4u8 {
            let result = evaluate(
                &question,
                &Submission::Duo {
                    answer_id: position(raw),
                },
            );
            assert_eq!(result.is_correct, raw == question.correct.number());
            assert_eq!(result.score, if result.is_correct { 1 } else { 0 });
        }
    }

    #[test]
    fn cash_exact_match_scores_five() {
        let question = sample_question();

        let result = evaluate(
            &question,
            &Submission::Cash {
                answer_text: "Paris".to_string(),
            },
        );
        assert!(result.is_correct);
        assert_eq!(result.score, 5);
    }

    #[test]
    fn cash_match_ignores_case() {
        let question = sample_question();

        let result = evaluate(
            &question,
            &Submission::Cash {
                answer_text: "pArIs".to_string(),
            },
        );
        assert!(result.is_correct);
    }

    #[test]
    fn cash_near_miss_above_threshold_is_accepted() {
        let question = sample_question();

        // "pariss" vs "paris": bigrams {pa,ar,ri,is,ss} vs {pa,ar,ri,is},
        // dice = 2*4/9 ≈ 0.889 — just below 0.9, so rejected.
        let result = evaluate(
            &question,
            &Submission::Cash {
                answer_text: "pariss".to_string(),
            },
        );
        assert!(!result.is_correct);

        // A longer answer tolerates a trailing typo.
        let question = crate::game::PlayQuestion::new(
            2,
            "Largest ocean?".to_string(),
            [
                "Pacific Ocean".to_string(),
                "Atlantic Ocean".to_string(),
                "Indian Ocean".to_string(),
                "Arctic Ocean".to_string(),
            ],
            1,
        )
        .unwrap();

        // "pacific oceann" shares 11 of its 12 bigrams with the answer,
        // dice = 22/23 ≈ 0.957.
        let result = evaluate(
            &question,
            &Submission::Cash {
                answer_text: "pacific oceann".to_string(),
            },
        );
        assert!(
            result.is_correct,
            "near-identical answer should clear the threshold"
        );
    }

    #[test]
    fn cash_unrelated_answer_is_always_rejected() {
        let question = sample_question();

        let result = evaluate(
            &question,
            &Submission::Cash {
                answer_text: "Tokyo".to_string(),
            },
        );
        assert!(!result.is_correct);
        assert_eq!(result.score, 0);
        assert_eq!(result.correct_answer, "Paris");
    }

    #[test]
    fn submission_rejects_field_mode_mismatch() {
        // Text for a positional mode never parses.
        let err = serde_json::from_str::<Submission>(r#"{"mode":"square","answerText":"Paris"}"#);
        assert!(err.is_err());

        // Position for cash never parses.
        let err = serde_json::from_str::<Submission>(r#"{"mode":"cash","answerId":1}"#);
        assert!(err.is_err());

        // Unknown mode never parses.
        let err = serde_json::from_str::<Submission>(r#"{"mode":"carre","answerId":1}"#);
        assert!(err.is_err());

        // Out-of-range positions never parse.
        let err = serde_json::from_str::<Submission>(r#"{"mode":"duo","answerId":5}"#);
        assert!(err.is_err());

        let ok = serde_json::from_str::<Submission>(r#"{"mode":"duo","answerId":2}"#).unwrap();
        assert_eq!(ok.mode(), GameMode::Duo);
    }
}
