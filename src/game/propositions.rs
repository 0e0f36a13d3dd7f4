use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::{ChoiceMode, GameError, PlayQuestion};

/// A candidate answer shown to the player in a positional mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Proposition {
    pub id: u8,
    pub text: String,
}

/// Builds the answer choices for a question in a positional mode.
///
/// Square returns all four answers in uniformly random order; duo returns
/// the correct answer paired with one incorrect answer picked uniformly
/// among the three, in random order. The shuffle is Fisher-Yates via
/// `SliceRandom`, so every ordering is reachable.
pub fn propositions<R: Rng>(
    question: &PlayQuestion,
    mode: ChoiceMode,
    rng: &mut R,
) -> Result<Vec<Proposition>, GameError> {
    let mut all: Vec<Proposition> = question
        .answers
        .iter()
        .enumerate()
        .map(|(i, text)| Proposition {
            id: i as u8 + 1,
            text: text.clone(),
        })
        .collect();

    match mode {
        ChoiceMode::Square => {
            all.shuffle(rng);
            Ok(all)
        }
        ChoiceMode::Duo => {
            let correct_id = question.correct.number();
            let correct = all
                .iter()
                .find(|p| p.id == correct_id)
                .cloned()
                .ok_or(GameError::MalformedQuestion(question.id))?;
            let incorrect: Vec<Proposition> =
                all.into_iter().filter(|p| p.id != correct_id).collect();

            // Unreachable for a validated question, checked anyway.
            let distractor = incorrect
                .choose(rng)
                .cloned()
                .ok_or(GameError::InsufficientDistractors(question.id))?;

            let mut pair = vec![correct, distractor];
            pair.shuffle(rng);
            Ok(pair)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::super::sample_question;
    use super::*;

    #[test]
    fn square_returns_all_four_answers() {
        let question = sample_question();
        let mut rng = StdRng::seed_from_u64(42);

        let props = propositions(&question, ChoiceMode::Square, &mut rng).unwrap();
        assert_eq!(props.len(), 4);

        let ids: HashSet<u8> = props.iter().map(|p| p.id).collect();
        assert_eq!(ids, HashSet::from([1, 2, 3, 4]));

        for p in &props {
            assert_eq!(p.text, question.answers[usize::from(p.id) - 1]);
        }
    }

    #[test]
    fn square_shuffle_reaches_every_permutation() {
        let question = sample_question();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen: HashMap<Vec<u8>, u32> = HashMap::new();

        for _ in 0..5_000 {
            let props = propositions(&question, ChoiceMode::Square, &mut rng).unwrap();
            let order: Vec<u8> = props.iter().map(|p| p.id).collect();
            *seen.entry(order).or_default() += 1;
        }

        // All 24 permutations show up, each roughly 1/24 of the time.
        assert_eq!(seen.len(), 24);
        for count in seen.values() {
            assert!(*count > 100, "permutation frequency too skewed: {count}");
        }
    }

    #[test]
    fn duo_contains_correct_answer_and_one_distractor() {
        let question = sample_question();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..500 {
            let props = propositions(&question, ChoiceMode::Duo, &mut rng).unwrap();
            assert_eq!(props.len(), 2);

            let correct: Vec<_> = props
                .iter()
                .filter(|p| p.id == question.correct.number())
                .collect();
            assert_eq!(correct.len(), 1, "duo must contain the correct answer once");
            assert_ne!(props[0].id, props[1].id);
        }
    }

    #[test]
    fn duo_picks_each_distractor_and_each_slot() {
        let question = sample_question();
        let mut rng = StdRng::seed_from_u64(3);
        let mut distractors_seen = HashSet::new();
        let mut correct_first = 0;

        for _ in 0..1_000 {
            let props = propositions(&question, ChoiceMode::Duo, &mut rng).unwrap();
            let distractor = props
                .iter()
                .find(|p| p.id != question.correct.number())
                .unwrap();
            distractors_seen.insert(distractor.id);
            if props[0].id == question.correct.number() {
                correct_first += 1;
            }
        }

        assert_eq!(distractors_seen, HashSet::from([2, 3, 4]));
        // Roughly 50/50 which answer comes first.
        assert!((300..700).contains(&correct_first));
    }

    #[test]
    fn same_seed_gives_same_output() {
        let question = sample_question();

        let mut a = StdRng::seed_from_u64(1234);
        let mut b = StdRng::seed_from_u64(1234);

        let first = propositions(&question, ChoiceMode::Square, &mut a).unwrap();
        let second = propositions(&question, ChoiceMode::Square, &mut b).unwrap();
        assert_eq!(first, second);

        let first = propositions(&question, ChoiceMode::Duo, &mut a).unwrap();
        let second = propositions(&question, ChoiceMode::Duo, &mut b).unwrap();
        assert_eq!(first, second);
    }
}
