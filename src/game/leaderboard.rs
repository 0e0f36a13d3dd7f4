use std::collections::BTreeMap;

use serde::Serialize;

/// One ledger row joined with player identity and quiz title, as fetched
/// for the global hall of fame.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeaderboardRow {
    pub user_id: i32,
    pub email: String,
    pub quiz_id: i32,
    pub quiz_title: String,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub quiz_id: i32,
    pub quiz_title: String,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalEntry {
    pub user_id: i32,
    pub email: String,
    pub total_score: i32,
    pub scores: Vec<QuizScore>,
}

/// Ranks players by cumulative score across all quizzes and keeps the top
/// `n`, with each player's per-quiz breakdown ordered best-first. Ties on
/// the total break ascending by player id.
pub fn rank_global(rows: Vec<LeaderboardRow>, n: usize) -> Vec<GlobalEntry> {
    // BTreeMap keys ascend by player id, which doubles as the tie-break.
    let mut by_player: BTreeMap<i32, GlobalEntry> = BTreeMap::new();

    for row in rows {
        let entry = by_player.entry(row.user_id).or_insert_with(|| GlobalEntry {
            user_id: row.user_id,
            email: row.email.clone(),
            total_score: 0,
            scores: Vec::new(),
        });
        entry.total_score += row.score;
        entry.scores.push(QuizScore {
            quiz_id: row.quiz_id,
            quiz_title: row.quiz_title,
            score: row.score,
        });
    }

    let mut ranked: Vec<GlobalEntry> = by_player.into_values().collect();
    ranked.sort_by(|a, b| b.total_score.cmp(&a.total_score).then(a.user_id.cmp(&b.user_id)));
    ranked.truncate(n);

    for entry in &mut ranked {
        entry
            .scores
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.quiz_id.cmp(&b.quiz_id)));
    }

    ranked
}
