//! Read-only view of the attempt log for the developer dashboard.

use crate::content::Level;
use crate::level::QuestionResult;
use crate::progress::ProgressStore;
use crate::question::Answer;

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionRow {
    pub prompt: String,
    pub is_correct: bool,
    pub submitted: String,
    pub expected: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AttemptSummary {
    pub level_id: u32,
    /// Falls back to `Level <id>` for ids no longer in the catalogue.
    pub level_title: String,
    pub timestamp_ms: f64,
    pub stars: u8,
    pub correct: usize,
    pub total: usize,
    pub questions: Vec<QuestionRow>,
}

/// Render an answer for humans. Pairs become `left ↔ right` with the
/// first `_l` / `_r` column marker dropped.
pub fn format_answer(answer: &Answer) -> String {
    match answer {
        Answer::Choice(id) => id.clone(),
        Answer::Pairs(pairs) if pairs.iter().all(|p| p.contains('-')) => pairs
            .iter()
            .filter_map(|p| p.split_once('-'))
            .map(|(left, right)| {
                format!("{} ↔ {}", left.replacen("_l", "", 1), right.replacen("_r", "", 1))
            })
            .collect::<Vec<_>>()
            .join("; "),
        Answer::Pairs(items) => items.join(", "),
    }
}

fn row(result: &QuestionResult) -> QuestionRow {
    QuestionRow {
        prompt: result.prompt.clone(),
        is_correct: result.is_correct,
        submitted: format_answer(&result.submitted),
        expected: format_answer(&result.expected),
    }
}

/// Every attempt, newest first.
pub fn summaries(store: &ProgressStore, levels: &[&Level]) -> Vec<AttemptSummary> {
    store
        .attempts()
        .iter()
        .rev()
        .map(|attempt| AttemptSummary {
            level_id: attempt.level_id,
            level_title: levels
                .iter()
                .find(|l| l.id == attempt.level_id)
                .map(|l| l.title.to_string())
                .unwrap_or_else(|| format!("Level {}", attempt.level_id)),
            timestamp_ms: attempt.timestamp_ms,
            stars: attempt.stars,
            correct: attempt.questions.iter().filter(|q| q.is_correct).count(),
            total: attempt.questions.len(),
            questions: attempt.questions.iter().map(row).collect(),
        })
        .collect()
}
