//! In-memory progress: best outcome per level plus the append-only attempt log.
//! Nothing here survives a page reload.

use std::collections::BTreeMap;

use crate::level::QuestionResult;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelProgress {
    pub completed: bool,
    pub stars: u8,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct LevelAttempt {
    pub level_id: u32,
    /// Wall-clock completion time, milliseconds since the epoch.
    pub timestamp_ms: f64,
    pub stars: u8,
    pub questions: Vec<QuestionResult>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressStore {
    levels: BTreeMap<u32, LevelProgress>,
    attempts: Vec<LevelAttempt>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the attempt and overwrite the level's entry.
    pub fn record(&mut self, attempt: LevelAttempt) {
        self.levels.insert(
            attempt.level_id,
            LevelProgress {
                completed: true,
                stars: attempt.stars,
            },
        );
        self.attempts.push(attempt);
    }

    pub fn get(&self, level_id: u32) -> Option<LevelProgress> {
        self.levels.get(&level_id).copied()
    }

    pub fn is_completed(&self, level_id: u32) -> bool {
        self.get(level_id).is_some_and(|p| p.completed)
    }

    pub fn stars_for(&self, level_id: u32) -> u8 {
        self.get(level_id).map_or(0, |p| p.stars)
    }

    pub fn completed_count(&self) -> usize {
        self.levels.values().filter(|p| p.completed).count()
    }

    pub fn total_stars(&self) -> u32 {
        self.levels.values().map(|p| u32::from(p.stars)).sum()
    }

    pub fn attempts(&self) -> &[LevelAttempt] {
        &self.attempts
    }

    pub fn clear(&mut self) {
        self.levels.clear();
        self.attempts.clear();
    }
}
