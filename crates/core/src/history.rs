//! Result history - the most recent finished games

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{GameMode, LossReason, RESULT_HISTORY_LEN};

/// One finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub mode: GameMode,
    pub score: u32,
    pub elapsed_secs: u64,
    pub won: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<LossReason>,
    pub finished_at: DateTime<Utc>,
}

impl GameResult {
    /// Elapsed time as `m:ss`
    pub fn time_label(&self) -> String {
        format!("{}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }
}

/// Bounded history, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<GameResult>", into = "Vec<GameResult>")]
pub struct ResultHistory {
    records: VecDeque<GameResult>,
}

impl ResultHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a result at the front, dropping the oldest beyond the limit
    pub fn push(&mut self, result: GameResult) {
        self.records.push_front(result);
        self.records.truncate(RESULT_HISTORY_LEN);
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameResult> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&GameResult> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<GameResult>> for ResultHistory {
    fn from(mut records: Vec<GameResult>) -> Self {
        records.truncate(RESULT_HISTORY_LEN);
        Self {
            records: records.into(),
        }
    }
}

impl From<ResultHistory> for Vec<GameResult> {
    fn from(history: ResultHistory) -> Self {
        history.records.into()
    }
}
