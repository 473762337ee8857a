//! Rejected operations
//!
//! Nothing in the engine is fatal. Every error here means "the operation was
//! refused and the session is exactly as it was before the call".

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Assist;

/// Why board growth was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthRejected {
    #[error("No numbers to add - grid is empty!")]
    EmptyBoard,
    #[error("Cannot add numbers - would reach {rows} rows")]
    CapExceeded { rows: usize },
}

impl GrowthRejected {
    /// Stable reason code for callers
    pub fn reason_code(&self) -> &'static str {
        match self {
            GrowthRejected::EmptyBoard => "empty",
            GrowthRejected::CapExceeded { .. } => "cap-exceeded",
        }
    }
}

/// A refused session operation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No game in progress (not started, or already won/lost)
    #[error("No game in progress")]
    NotPlaying,
    /// Selected cell is empty or outside the board
    #[error("Cell {index} holds no tile")]
    InvalidSelection { index: usize },
    /// The assist has no uses left
    #[error("No {} uses left", .0.as_str())]
    AssistExhausted(Assist),
    /// Add numbers refused
    #[error(transparent)]
    GrowthRejected(#[from] GrowthRejected),
    /// Revert with nothing to undo
    #[error("No move to revert")]
    NoLastMove,
    /// Erase attempted without arming the eraser first
    #[error("Eraser is not armed")]
    EraserNotArmed,
    /// Evaluation requested with fewer than two cells selected
    #[error("No pair selected")]
    NoPendingPair,
}

/// A snapshot that cannot be restored
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported snapshot version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
    #[error("snapshot has no live session (status {0})")]
    NotASession(&'static str),
    #[error("tile value {value} at cell {index} is out of range")]
    BadTile { index: usize, value: u32 },
    #[error("board has {rows} rows, more than the {cap} row cap")]
    TooManyRows { rows: usize, cap: usize },
    #[error("selection is invalid: {0}")]
    BadSelection(&'static str),
    #[error("last move is inconsistent with the board: {0}")]
    BadLastMove(&'static str),
    #[error("assist budget {assist} = {value} exceeds its limit {limit}")]
    BadBudget {
        assist: &'static str,
        value: u8,
        limit: u8,
    },
    #[error("status {status} contradicts the board (score {score})")]
    BadStatus { status: &'static str, score: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        assert_eq!(GrowthRejected::EmptyBoard.reason_code(), "empty");
        assert_eq!(
            GrowthRejected::CapExceeded { rows: 50 }.reason_code(),
            "cap-exceeded"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Rejection::AssistExhausted(Assist::Shuffle).to_string(),
            "No shuffle uses left"
        );
        assert_eq!(
            Rejection::from(GrowthRejected::EmptyBoard).to_string(),
            "No numbers to add - grid is empty!"
        );
    }
}
