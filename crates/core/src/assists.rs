//! Assists - bounded-use player aids
//!
//! | Assist | Uses | Effect |
//! |--------|------|--------|
//! | Hint | unbounded | count valid pairs (shown as "5+" above five) |
//! | Revert | 1, refreshed by every match | undo the most recent match |
//! | Add Numbers | 10 | grow the board (see [`crate::generator`]) |
//! | Shuffle | 5 | permute values over the occupied cells |
//! | Eraser | 5 | arm, then the next selected tile is removed |
//!
//! A budget is only spent when the assist actually changes the board; any
//! rejection leaves the session untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Rejection;
use crate::generator;
use crate::matching::count_valid_moves;
use crate::rng::TileRng;
use crate::session::Session;
use crate::types::{Assist, Tile, ADD_NUMBERS_BUDGET, ERASER_BUDGET, HINT_DISPLAY_CAP, SHUFFLE_BUDGET};

/// Remaining uses per assist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistBudgets {
    pub revert: u8,
    pub add_numbers: u8,
    pub shuffle: u8,
    pub eraser: u8,
}

impl Default for AssistBudgets {
    fn default() -> Self {
        Self {
            revert: 0,
            add_numbers: ADD_NUMBERS_BUDGET,
            shuffle: SHUFFLE_BUDGET,
            eraser: ERASER_BUDGET,
        }
    }
}

impl AssistBudgets {
    /// Remaining uses, `None` for unbounded
    pub fn remaining(&self, assist: Assist) -> Option<u8> {
        match assist {
            Assist::Hint => None,
            Assist::Revert => Some(self.revert),
            Assist::AddNumbers => Some(self.add_numbers),
            Assist::Shuffle => Some(self.shuffle),
            Assist::Eraser => Some(self.eraser),
        }
    }

    /// Upper bound for each budget
    pub fn limit(assist: Assist) -> Option<u8> {
        match assist {
            Assist::Hint => None,
            Assist::Revert => Some(1),
            Assist::AddNumbers => Some(ADD_NUMBERS_BUDGET),
            Assist::Shuffle => Some(SHUFFLE_BUDGET),
            Assist::Eraser => Some(ERASER_BUDGET),
        }
    }

    /// Check if any assist that can create new pairs is still available
    ///
    /// Hint and revert don't count: neither can open up a stuck board.
    pub fn has_board_changers(&self) -> bool {
        self.add_numbers > 0 || self.shuffle > 0 || self.eraser > 0
    }
}

/// Result of the hint assist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintReport {
    /// Exact number of valid pairs
    pub count: usize,
    /// Whether the display should read "5+"
    pub capped: bool,
}

impl HintReport {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            capped: count > HINT_DISPLAY_CAP,
        }
    }
}

impl fmt::Display for HintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.capped {
            write!(f, "{HINT_DISPLAY_CAP}+")
        } else {
            write!(f, "{}", self.count)
        }
    }
}

impl Session {
    /// Count the valid pairs on the board
    pub fn use_hint(&self) -> Result<HintReport, Rejection> {
        self.ensure_playing()?;
        Ok(HintReport::new(count_valid_moves(self.board())))
    }

    /// Undo the most recent match
    pub fn use_revert(&mut self) -> Result<(), Rejection> {
        self.ensure_playing()?;
        if self.budgets.revert == 0 {
            return Err(Rejection::AssistExhausted(Assist::Revert));
        }
        let Some(mv) = self.last_move.take() else {
            return Err(Rejection::NoLastMove);
        };

        self.board.set(mv.first, Some(mv.first_value));
        self.board.set(mv.second, Some(mv.second_value));
        self.score = mv.score_before;
        self.budgets.revert = 0;
        debug!(first = mv.first, second = mv.second, score = self.score, "match reverted");
        Ok(())
    }

    /// Grow the board, returning the number of tiles appended
    pub fn use_add_numbers<R: TileRng>(&mut self, rng: &mut R) -> Result<usize, Rejection> {
        self.ensure_playing()?;
        if self.budgets.add_numbers == 0 {
            return Err(Rejection::AssistExhausted(Assist::AddNumbers));
        }
        let appended = generator::grow(self.mode, &mut self.board, rng)?;
        self.budgets.add_numbers -= 1;
        self.check_outcome();
        Ok(appended)
    }

    /// Randomly reassign the remaining values to the occupied cells
    pub fn use_shuffle<R: TileRng>(&mut self, rng: &mut R) -> Result<(), Rejection> {
        self.ensure_playing()?;
        if self.budgets.shuffle == 0 {
            return Err(Rejection::AssistExhausted(Assist::Shuffle));
        }

        let (positions, mut values): (Vec<usize>, Vec<Tile>) = self.board.occupied().unzip();
        rng.shuffle(&mut values);
        for (&pos, &value) in positions.iter().zip(&values) {
            self.board.set(pos, Some(value));
        }

        self.budgets.shuffle -= 1;
        debug!(tiles = positions.len(), left = self.budgets.shuffle, "board shuffled");
        self.check_outcome();
        Ok(())
    }

    /// Arm the eraser; the next selected tile will be removed
    pub fn arm_eraser(&mut self) -> Result<(), Rejection> {
        self.ensure_playing()?;
        if self.budgets.eraser == 0 {
            return Err(Rejection::AssistExhausted(Assist::Eraser));
        }
        self.eraser_armed = true;
        Ok(())
    }

    /// Remove the tile at `index` with the armed eraser
    pub fn erase_cell(&mut self, index: usize) -> Result<Tile, Rejection> {
        self.ensure_playing()?;
        if !self.eraser_armed {
            return Err(Rejection::EraserNotArmed);
        }
        if self.budgets.eraser == 0 {
            return Err(Rejection::AssistExhausted(Assist::Eraser));
        }
        let Some(value) = self.board.clear(index) else {
            return Err(Rejection::InvalidSelection { index });
        };

        self.selection.retain(|&mut i| i != index);
        self.budgets.eraser -= 1;
        self.eraser_armed = false;
        debug!(index, value, left = self.budgets.eraser, "tile erased");
        self.check_outcome();
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::rng::SimpleRng;
    use crate::types::{GameMode, GameStatus, LossReason};

    fn session_with(cells: Vec<Option<Tile>>) -> Session {
        Session::from_board(GameMode::Classic, Board::from_cells(cells))
    }

    #[test]
    fn test_hint_display() {
        assert_eq!(HintReport::new(0).to_string(), "0");
        assert_eq!(HintReport::new(5).to_string(), "5");
        assert!(!HintReport::new(5).capped);
        assert_eq!(HintReport::new(6).to_string(), "5+");
        assert!(HintReport::new(6).capped);
    }

    #[test]
    fn test_default_budgets() {
        let budgets = AssistBudgets::default();
        assert_eq!(budgets.revert, 0);
        assert_eq!(budgets.remaining(Assist::AddNumbers), Some(10));
        assert_eq!(budgets.remaining(Assist::Shuffle), Some(5));
        assert_eq!(budgets.remaining(Assist::Eraser), Some(5));
        assert_eq!(budgets.remaining(Assist::Hint), None);
        assert!(budgets.has_board_changers());
    }

    #[test]
    fn test_revert_without_budget() {
        let mut session = session_with(vec![Some(1), Some(2)]);
        assert_eq!(
            session.use_revert(),
            Err(Rejection::AssistExhausted(Assist::Revert))
        );
    }

    #[test]
    fn test_shuffle_keeps_positions() {
        let mut session = session_with(vec![Some(1), None, Some(2), Some(3), None, Some(4)]);
        let mut rng = SimpleRng::new(17);
        session.use_shuffle(&mut rng).unwrap();

        let board = session.board();
        assert!(board.is_vacant(1));
        assert!(board.is_vacant(4));
        let mut values: Vec<Tile> = board.occupied().map(|(_, v)| v).collect();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3, 4]);
        assert_eq!(session.budgets().shuffle, 4);
    }

    #[test]
    fn test_shuffle_exhausted() {
        let mut session = session_with(vec![Some(1), Some(2)]);
        let mut rng = SimpleRng::new(1);
        for _ in 0..5 {
            session.use_shuffle(&mut rng).unwrap();
        }
        let before = session.board().clone();
        assert_eq!(
            session.use_shuffle(&mut rng),
            Err(Rejection::AssistExhausted(Assist::Shuffle))
        );
        assert_eq!(session.board(), &before);
    }

    #[test]
    fn test_eraser_requires_arming() {
        let mut session = session_with(vec![Some(1), Some(2)]);
        assert_eq!(session.erase_cell(0), Err(Rejection::EraserNotArmed));
        assert_eq!(session.budgets().eraser, 5);
    }

    #[test]
    fn test_eraser_empty_cell_stays_armed() {
        let mut session = session_with(vec![Some(1), None, Some(2)]);
        session.arm_eraser().unwrap();
        assert_eq!(
            session.erase_cell(1),
            Err(Rejection::InvalidSelection { index: 1 })
        );
        assert!(session.eraser_armed());
        assert_eq!(session.erase_cell(2), Ok(2));
        assert!(!session.eraser_armed());
        assert_eq!(session.budgets().eraser, 4);
    }

    #[test]
    fn test_add_numbers_rejected_keeps_budget() {
        let mut session = session_with(vec![None, None]);
        let mut rng = SimpleRng::new(1);
        assert_eq!(
            session.use_add_numbers(&mut rng),
            Err(Rejection::GrowthRejected(crate::error::GrowthRejected::EmptyBoard))
        );
        assert_eq!(session.budgets().add_numbers, 10);
    }

    #[test]
    fn test_last_assist_without_moves_loses() {
        let mut session = session_with(vec![Some(1), Some(2), Some(4)]);
        session.budgets = AssistBudgets {
            revert: 0,
            add_numbers: 0,
            shuffle: 0,
            eraser: 1,
        };
        session.arm_eraser().unwrap();
        session.erase_cell(0).unwrap();
        assert_eq!(session.status(), GameStatus::Lost(LossReason::NoMoves));
    }

    #[test]
    fn test_last_shuffle_without_moves_loses() {
        // No arrangement of 1, 2 and 4 holds a pair.
        let mut session = session_with(vec![Some(1), Some(2), Some(4)]);
        session.budgets = AssistBudgets {
            revert: 0,
            add_numbers: 0,
            shuffle: 1,
            eraser: 0,
        };
        session.use_shuffle(&mut SimpleRng::new(3)).unwrap();
        assert_eq!(session.budgets().shuffle, 0);
        assert_eq!(session.status(), GameStatus::Lost(LossReason::NoMoves));
        assert_eq!(
            session.take_finished(),
            Some(GameStatus::Lost(LossReason::NoMoves))
        );
    }
}
