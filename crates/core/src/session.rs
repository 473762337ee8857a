//! Session module - one game in progress
//!
//! A [`Session`] owns the board, score, timer, selection, undo record and
//! assist budgets of a single game. Every mutation goes through a method here
//! or in [`crate::assists`]; a refused operation returns a [`Rejection`] and
//! leaves the session untouched.
//!
//! Pair selection is two-phase. Selecting a second tile leaves the pair
//! pending; [`Session::evaluate`] resolves it. The frontend inserts its settle
//! delay between the two calls, tests call them back to back.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::assists::AssistBudgets;
use crate::board::Board;
use crate::error::Rejection;
use crate::generator;
use crate::matching::{count_valid_moves, is_valid_pair, score_for};
use crate::rng::TileRng;
use crate::types::{GameMode, GameStatus, LossReason, Tile, ROW_CAP, TARGET_SCORE};

/// Record of the most recent match, enough to undo it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMove {
    pub first: usize,
    pub second: usize,
    pub first_value: Tile,
    pub second_value: Tile,
    pub score_before: u32,
}

/// Outcome of evaluating a selected pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub accepted: bool,
    pub points: u32,
    pub pair: [usize; 2],
}

impl MatchResult {
    /// Cells emptied by this match (none when rejected)
    pub fn removed_indices(&self) -> &[usize] {
        if self.accepted {
            &self.pair
        } else {
            &[]
        }
    }
}

/// What a cell selection did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectEffect {
    /// Cell added as the first pick
    Selected,
    /// Cell was already selected and got dropped
    Deselected,
    /// Second cell picked; call [`Session::evaluate`]
    PairPending,
    /// Armed eraser removed the cell
    Erased(Tile),
    /// A pair is already waiting for evaluation
    Busy,
}

impl SelectEffect {
    pub fn selection_changed(&self) -> bool {
        !matches!(self, SelectEffect::Busy)
    }
}

/// A single game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) mode: GameMode,
    pub(crate) board: Board,
    pub(crate) score: u32,
    pub(crate) elapsed_secs: u64,
    pub(crate) selection: ArrayVec<usize, 2>,
    pub(crate) last_move: Option<LastMove>,
    pub(crate) budgets: AssistBudgets,
    pub(crate) eraser_armed: bool,
    pub(crate) status: GameStatus,
    /// Terminal status not yet picked up by the controller.
    pub(crate) finished: Option<GameStatus>,
}

impl Session {
    /// Start a game in `mode` with a freshly generated board
    pub fn new<R: TileRng>(mode: GameMode, rng: &mut R) -> Self {
        let session = Self::from_board(mode, generator::initial_board(mode, rng));
        info!(
            mode = mode.as_str(),
            tiles = session.board.len(),
            "game started"
        );
        session
    }

    /// Start a game in `mode` on a given board
    pub fn from_board(mode: GameMode, board: Board) -> Self {
        Self {
            mode,
            board,
            score: 0,
            elapsed_secs: 0,
            selection: ArrayVec::new(),
            last_move: None,
            budgets: AssistBudgets::default(),
            eraser_armed: false,
            status: GameStatus::Playing,
            finished: None,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    pub fn budgets(&self) -> &AssistBudgets {
        &self.budgets
    }

    pub fn eraser_armed(&self) -> bool {
        self.eraser_armed
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if a selected pair is waiting for [`Session::evaluate`]
    pub fn pair_pending(&self) -> bool {
        self.selection.is_full()
    }

    pub(crate) fn ensure_playing(&self) -> Result<(), Rejection> {
        if self.status.is_playing() {
            Ok(())
        } else {
            Err(Rejection::NotPlaying)
        }
    }

    /// Advance the clock by one second while the game is live
    pub fn tick(&mut self) -> bool {
        if !self.status.is_playing() {
            return false;
        }
        self.elapsed_secs += 1;
        true
    }

    /// Select the cell at `index`
    ///
    /// With the eraser armed the cell is erased instead. Selecting an already
    /// selected cell deselects it.
    pub fn select(&mut self, index: usize) -> Result<SelectEffect, Rejection> {
        self.ensure_playing()?;
        if !self.board.is_occupied(index) {
            return Err(Rejection::InvalidSelection { index });
        }
        if self.eraser_armed {
            return self.erase_cell(index).map(SelectEffect::Erased);
        }

        if let Some(pos) = self.selection.iter().position(|&i| i == index) {
            self.selection.remove(pos);
            return Ok(SelectEffect::Deselected);
        }
        if self.selection.is_full() {
            return Ok(SelectEffect::Busy);
        }

        self.selection.push(index);
        debug!(index, selected = self.selection.len(), "cell selected");
        if self.selection.is_full() {
            Ok(SelectEffect::PairPending)
        } else {
            Ok(SelectEffect::Selected)
        }
    }

    /// Resolve the pending pair
    ///
    /// A valid pair is removed and scored; an invalid one just clears the
    /// selection. Either way the selection is empty afterwards.
    pub fn evaluate(&mut self) -> Result<MatchResult, Rejection> {
        self.ensure_playing()?;
        if !self.selection.is_full() {
            return Err(Rejection::NoPendingPair);
        }
        let pair = [self.selection[0], self.selection[1]];
        self.selection.clear();

        if !is_valid_pair(&self.board, pair[0], pair[1]) {
            debug!(first = pair[0], second = pair[1], "pair rejected");
            return Ok(MatchResult {
                accepted: false,
                points: 0,
                pair,
            });
        }

        let points = self.apply_match(pair[0], pair[1]);
        self.check_outcome();
        Ok(MatchResult {
            accepted: true,
            points,
            pair,
        })
    }

    /// Remove a validated pair and score it
    fn apply_match(&mut self, first: usize, second: usize) -> u32 {
        let first_value = self.board.clear(first).unwrap_or_default();
        let second_value = self.board.clear(second).unwrap_or_default();
        let points = score_for(first_value, second_value);

        self.last_move = Some(LastMove {
            first,
            second,
            first_value,
            second_value,
            score_before: self.score,
        });
        self.score += points;
        self.budgets.revert = 1;

        debug!(
            first,
            second,
            first_value,
            second_value,
            points,
            score = self.score,
            "pair matched"
        );
        points
    }

    /// Re-evaluate win/lose conditions after the board changed
    pub(crate) fn check_outcome(&mut self) {
        if !self.status.is_playing() {
            return;
        }

        let status = if self.score >= TARGET_SCORE {
            GameStatus::Won
        } else if self.board.row_count() >= ROW_CAP {
            GameStatus::Lost(LossReason::GridLimit)
        } else if !self.budgets.has_board_changers() && count_valid_moves(&self.board) == 0 {
            GameStatus::Lost(LossReason::NoMoves)
        } else {
            return;
        };

        self.status = status;
        self.selection.clear();
        self.eraser_armed = false;
        self.finished = Some(status);
        info!(
            mode = self.mode.as_str(),
            score = self.score,
            elapsed_secs = self.elapsed_secs,
            status = ?status,
            "game finished"
        );
    }

    /// Take the terminal status reached since the last call, if any
    pub fn take_finished(&mut self) -> Option<GameStatus> {
        self.finished.take()
    }
}
