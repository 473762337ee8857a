//! Game controller - owns the live session, the RNG, the save slot and history
//!
//! [`Game`] is the surface the frontend talks to. It holds at most one
//! [`Session`]; starting a new game replaces it. When a session reaches a
//! terminal state the controller records a [`GameResult`] and clears the save
//! slot.

use chrono::Utc;
use tracing::{info, warn};

use crate::assists::HintReport;
use crate::error::{Rejection, SnapshotError};
use crate::history::{GameResult, ResultHistory};
use crate::rng::{SimpleRng, TileRng};
use crate::session::{MatchResult, SelectEffect, Session};
use crate::snapshot::SessionSnapshot;
use crate::types::{GameMode, GameStatus, Tile};

/// Result of a synchronous cell selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectResult {
    pub effect: SelectEffect,
    /// Set when the selection completed a pair
    pub match_result: Option<MatchResult>,
}

impl SelectResult {
    pub fn selection_changed(&self) -> bool {
        self.effect.selection_changed()
    }
}

/// The game controller
#[derive(Debug, Clone)]
pub struct Game<R: TileRng = SimpleRng> {
    session: Option<Session>,
    rng: R,
    history: ResultHistory,
    saved: Option<SessionSnapshot>,
}

impl Game<SimpleRng> {
    /// Create a controller with a seeded [`SimpleRng`]
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl Default for Game<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: TileRng> Game<R> {
    /// Create a controller drawing randomness from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self {
            session: None,
            rng,
            history: ResultHistory::new(),
            saved: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn status(&self) -> GameStatus {
        self.session
            .as_ref()
            .map_or(GameStatus::NotStarted, Session::status)
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.session.as_ref().map(Session::mode)
    }

    /// Start a fresh game in `mode`, replacing any current one
    pub fn start_game(&mut self, mode: GameMode) -> SessionSnapshot {
        let session = Session::new(mode, &mut self.rng);
        let snapshot = session.snapshot();
        self.session = Some(session);
        snapshot
    }

    /// Start over with the current mode
    pub fn restart(&mut self) -> Result<SessionSnapshot, Rejection> {
        let mode = self.mode().ok_or(Rejection::NotPlaying)?;
        Ok(self.start_game(mode))
    }

    /// One-second timer tick
    pub fn tick(&mut self) -> bool {
        self.session.as_mut().is_some_and(Session::tick)
    }

    /// Select a cell and, if that completes a pair, evaluate it immediately
    pub fn select_cell(&mut self, index: usize) -> Result<SelectResult, Rejection> {
        self.with_session(|session, _| {
            let effect = session.select(index)?;
            let match_result = match effect {
                SelectEffect::PairPending => Some(session.evaluate()?),
                _ => None,
            };
            Ok(SelectResult {
                effect,
                match_result,
            })
        })
    }

    /// Select a cell, leaving a completed pair pending
    ///
    /// The frontend calls [`Game::evaluate_pending`] after its settle delay.
    pub fn select_cell_deferred(&mut self, index: usize) -> Result<SelectEffect, Rejection> {
        self.with_session(|session, _| session.select(index))
    }

    /// Evaluate the pair left pending by [`Game::select_cell_deferred`]
    pub fn evaluate_pending(&mut self) -> Result<MatchResult, Rejection> {
        self.with_session(|session, _| session.evaluate())
    }

    pub fn use_hint(&mut self) -> Result<HintReport, Rejection> {
        self.with_session(|session, _| session.use_hint())
    }

    pub fn use_revert(&mut self) -> Result<(), Rejection> {
        self.with_session(|session, _| session.use_revert())
    }

    /// Grow the board; returns the number of tiles appended
    pub fn use_add_numbers(&mut self) -> Result<usize, Rejection> {
        self.with_session(|session, rng| session.use_add_numbers(rng))
    }

    pub fn use_shuffle(&mut self) -> Result<(), Rejection> {
        self.with_session(|session, rng| session.use_shuffle(rng))
    }

    pub fn arm_eraser(&mut self) -> Result<(), Rejection> {
        self.with_session(|session, _| session.arm_eraser())
    }

    pub fn erase_cell(&mut self, index: usize) -> Result<Tile, Rejection> {
        self.with_session(|session, _| session.erase_cell(index))
    }

    /// Snapshot of the live session
    pub fn serialize_session(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(Session::snapshot)
    }

    /// Replace the live session with a restored one
    ///
    /// A snapshot that fails validation is refused and the controller keeps
    /// whatever it had before.
    pub fn restore_session(&mut self, snapshot: SessionSnapshot) -> Result<(), SnapshotError> {
        match Session::restore(snapshot) {
            Ok(session) => {
                info!(mode = session.mode().as_str(), score = session.score(), "session restored");
                self.session = Some(session);
                self.record_finished();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "snapshot rejected");
                Err(err)
            }
        }
    }

    /// Store the live session in the save slot
    pub fn save_game(&mut self) -> Result<(), Rejection> {
        let session = self.session.as_ref().ok_or(Rejection::NotPlaying)?;
        session.ensure_playing()?;
        self.saved = Some(session.snapshot());
        Ok(())
    }

    pub fn has_saved_game(&self) -> bool {
        self.saved.is_some()
    }

    pub fn saved_game(&self) -> Option<&SessionSnapshot> {
        self.saved.as_ref()
    }

    /// Fill the save slot, e.g. from disk
    pub fn set_saved_game(&mut self, snapshot: Option<SessionSnapshot>) {
        self.saved = snapshot;
    }

    /// Resume the game in the save slot
    pub fn continue_game(&mut self) -> Result<(), SnapshotError> {
        match self.saved.clone() {
            Some(snapshot) => self.restore_session(snapshot),
            None => Err(SnapshotError::NotASession("empty save slot")),
        }
    }

    /// Prepend a finished game to the history
    pub fn append_result(&mut self, result: GameResult) {
        self.history.push(result);
    }

    /// Most recent results, newest first
    pub fn list_results(&self) -> Vec<GameResult> {
        self.history.iter().cloned().collect()
    }

    pub fn history(&self) -> &ResultHistory {
        &self.history
    }

    /// Replace the history, e.g. from disk
    pub fn set_history(&mut self, history: ResultHistory) {
        self.history = history;
    }

    /// Run `f` on the live session, then record the outcome if it just ended
    fn with_session<T>(
        &mut self,
        f: impl FnOnce(&mut Session, &mut R) -> Result<T, Rejection>,
    ) -> Result<T, Rejection> {
        let session = self.session.as_mut().ok_or(Rejection::NotPlaying)?;
        let result = f(session, &mut self.rng);
        self.record_finished();
        result
    }

    /// Record a result if the live session just reached a terminal state
    fn record_finished(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(status) = session.take_finished() else {
            return;
        };
        let reason = match status {
            GameStatus::Lost(reason) => Some(reason),
            _ => None,
        };
        let record = GameResult {
            mode: session.mode(),
            score: session.score(),
            elapsed_secs: session.elapsed_secs(),
            won: status == GameStatus::Won,
            reason,
            finished_at: Utc::now(),
        };
        self.finish(record);
    }

    fn finish(&mut self, record: GameResult) {
        info!(
            won = record.won,
            reason = record.reason.map(|r| r.message()),
            score = record.score,
            "result recorded"
        );
        self.history.push(record);
        self.saved = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assists::AssistBudgets;
    use crate::board::Board;
    use crate::types::LossReason;

    fn game_with_board(cells: Vec<Option<Tile>>) -> Game {
        let mut game = Game::new(1);
        let snapshot = SessionSnapshot {
            board: Board::from_cells(cells),
            ..Session::from_board(GameMode::Classic, Board::new()).snapshot()
        };
        game.restore_session(snapshot).unwrap();
        game
    }

    #[test]
    fn test_not_started() {
        let mut game = Game::new(1);
        assert_eq!(game.status(), GameStatus::NotStarted);
        assert_eq!(game.select_cell(0), Err(Rejection::NotPlaying));
        assert_eq!(game.restart(), Err(Rejection::NotPlaying));
        assert!(!game.tick());
        assert!(game.serialize_session().is_none());
    }

    #[test]
    fn test_start_game_resets() {
        let mut game = Game::new(1);
        let snapshot = game.start_game(GameMode::Classic);
        assert_eq!(snapshot.status, GameStatus::Playing);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.board.len(), 19);
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_deferred_selection() {
        let mut game = game_with_board(vec![Some(4), Some(6), Some(2)]);
        assert_eq!(game.select_cell_deferred(0), Ok(SelectEffect::Selected));
        assert_eq!(game.select_cell_deferred(1), Ok(SelectEffect::PairPending));
        assert_eq!(game.session().map(|s| s.score()), Some(0));

        let result = game.evaluate_pending().unwrap();
        assert!(result.accepted);
        assert_eq!(game.session().map(|s| s.score()), Some(2));
    }

    #[test]
    fn test_save_cleared_on_finish() {
        let mut game = Game::new(1);
        let snapshot = SessionSnapshot {
            board: Board::from_tiles(&[1, 2, 4]),
            budgets: AssistBudgets {
                revert: 0,
                add_numbers: 0,
                shuffle: 0,
                eraser: 1,
            },
            ..Session::from_board(GameMode::Random, Board::new()).snapshot()
        };
        game.restore_session(snapshot).unwrap();
        game.save_game().unwrap();
        assert!(game.has_saved_game());

        game.arm_eraser().unwrap();
        assert_eq!(game.erase_cell(0), Ok(1));

        assert_eq!(game.status(), GameStatus::Lost(LossReason::NoMoves));
        assert!(!game.has_saved_game());
        assert_eq!(game.save_game(), Err(Rejection::NotPlaying));

        let results = game.list_results();
        assert_eq!(results.len(), 1);
        assert!(!results[0].won);
        assert_eq!(results[0].mode, GameMode::Random);
        assert_eq!(results[0].reason, Some(LossReason::NoMoves));
    }

    #[test]
    fn test_restore_failure_keeps_state() {
        let mut game = Game::new(1);
        let mut snapshot = Session::from_board(GameMode::Classic, Board::new()).snapshot();
        snapshot.version = 0;
        assert!(game.restore_session(snapshot).is_err());
        assert_eq!(game.status(), GameStatus::NotStarted);
    }

    #[test]
    fn test_continue_without_save() {
        let mut game = Game::new(1);
        assert!(game.continue_game().is_err());
        assert_eq!(game.status(), GameStatus::NotStarted);
    }
}
