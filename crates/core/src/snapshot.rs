//! Session snapshots for save/continue
//!
//! A [`SessionSnapshot`] is a plain record of everything in a [`Session`].
//! Snapshots round-trip exactly through JSON. Restoring validates the record
//! first and refuses anything inconsistent rather than loading part of it.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::assists::AssistBudgets;
use crate::board::Board;
use crate::error::SnapshotError;
use crate::session::{LastMove, Session};
use crate::types::{Assist, GameMode, GameStatus, ROW_CAP, TARGET_SCORE};

/// Current snapshot layout version
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub version: u32,
    pub mode: GameMode,
    pub board: Board,
    pub score: u32,
    pub elapsed_secs: u64,
    pub selection: Vec<usize>,
    pub last_move: Option<LastMove>,
    pub budgets: AssistBudgets,
    pub eraser_armed: bool,
    pub status: GameStatus,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a snapshot
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check that the record describes a reachable session
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let max_tile = self.mode.max_tile();
        for (index, value) in self.board.occupied() {
            if value == 0 || value > max_tile {
                return Err(SnapshotError::BadTile { index, value });
            }
        }
        let rows = self.board.row_count();
        if rows > ROW_CAP {
            return Err(SnapshotError::TooManyRows { rows, cap: ROW_CAP });
        }

        match self.status {
            GameStatus::NotStarted => return Err(SnapshotError::NotASession("notStarted")),
            GameStatus::Playing if self.score >= TARGET_SCORE => {
                return Err(SnapshotError::BadStatus {
                    status: "playing",
                    score: self.score,
                })
            }
            GameStatus::Won if self.score < TARGET_SCORE => {
                return Err(SnapshotError::BadStatus {
                    status: "won",
                    score: self.score,
                })
            }
            _ => {}
        }

        if self.selection.len() > 2 {
            return Err(SnapshotError::BadSelection("more than two cells"));
        }
        if self.selection.len() == 2 && self.selection[0] == self.selection[1] {
            return Err(SnapshotError::BadSelection("cell selected twice"));
        }
        if self.selection.iter().any(|&i| !self.board.is_occupied(i)) {
            return Err(SnapshotError::BadSelection("selected cell holds no tile"));
        }

        if let Some(mv) = &self.last_move {
            if mv.first == mv.second {
                return Err(SnapshotError::BadLastMove("same cell twice"));
            }
            if !self.board.is_vacant(mv.first) || !self.board.is_vacant(mv.second) {
                return Err(SnapshotError::BadLastMove("matched cells are not empty"));
            }
            if [mv.first_value, mv.second_value]
                .iter()
                .any(|&v| v == 0 || v > max_tile)
            {
                return Err(SnapshotError::BadLastMove("matched value out of range"));
            }
            if mv.score_before > self.score {
                return Err(SnapshotError::BadLastMove("score went down"));
            }
        }

        for assist in [
            Assist::Revert,
            Assist::AddNumbers,
            Assist::Shuffle,
            Assist::Eraser,
        ] {
            if let (Some(value), Some(limit)) =
                (self.budgets.remaining(assist), AssistBudgets::limit(assist))
            {
                if value > limit {
                    return Err(SnapshotError::BadBudget {
                        assist: assist.as_str(),
                        value,
                        limit,
                    });
                }
            }
        }
        if self.eraser_armed && self.budgets.eraser == 0 {
            return Err(SnapshotError::BadBudget {
                assist: Assist::Eraser.as_str(),
                value: 0,
                limit: 0,
            });
        }

        Ok(())
    }
}

impl Session {
    /// Capture the full session state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            mode: self.mode,
            board: self.board.clone(),
            score: self.score,
            elapsed_secs: self.elapsed_secs,
            selection: self.selection.to_vec(),
            last_move: self.last_move,
            budgets: self.budgets,
            eraser_armed: self.eraser_armed,
            status: self.status,
        }
    }

    /// Rebuild a session from a snapshot, refusing inconsistent records
    ///
    /// A Playing record that already meets a win or loss condition comes back
    /// finished, with the outcome pending in [`Session::take_finished`].
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;

        let mut selection = ArrayVec::new();
        selection.extend(snapshot.selection.iter().copied());

        let mut session = Self {
            mode: snapshot.mode,
            board: snapshot.board,
            score: snapshot.score,
            elapsed_secs: snapshot.elapsed_secs,
            selection,
            last_move: snapshot.last_move,
            budgets: snapshot.budgets,
            eraser_armed: snapshot.eraser_armed,
            status: snapshot.status,
            finished: None,
        };
        session.check_outcome();
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::types::LossReason;

    fn playing_snapshot() -> SessionSnapshot {
        let mut rng = SimpleRng::new(21);
        Session::new(GameMode::Chaotic, &mut rng).snapshot()
    }

    #[test]
    fn test_fresh_snapshot_validates() {
        assert!(playing_snapshot().validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let mut session = Session::from_board(
            GameMode::Random,
            Board::from_cells(vec![Some(4), Some(6), Some(3), None, Some(12)]),
        );
        session.select(0).unwrap();
        session.select(1).unwrap();
        session.evaluate().unwrap();
        session.select(2).unwrap();
        session.tick();

        let snapshot = session.snapshot();
        let json = snapshot.to_json().unwrap();
        let parsed = SessionSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed, snapshot);

        let restored = Session::restore(parsed).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn test_rejects_wrong_version() {
        let mut snapshot = playing_snapshot();
        snapshot.version = 99;
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::Version { found: 99, .. })
        ));
    }

    #[test]
    fn test_rejects_garbage_json() {
        assert!(matches!(
            SessionSnapshot::from_json("{\"mode\": \"classic\""),
            Err(SnapshotError::Parse(_))
        ));
        assert!(matches!(
            SessionSnapshot::from_json("{\"mode\": \"zen\"}"),
            Err(SnapshotError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_selection_on_empty_cell() {
        let mut snapshot = playing_snapshot();
        snapshot.board = Board::from_cells(vec![Some(1), None]);
        snapshot.selection = vec![1];
        assert!(matches!(
            Session::restore(snapshot),
            Err(SnapshotError::BadSelection(_))
        ));
    }

    #[test]
    fn test_rejects_overfull_budget() {
        let mut snapshot = playing_snapshot();
        snapshot.budgets.shuffle = 6;
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::BadBudget { value: 6, limit: 5, .. })
        ));
    }

    #[test]
    fn test_rejects_last_move_on_occupied_cells() {
        let mut snapshot = playing_snapshot();
        snapshot.last_move = Some(LastMove {
            first: 0,
            second: 1,
            first_value: 3,
            second_value: 7,
            score_before: 0,
        });
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::BadLastMove(_))
        ));
    }

    #[test]
    fn test_rejects_zero_tile() {
        let mut snapshot = playing_snapshot();
        snapshot.board = Board::from_cells(vec![Some(0)]);
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::BadTile { index: 0, value: 0 })
        ));
    }

    #[test]
    fn test_rejects_tiles_outside_mode_range() {
        let mut snapshot = playing_snapshot();
        snapshot.board = Board::from_tiles(&[u32::MAX, 11, 3]);
        let json = snapshot.to_json().unwrap();
        assert!(matches!(
            SessionSnapshot::from_json(&json),
            Err(SnapshotError::BadTile { index: 0, value: u32::MAX })
        ));

        snapshot.board = Board::from_tiles(&[4, 10]);
        assert!(matches!(
            Session::restore(snapshot.clone()),
            Err(SnapshotError::BadTile { index: 1, value: 10 })
        ));

        snapshot.mode = GameMode::Random;
        assert!(snapshot.validate().is_ok());
        snapshot.board = Board::from_tiles(&[4, 20]);
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::BadTile { index: 1, value: 20 })
        ));

        snapshot.mode = GameMode::Classic;
        snapshot.board = Board::from_tiles(&[4, 469]);
        assert!(snapshot.validate().is_ok());
        snapshot.board = Board::from_tiles(&[4, 470]);
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_rejects_last_move_value_outside_mode_range() {
        let mut snapshot = playing_snapshot();
        snapshot.board = Board::from_cells(vec![None, None, Some(3)]);
        snapshot.last_move = Some(LastMove {
            first: 0,
            second: 1,
            first_value: u32::MAX,
            second_value: 11,
            score_before: 0,
        });
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::BadLastMove(_))
        ));
    }

    #[test]
    fn test_restore_finishes_stuck_session() {
        let mut snapshot = playing_snapshot();
        snapshot.board = Board::from_tiles(&[1, 2]);
        snapshot.budgets = AssistBudgets {
            revert: 0,
            add_numbers: 0,
            shuffle: 0,
            eraser: 0,
        };
        let mut session = Session::restore(snapshot).unwrap();
        assert_eq!(session.status(), GameStatus::Lost(LossReason::NoMoves));
        assert_eq!(
            session.take_finished(),
            Some(GameStatus::Lost(LossReason::NoMoves))
        );
    }

    #[test]
    fn test_restore_keeps_live_session_playing() {
        let mut session = Session::restore(playing_snapshot()).unwrap();
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.take_finished(), None);
    }

    #[test]
    fn test_rejects_inconsistent_status() {
        let mut snapshot = playing_snapshot();
        snapshot.status = GameStatus::Won;
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::BadStatus { status: "won", .. })
        ));
    }
}
