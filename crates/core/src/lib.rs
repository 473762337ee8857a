//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the rules of Pair 'em Up: the board, which tiles
//! may be paired, scoring, board growth, assists, and the session lifecycle.
//! It has **no dependencies** on terminal I/O or storage, making it:
//!
//! - **Deterministic**: All randomness flows through an injectable [`TileRng`]
//! - **Testable**: Every operation runs synchronously to completion
//! - **Fail-safe**: Refused operations return a [`Rejection`] and change nothing
//!
//! # Module Structure
//!
//! - [`board`]: flat cell sequence on a 9-wide wrapping grid
//! - [`connectivity`]: which two cells may be paired, regardless of value
//! - [`matching`]: value compatibility, scoring, valid-move counting
//! - [`generator`]: starting boards and "add numbers" growth per mode
//! - [`assists`]: hint, revert, add numbers, shuffle, eraser
//! - [`session`]: one game, with two-phase pair selection
//! - [`game`]: controller owning the session, RNG, save slot and history
//! - [`snapshot`]: save/continue records
//! - [`history`]: the last five finished games
//! - [`rng`]: RNG trait and a small seeded LCG
//!
//! # Game Rules
//!
//! - **Pairs**: two tiles with equal values or values summing to ten
//! - **Connectivity**: neighbours, a clear straight line in a row or column,
//!   or the end of one row and the start of the next
//! - **Scoring**: 5+5 scores 3, other equal pairs 1, sum-to-ten pairs 2
//! - **Win**: reach 100 points
//! - **Lose**: hit the 50-row grid limit, or run out of pairs with no
//!   add-numbers, shuffle or eraser uses left
//!
//! # Example
//!
//! ```
//! use pair_em_up_core::{Board, Game, GameMode, GameStatus, Session};
//!
//! let mut game = Game::new(12345);
//! game.start_game(GameMode::Classic);
//! assert_eq!(game.status(), GameStatus::Playing);
//!
//! // Grow the board: the Classic start has no pairs yet.
//! let appended = game.use_add_numbers().unwrap();
//! assert_eq!(appended, 19);
//!
//! // Two adjacent tiles summing to ten.
//! let snapshot = Session::from_board(GameMode::Classic, Board::from_tiles(&[4, 6])).snapshot();
//! game.restore_session(snapshot).unwrap();
//! game.select_cell(0).unwrap();
//! let result = game.select_cell(1).unwrap();
//! assert_eq!(result.match_result.map(|m| m.points), Some(2));
//! ```

pub mod assists;
pub mod board;
pub mod connectivity;
pub mod error;
pub mod game;
pub mod generator;
pub mod history;
pub mod matching;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use pair_em_up_types as types;

// Re-export commonly used types for convenience
pub use assists::{AssistBudgets, HintReport};
pub use board::{position, Board};
pub use connectivity::are_connected;
pub use error::{GrowthRejected, Rejection, SnapshotError};
pub use game::{Game, SelectResult};
pub use history::{GameResult, ResultHistory};
pub use matching::{count_valid_moves, first_valid_pair, is_valid_pair, score_for};
pub use rng::{SimpleRng, TileRng};
pub use session::{LastMove, MatchResult, SelectEffect, Session};
pub use snapshot::{SessionSnapshot, SNAPSHOT_VERSION};
pub use types::{GameMode, GameStatus, LossReason};
