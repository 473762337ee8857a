//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic, so they can be used from the
//! core engine, the terminal view, and the input mapping alike.
//!
//! # Grid Dimensions
//!
//! The board is a flat sequence of cells wrapped onto a fixed-width grid:
//!
//! - **Width**: 9 columns (indexed 0-8)
//! - **Height**: grows by appends, capped at 50 rows
//!
//! # Session Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TARGET_SCORE` | 100 | Score that wins the game |
//! | `ADD_NUMBERS_BUDGET` | 10 | Add-numbers uses per game |
//! | `SHUFFLE_BUDGET` | 5 | Shuffle uses per game |
//! | `ERASER_BUDGET` | 5 | Eraser uses per game |
//! | `HINT_DISPLAY_CAP` | 5 | Hint counts above this show as "5+" |
//! | `RESULT_HISTORY_LEN` | 5 | Finished games kept in history |
//!
//! # Examples
//!
//! ```
//! use pair_em_up_types::{GameAction, GameMode, ROW_WIDTH, ROW_CAP};
//!
//! let mode = GameMode::from_str("Chaotic").unwrap();
//! assert_eq!(mode, GameMode::Chaotic);
//! assert_eq!(mode.as_str(), "chaotic");
//!
//! assert_eq!(GameAction::from_str("addNumbers"), Some(GameAction::AddNumbers));
//!
//! assert_eq!(ROW_WIDTH, 9);
//! assert_eq!(ROW_CAP, 50);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (9 columns)
pub const ROW_WIDTH: usize = 9;

/// Hard cap on the number of board rows (50)
pub const ROW_CAP: usize = 50;

/// Score needed to win (100)
pub const TARGET_SCORE: u32 = 100;

/// Largest value in the Classic/Random starting set (1..=19)
pub const TILE_SET_MAX: Tile = 19;

/// Largest value drawn in Chaotic mode (1..=9)
pub const CHAOTIC_MAX: Tile = 9;

/// Number of tiles on a fresh Chaotic board (three full rows)
pub const CHAOTIC_INITIAL_TILES: usize = 27;

/// Two tiles of different value pair up when they sum to this
pub const PAIR_SUM: Tile = 10;

/// Add-numbers uses per game
pub const ADD_NUMBERS_BUDGET: u8 = 10;

/// Shuffle uses per game
pub const SHUFFLE_BUDGET: u8 = 5;

/// Eraser uses per game
pub const ERASER_BUDGET: u8 = 5;

/// Hint counts above this are reported as capped ("5+")
pub const HINT_DISPLAY_CAP: usize = 5;

/// Finished games kept in the result history (most recent first)
pub const RESULT_HISTORY_LEN: usize = 5;

/// Delay between picking the second tile and evaluating the pair (view only)
pub const SETTLE_DELAY_MS: u64 = 300;

/// Elapsed-time tick interval
pub const TIMER_TICK_MS: u64 = 1000;

/// A tile value
pub type Tile = u32;

/// A cell on the game board
///
/// - `None`: Empty cell (tile removed)
/// - `Some(Tile)`: Cell holding the given value
pub type Cell = Option<Tile>;

/// Game modes, chosen once when a game starts
///
/// - **Classic**: 1..19 in order, growth counts upward
/// - **Random**: 1..19 shuffled, growth refills missing values
/// - **Chaotic**: 27 random tiles in 1..9, growth draws more
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Classic,
    Random,
    Chaotic,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Classic, GameMode::Random, GameMode::Chaotic];

    /// Parse mode from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use pair_em_up_types::GameMode;
    ///
    /// assert_eq!(GameMode::from_str("classic"), Some(GameMode::Classic));
    /// assert_eq!(GameMode::from_str("RANDOM"), Some(GameMode::Random));
    /// assert_eq!(GameMode::from_str("zen"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "random" => Some(GameMode::Random),
            "chaotic" => Some(GameMode::Chaotic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Random => "random",
            GameMode::Chaotic => "chaotic",
        }
    }

    /// Largest tile value a board in this mode can ever hold
    ///
    /// Classic growth counts upward from the current maximum, so its bound is
    /// the starting set plus one value per cell the capped grid can hold.
    ///
    /// ```
    /// use pair_em_up_types::GameMode;
    ///
    /// assert_eq!(GameMode::Chaotic.max_tile(), 9);
    /// assert_eq!(GameMode::Random.max_tile(), 19);
    /// assert_eq!(GameMode::Classic.max_tile(), 469);
    /// ```
    pub const fn max_tile(&self) -> Tile {
        match self {
            GameMode::Classic => TILE_SET_MAX + (ROW_CAP * ROW_WIDTH) as Tile,
            GameMode::Random => TILE_SET_MAX,
            GameMode::Chaotic => CHAOTIC_MAX,
        }
    }

    /// Capitalized name for display
    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Random => "Random",
            GameMode::Chaotic => "Chaotic",
        }
    }
}

/// Why a game was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LossReason {
    /// The board reached the row cap
    GridLimit,
    /// No valid pairs and no board-changing assists left
    NoMoves,
}

impl LossReason {
    pub fn message(&self) -> &'static str {
        match self {
            LossReason::GridLimit => "Grid limit reached.",
            LossReason::NoMoves => "No moves available.",
        }
    }
}

/// Session lifecycle
///
/// `NotStarted -> Playing -> (Won | Lost)`; the last two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "camelCase")]
pub enum GameStatus {
    NotStarted,
    Playing,
    Won,
    Lost(LossReason),
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost(_))
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, GameStatus::Playing)
    }
}

/// Player-facing assists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Assist {
    Hint,
    Revert,
    AddNumbers,
    Shuffle,
    Eraser,
}

impl Assist {
    pub fn as_str(&self) -> &'static str {
        match self {
            Assist::Hint => "hint",
            Assist::Revert => "revert",
            Assist::AddNumbers => "addNumbers",
            Assist::Shuffle => "shuffle",
            Assist::Eraser => "eraser",
        }
    }
}

/// Actions the frontend can apply
///
/// Cursor movement is view state; everything else maps onto a core operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the board cursor one cell left
    CursorLeft,
    /// Move the board cursor one cell right
    CursorRight,
    /// Move the board cursor one row up
    CursorUp,
    /// Move the board cursor one row down
    CursorDown,
    /// Select (or erase, when the eraser is armed) the cell under the cursor
    Select,
    /// Report the number of valid pairs
    Hint,
    /// Undo the last match
    Revert,
    /// Grow the board
    AddNumbers,
    /// Shuffle remaining tiles
    Shuffle,
    /// Arm the eraser
    Eraser,
    /// Start a new game with the given mode
    NewGame(GameMode),
    /// Restart with the current mode
    Restart,
    /// Save the current game
    Save,
    /// Continue the saved game
    Continue,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use pair_em_up_types::{GameAction, GameMode};
    ///
    /// assert_eq!(GameAction::from_str("select"), Some(GameAction::Select));
    /// assert_eq!(GameAction::from_str("newRandom"), Some(GameAction::NewGame(GameMode::Random)));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "select" => Some(GameAction::Select),
            "hint" => Some(GameAction::Hint),
            "revert" => Some(GameAction::Revert),
            "addnumbers" => Some(GameAction::AddNumbers),
            "shuffle" => Some(GameAction::Shuffle),
            "eraser" => Some(GameAction::Eraser),
            "newclassic" => Some(GameAction::NewGame(GameMode::Classic)),
            "newrandom" => Some(GameAction::NewGame(GameMode::Random)),
            "newchaotic" => Some(GameAction::NewGame(GameMode::Chaotic)),
            "restart" => Some(GameAction::Restart),
            "save" => Some(GameAction::Save),
            "continue" => Some(GameAction::Continue),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::Select => "select",
            GameAction::Hint => "hint",
            GameAction::Revert => "revert",
            GameAction::AddNumbers => "addNumbers",
            GameAction::Shuffle => "shuffle",
            GameAction::Eraser => "eraser",
            GameAction::NewGame(GameMode::Classic) => "newClassic",
            GameAction::NewGame(GameMode::Random) => "newRandom",
            GameAction::NewGame(GameMode::Chaotic) => "newChaotic",
            GameAction::Restart => "restart",
            GameAction::Save => "save",
            GameAction::Continue => "continue",
        }
    }
}
