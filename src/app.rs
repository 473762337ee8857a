//! Frontend state around the game controller.
//!
//! `App` turns [`GameAction`]s into controller calls and keeps what only the
//! terminal cares about: the cursor, the status line, the highlighted hint,
//! the pair settle delay and the one-second timer.

use pair_em_up_core::matching::first_valid_pair;
use pair_em_up_core::{Game, Rejection, SelectEffect, SimpleRng, TileRng};
use pair_em_up_term::ViewModel;
use tracing::debug;

use crate::types::{GameAction, GameMode, ROW_WIDTH, SETTLE_DELAY_MS, TIMER_TICK_MS};

/// What changed on disk-backed state during the last action or update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Persist {
    pub save: bool,
    pub results: bool,
}

impl Persist {
    pub fn any(&self) -> bool {
        self.save || self.results
    }
}

pub struct App<R: TileRng = SimpleRng> {
    game: Game<R>,
    cursor: usize,
    hint: Option<(usize, usize)>,
    message: Option<String>,
    /// Milliseconds left before a pending pair is evaluated
    settle_ms: Option<u64>,
    tick_accum_ms: u64,
    persist: Persist,
}

impl<R: TileRng> App<R> {
    pub fn new(game: Game<R>) -> Self {
        Self {
            game,
            cursor: 0,
            hint: None,
            message: None,
            settle_ms: None,
            tick_accum_ms: 0,
            persist: Persist::default(),
        }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<(usize, usize)> {
        self.hint
    }

    pub fn settle_pending(&self) -> bool {
        self.settle_ms.is_some()
    }

    /// Flags for the store, cleared on read
    pub fn take_persist(&mut self) -> Persist {
        std::mem::take(&mut self.persist)
    }

    pub fn view_model(&self) -> ViewModel<'_> {
        ViewModel {
            session: self.game.session(),
            cursor: self.cursor,
            hint: self.hint,
            message: self.message.as_deref(),
            results: self.game.history(),
            has_saved_game: self.game.has_saved_game(),
        }
    }

    /// Apply a single action. Returns true when the screen needs a redraw.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::CursorLeft => return self.move_cursor(-1),
            GameAction::CursorRight => return self.move_cursor(1),
            GameAction::CursorUp => return self.move_cursor(-(ROW_WIDTH as isize)),
            GameAction::CursorDown => return self.move_cursor(ROW_WIDTH as isize),
            _ => {}
        }

        // Anything else acts on the board, so settle a waiting pair first.
        if !matches!(action, GameAction::Select) {
            self.flush_pending();
        }

        let was_terminal = self.game.status().is_terminal();
        match action {
            GameAction::Select => self.select(),
            GameAction::Hint => self.show_hint(),
            GameAction::Revert => self.run(|game| game.use_revert(), "Move reverted"),
            GameAction::AddNumbers => match self.game.use_add_numbers() {
                Ok(count) => self.changed(format!("Added {count} numbers")),
                Err(err) => self.reject(err),
            },
            GameAction::Shuffle => self.run(|game| game.use_shuffle(), "Board shuffled"),
            GameAction::Eraser => match self.game.arm_eraser() {
                Ok(()) => self.message = Some("Eraser armed: pick a cell".to_string()),
                Err(err) => self.reject(err),
            },
            GameAction::NewGame(mode) => self.start(mode),
            GameAction::Restart => match self.game.mode() {
                Some(mode) => self.start(mode),
                None => self.reject(Rejection::NotPlaying),
            },
            GameAction::Save => match self.game.save_game() {
                Ok(()) => {
                    self.persist.save = true;
                    self.message = Some("Game saved".to_string());
                }
                Err(err) => self.reject(err),
            },
            GameAction::Continue => match self.game.continue_game() {
                Ok(()) => {
                    self.reset_frontend();
                    self.message = Some("Saved game restored".to_string());
                }
                Err(err) => self.message = Some(format!("Cannot continue: {err}")),
            },
            _ => {}
        }
        self.note_outcome(was_terminal);
        true
    }

    /// Advance timers by `elapsed_ms`. Returns true when the screen needs a redraw.
    pub fn update(&mut self, elapsed_ms: u64) -> bool {
        let mut redraw = false;

        if let Some(left) = self.settle_ms {
            if elapsed_ms >= left {
                self.flush_pending();
                redraw = true;
            } else {
                self.settle_ms = Some(left - elapsed_ms);
            }
        }

        self.tick_accum_ms += elapsed_ms;
        while self.tick_accum_ms >= TIMER_TICK_MS {
            self.tick_accum_ms -= TIMER_TICK_MS;
            redraw |= self.game.tick();
        }
        redraw
    }

    /// Milliseconds until [`App::update`] has work to do.
    pub fn next_deadline_ms(&self) -> u64 {
        let tick = TIMER_TICK_MS - self.tick_accum_ms.min(TIMER_TICK_MS);
        self.settle_ms.map_or(tick, |left| left.min(tick))
    }

    fn move_cursor(&mut self, delta: isize) -> bool {
        let Some(session) = self.game.session() else {
            return false;
        };
        let len = session.board().len();
        if len == 0 {
            self.cursor = 0;
            return false;
        }
        let target = self.cursor as isize + delta;
        if target < 0 || target as usize >= len {
            return false;
        }
        self.cursor = target as usize;
        true
    }

    fn select(&mut self) {
        match self.game.select_cell_deferred(self.cursor) {
            Ok(SelectEffect::PairPending) => {
                self.settle_ms = Some(SETTLE_DELAY_MS);
                self.message = None;
            }
            Ok(SelectEffect::Erased(value)) => self.changed(format!("Erased {value}")),
            Ok(SelectEffect::Selected | SelectEffect::Deselected) => self.message = None,
            Ok(SelectEffect::Busy) => {}
            Err(err) => self.reject(err),
        }
    }

    /// Evaluate a pair waiting on the settle delay, if any
    fn flush_pending(&mut self) {
        if self.settle_ms.take().is_none() {
            return;
        }
        let was_terminal = self.game.status().is_terminal();
        match self.game.evaluate_pending() {
            Ok(result) if result.accepted => {
                self.changed(format!("+{} points", result.points));
            }
            Ok(_) => self.message = Some("Those two do not pair".to_string()),
            Err(err) => self.reject(err),
        }
        self.note_outcome(was_terminal);
    }

    fn show_hint(&mut self) {
        match self.game.use_hint() {
            Ok(report) => {
                self.hint = self
                    .game
                    .session()
                    .and_then(|session| first_valid_pair(session.board()));
                self.message = Some(format!("Moves available: {report}"));
            }
            Err(err) => self.reject(err),
        }
    }

    fn run(&mut self, op: impl FnOnce(&mut Game<R>) -> Result<(), Rejection>, done: &str) {
        match op(&mut self.game) {
            Ok(()) => self.changed(done.to_string()),
            Err(err) => self.reject(err),
        }
    }

    fn start(&mut self, mode: GameMode) {
        self.game.start_game(mode);
        self.reset_frontend();
        self.message = Some(format!("New {} game", mode.label()));
    }

    fn reset_frontend(&mut self) {
        self.cursor = 0;
        self.hint = None;
        self.settle_ms = None;
        self.tick_accum_ms = 0;
    }

    /// The board changed: drop a stale hint and keep the cursor on the board
    fn changed(&mut self, message: String) {
        self.hint = None;
        let len = self.game.session().map_or(0, |s| s.board().len());
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.message = Some(message);
    }

    fn reject(&mut self, err: Rejection) {
        debug!(error = %err, "action rejected");
        self.message = Some(err.to_string());
    }

    fn note_outcome(&mut self, was_terminal: bool) {
        if was_terminal || !self.game.status().is_terminal() {
            return;
        }
        self.settle_ms = None;
        self.hint = None;
        self.persist.results = true;
        self.persist.save = true;
        self.message = None;
    }
}
