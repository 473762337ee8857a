//! GameView: maps a Pair 'em Up session into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use pair_em_up_core::{ResultHistory, Session};

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Assist, GameMode, GameStatus, ROW_CAP, ROW_WIDTH, TARGET_SCORE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything the view needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ViewModel<'a> {
    pub session: Option<&'a Session>,
    /// Cursor cell index into the board.
    pub cursor: usize,
    /// Pair highlighted by the last hint request.
    pub hint: Option<(usize, usize)>,
    /// Status line text.
    pub message: Option<&'a str>,
    pub results: &'a ResultHistory,
    pub has_saved_game: bool,
}

const BG: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(28, 30, 40);

const PLAIN: CellStyle = CellStyle::new(Rgb::new(210, 210, 210), BG);
const LABEL: CellStyle = CellStyle::new(Rgb::new(230, 230, 230), BG).bold();
const MUTED: CellStyle = CellStyle::new(Rgb::new(130, 130, 140), BG);
const BORDER: CellStyle = CellStyle::new(Rgb::new(190, 190, 200), BG);
const EMPTY_CELL: CellStyle = CellStyle::new(Rgb::new(80, 80, 95), BOARD_BG).dim();

const SELECTED_BG: Rgb = Rgb::new(200, 170, 40);
const HINT_BG: Rgb = Rgb::new(40, 130, 70);
const CURSOR_BG: Rgb = Rgb::new(60, 90, 170);
const ERASER_BG: Rgb = Rgb::new(170, 50, 50);

/// Tile colors, indexed by `(value - 1) % 9`.
const TILE_FG: [Rgb; 9] = [
    Rgb::new(120, 200, 255),
    Rgb::new(140, 230, 140),
    Rgb::new(255, 200, 90),
    Rgb::new(230, 140, 230),
    Rgb::new(255, 110, 110),
    Rgb::new(110, 230, 220),
    Rgb::new(250, 160, 60),
    Rgb::new(180, 170, 255),
    Rgb::new(220, 220, 120),
];

/// A lightweight terminal renderer for the puzzle.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Three digits plus a gap fits every tile Classic growth can reach.
        Self { cell_w: 4 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(2),
        }
    }

    /// Number of board rows that fit in `viewport`.
    pub fn visible_rows(&self, viewport: Viewport) -> usize {
        // Title line, two border lines and the status line.
        usize::from(viewport.height.saturating_sub(4)).max(1)
    }

    /// Render one frame into an existing framebuffer.
    pub fn render_into(&self, model: &ViewModel<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(PLAIN.cell(' '));

        fb.put_str(1, 0, "PAIR 'EM UP", LABEL);

        match model.session {
            Some(session) => self.draw_session(fb, model, session, viewport),
            None => self.draw_menu(fb, model),
        }

        if let Some(message) = model.message {
            fb.put_str(1, viewport.height.saturating_sub(1), message, PLAIN);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, model: &ViewModel<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(model, viewport, &mut fb);
        fb
    }

    fn draw_session(
        &self,
        fb: &mut FrameBuffer,
        model: &ViewModel<'_>,
        session: &Session,
        viewport: Viewport,
    ) {
        let board = session.board();
        let total_rows = board.row_count().max(1);
        let visible = self.visible_rows(viewport).min(total_rows);
        let top = scroll_top(model.cursor / ROW_WIDTH, total_rows, visible);

        let frame_x = 0;
        let frame_y = 1;
        let frame_w = ROW_WIDTH as u16 * self.cell_w + 2;
        let frame_h = visible as u16 + 2;

        fb.fill_rect(frame_x + 1, frame_y + 1, frame_w - 2, frame_h - 2, ' ', EMPTY_CELL);
        draw_border(fb, frame_x, frame_y, frame_w, frame_h);

        for row in top..top + visible {
            let y = frame_y + 1 + (row - top) as u16;
            for col in 0..ROW_WIDTH {
                let index = row * ROW_WIDTH + col;
                let x = frame_x + 1 + col as u16 * self.cell_w;
                self.draw_cell(fb, model, session, index, x, y);
            }
        }

        if top > 0 {
            fb.put_str(frame_x + frame_w - 2, frame_y, "▲", MUTED);
        }
        if top + visible < total_rows {
            fb.put_str(frame_x + frame_w - 2, frame_y + frame_h - 1, "▼", MUTED);
        }

        draw_side_panel(fb, model, session, frame_x + frame_w + 2, frame_y);

        if session.status().is_terminal() {
            draw_outcome(fb, session, frame_x, frame_y, frame_w, frame_h);
        }
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        model: &ViewModel<'_>,
        session: &Session,
        index: usize,
        x: u16,
        y: u16,
    ) {
        let value = session.board().value(index);
        let mut style = match value {
            Some(v) => CellStyle::new(TILE_FG[(v as usize + 8) % 9], BOARD_BG),
            None => EMPTY_CELL,
        };

        let hinted = model.hint.is_some_and(|(a, b)| a == index || b == index);
        if hinted {
            style.bg = HINT_BG;
        }
        if session.selection().contains(&index) {
            style = CellStyle::new(BG, SELECTED_BG).bold();
        }
        if index == model.cursor && session.status().is_playing() {
            style.bg = if session.eraser_armed() {
                ERASER_BG
            } else {
                CURSOR_BG
            };
            style.bold = true;
        }

        fb.fill_rect(x, y, self.cell_w, 1, ' ', style);
        match value {
            Some(v) => fb.put_right(x, y, self.cell_w - 1, &v.to_string(), style),
            None if index < session.board().len() => {
                fb.put_right(x, y, self.cell_w - 1, "·", style)
            }
            None => {}
        }
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, model: &ViewModel<'_>) {
        let mut y = 2;
        fb.put_str(1, y, "NEW GAME", LABEL);
        y += 1;
        for (key, mode) in ['1', '2', '3'].into_iter().zip(GameMode::ALL) {
            fb.put_str(3, y, &format!("{key}  {}", mode.label()), PLAIN);
            y += 1;
        }
        let continue_style = if model.has_saved_game { PLAIN } else { MUTED };
        fb.put_str(3, y, "c  Continue saved game", continue_style);
        y += 1;
        fb.put_str(3, y, "q  Quit", PLAIN);
        y += 2;

        fb.put_str(1, y, "RECENT RESULTS", LABEL);
        y += 1;
        if model.results.is_empty() {
            fb.put_str(3, y, "none yet", MUTED);
        }
        for result in model.results.iter() {
            let outcome = if result.won { "WON " } else { "LOST" };
            let line = format!(
                "{outcome}  {:<8} {:>3} pts  {:>5}",
                result.mode.label(),
                result.score,
                result.time_label()
            );
            fb.put_str(3, y, &line, PLAIN);
            y += 1;
        }
    }
}

/// First board row to show so that `cursor_row` stays in view.
pub fn scroll_top(cursor_row: usize, total_rows: usize, visible: usize) -> usize {
    if visible == 0 || total_rows <= visible {
        return 0;
    }
    let max_top = total_rows - visible;
    cursor_row.saturating_sub(visible / 2).min(max_top)
}

/// `mm:ss` clock label.
pub fn clock_label(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);
    for dx in x + 1..right {
        fb.set(dx, y, BORDER.cell('─'));
        fb.set(dx, bottom, BORDER.cell('─'));
    }
    for dy in y + 1..bottom {
        fb.set(x, dy, BORDER.cell('│'));
        fb.set(right, dy, BORDER.cell('│'));
    }
    fb.set(x, y, BORDER.cell('┌'));
    fb.set(right, y, BORDER.cell('┐'));
    fb.set(x, bottom, BORDER.cell('└'));
    fb.set(right, bottom, BORDER.cell('┘'));
}

fn draw_side_panel(fb: &mut FrameBuffer, model: &ViewModel<'_>, session: &Session, x: u16, y: u16) {
    if x >= fb.width() {
        return;
    }
    let budgets = session.budgets();
    let mut y = y;
    let mut line = |fb: &mut FrameBuffer, label: &str, value: String| {
        let end = fb.put_str(x, y, label, LABEL);
        fb.put_str(end + 1, y, &value, PLAIN);
        y += 1;
    };

    line(fb, "MODE", session.mode().label().to_string());
    line(fb, "SCORE", format!("{}/{}", session.score(), TARGET_SCORE));
    line(fb, "TIME", clock_label(session.elapsed_secs()));
    line(
        fb,
        "ROWS",
        format!("{}/{}", session.board().row_count(), ROW_CAP),
    );
    y += 1;

    for (assist, key) in [
        (Assist::Hint, 't'),
        (Assist::Revert, 'u'),
        (Assist::AddNumbers, 'n'),
        (Assist::Shuffle, 's'),
        (Assist::Eraser, 'e'),
    ] {
        let count = budgets
            .remaining(assist)
            .map_or_else(|| "∞".to_string(), |n| n.to_string());
        let style = if budgets.remaining(assist) == Some(0) {
            MUTED
        } else {
            PLAIN
        };
        fb.put_str(x, y, &format!("[{key}] {:<8} {count}", assist_label(assist)), style);
        if assist == Assist::Eraser && session.eraser_armed() {
            fb.put_str(x + 16, y, "ARMED", CellStyle::new(ERASER_BG, BG).bold());
        }
        y += 1;
    }
    y += 1;

    for help in [
        "arrows/hjkl move",
        "space select",
        "w save  r restart",
        "1/2/3 new  q quit",
    ] {
        fb.put_str(x, y, help, MUTED);
        y += 1;
    }
    if model.has_saved_game {
        fb.put_str(x, y, "saved game available", MUTED);
    }
}

fn draw_outcome(
    fb: &mut FrameBuffer,
    session: &Session,
    frame_x: u16,
    frame_y: u16,
    frame_w: u16,
    frame_h: u16,
) {
    let (headline, detail) = match session.status() {
        GameStatus::Won => ("YOU WON!", format!("{} points", session.score())),
        GameStatus::Lost(reason) => ("GAME OVER", reason.message().to_string()),
        _ => return,
    };
    let lines = [
        headline.to_string(),
        detail,
        format!("time {}", clock_label(session.elapsed_secs())),
        "r restart  1/2/3 new".to_string(),
    ];

    let box_h = lines.len() as u16 + 2;
    let box_y = frame_y + frame_h.saturating_sub(box_h) / 2;
    let inner_w = frame_w.saturating_sub(4);
    let box_style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(50, 50, 60));
    fb.fill_rect(frame_x + 2, box_y, inner_w, box_h, ' ', box_style);

    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let tx = frame_x + 2 + inner_w.saturating_sub(text_w) / 2;
        let style = if i == 0 { box_style.bold() } else { box_style };
        fb.put_str(tx, box_y + 1 + i as u16, text, style);
    }
}

fn assist_label(assist: Assist) -> &'static str {
    match assist {
        Assist::Hint => "Hint",
        Assist::Revert => "Revert",
        Assist::AddNumbers => "Add",
        Assist::Shuffle => "Shuffle",
        Assist::Eraser => "Eraser",
    }
}
