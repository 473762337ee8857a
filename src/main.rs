//! Terminal Pair 'em Up runner (default binary).
//!
//! crossterm supplies input; frames go through the framebuffer renderer in
//! `pair_em_up_term`. The loop sleeps in `event::poll` until the next key or
//! the next timer deadline (settle delay or one-second tick).

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pair_em_up::app::App;
use pair_em_up::config::AppConfig;
use pair_em_up::core::Game;
use pair_em_up::input::{handle_key_event, should_quit};
use pair_em_up::store::Store;
use pair_em_up::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;
    info!(seed = config.seed, data_dir = %config.data_dir.display(), "starting");

    let store = Store::from_config(&config);
    let mut game = Game::new(config.seed);
    game.set_history(store.load_results());
    game.set_saved_game(store.load_save());
    let mut app = App::new(game);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, &store);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file when configured; the TUI owns stdout.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(pair_em_up::config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, app: &mut App, store: &Store) -> Result<()> {
    let view = GameView::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let mut fb = FrameBuffer::new(w, h);

    let mut last_update = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            view.render_into(&app.view_model(), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        let timeout = Duration::from_millis(app.next_deadline_ms())
            .saturating_sub(last_update.elapsed());

        let event = if event::poll(timeout)? {
            Some(event::read()?)
        } else {
            None
        };

        // Advance timers first so a fresh selection gets its full settle delay.
        let elapsed_ms = last_update.elapsed().as_millis() as u64;
        last_update += Duration::from_millis(elapsed_ms);
        dirty |= app.update(elapsed_ms);

        match event {
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    dirty |= app.apply_action(action);
                }
            }
            Some(Event::Resize(w, h)) => {
                viewport = Viewport::new(w, h);
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }

        persist(app, store);
    }
}

/// Mirror the save slot and history to disk after they change.
fn persist(app: &mut App, store: &Store) {
    let flags = app.take_persist();
    if flags.save {
        if let Err(err) = store.write_save(app.game().saved_game()) {
            warn!(error = %err, "could not write save");
        }
    }
    if flags.results {
        if let Err(err) = store.write_results(app.game().history()) {
            warn!(error = %err, "could not write results");
        }
    }
}
