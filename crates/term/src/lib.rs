//! Terminal rendering for Pair 'em Up.
//!
//! Rather than pulling in a widget toolkit, the game renders into a plain
//! framebuffer of styled cells which [`TerminalRenderer`] flushes to the
//! terminal, repainting only what changed since the previous frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use pair_em_up_core as core;
pub use pair_em_up_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{clock_label, GameView, ViewModel, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
