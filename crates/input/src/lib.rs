//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. It is
//! independent of the renderer and of the game controller, so the binary can
//! route actions however it likes.

pub mod map;

pub use pair_em_up_types as types;

pub use map::{handle_key_event, should_quit};
