//! Pair 'em Up (workspace facade crate).
//!
//! The game rules live in `pair_em_up_core`; this package re-exports the
//! member crates and adds what the terminal binary needs on top: the
//! frontend [`app::App`], environment [`config`], and the on-disk [`store`].

pub mod app;
pub mod config;
pub mod store;

pub use pair_em_up_core as core;
pub use pair_em_up_input as input;
pub use pair_em_up_term as term;
pub use pair_em_up_types as types;
