//! State that evolves while a game is played.
//!
//! - [`PieceStream`] - seeded source of random pieces
//! - [`PieceSeed`] - 128-bit seed that makes a stream reproducible
//! - [`GameStats`] - score, line and move counters for one game
//!
//! The move loop itself lives in the evaluator crate, which decides where each
//! piece goes; this module only supplies pieces and keeps the score.

pub use self::{game_stats::*, piece_stream::*};

mod game_stats;
mod piece_stream;
