//! Board and piece simulation primitives for the gentris Tetris player.
//!
//! - [`core`] holds the static data model: the 10×25 [`Board`], the seven
//!   [`ShapeKind`]s with their 5×5 rotation masks, and the [`Piece`] value.
//! - [`engine`] holds what changes over a game: the seeded [`PieceStream`]
//!   and the running [`GameStats`].
//!
//! # Example
//!
//! ```
//! use gentris_engine::{Board, Color, Piece, ShapeKind};
//!
//! let mut board = Board::new();
//! let piece = Piece::new(ShapeKind::O, 0, Color::new(1)).with_position(0, 0);
//! let landed = piece.dropped(&board);
//! assert!(board.is_valid_position(landed));
//!
//! board.place(landed);
//! assert_eq!(board.occupied_count(), 4);
//! assert_eq!(board.clear_lines(), 0);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
