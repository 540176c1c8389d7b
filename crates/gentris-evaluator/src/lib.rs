//! Heuristic placement scoring, move search and the game driver.
//!
//! # Architecture
//!
//! ```text
//! Game driver (session: play one game, report the result)
//!     ↓ uses
//! Move search (move_search: enumerate, score and pick a placement)
//!     ↓ uses
//! Placement analysis (placement_analysis: drop, merge, clear, measure)
//!     ↓ uses
//! Board analysis + contact sides (board_analysis, contact)
//! ```
//!
//! A placement is described by a 7-value [`feature::FeatureVector`]:
//!
//! | # | feature               | measured on                      |
//! |---|-----------------------|----------------------------------|
//! | 0 | height sum            | board after placement and clears |
//! | 1 | cleared lines         | board after placement            |
//! | 2 | new holes             | after clears, minus baseline     |
//! | 3 | new blocking blocks   | after clears, minus baseline     |
//! | 4 | piece sides           | board before placement           |
//! | 5 | floor sides           | board before placement           |
//! | 6 | wall sides            | board before placement           |
//!
//! A [`chromosome::Chromosome`] holds one weight per feature and scores a
//! placement as their dot product. The training crate evolves chromosomes by
//! playing games through [`session::play_game`].
//!
//! # Example
//!
//! ```
//! use gentris_engine::{Board, Color, Piece, ShapeKind};
//! use gentris_evaluator::{chromosome::Chromosome, move_search};
//!
//! let board = Board::new();
//! let piece = Piece::new(ShapeKind::L, 0, Color::new(2));
//! let moves = move_search::enumerate_moves(&board, piece, &Chromosome::KNOWN_GOOD);
//! let best = move_search::choose_best(&moves).unwrap();
//! assert!(moves.iter().all(|m| m.score <= best.score));
//! ```

pub mod board_analysis;
pub mod chromosome;
pub mod contact;
pub mod feature;
pub mod move_search;
pub mod placement_analysis;
pub mod session;
