//! Move search: choosing where the current piece goes.
//!
//! # How It Works
//!
//! 1. **Enumerate** - every rotation of the piece's shape is combined with every
//!    column offset in [`SEARCH_X_RANGE`]. Offsets outside the board are part of
//!    the window because the 5×5 template is wider than most shapes.
//! 2. **Score** - each valid candidate is dropped on a private copy of the board
//!    and its [`FeatureVector`](crate::feature::FeatureVector) is scored with the
//!    [`Chromosome`].
//! 3. **Select** - [`choose_best`] returns the highest score. Candidates are
//!    generated rotation-major with ascending offsets, and ties go to the
//!    earliest one, so a search is deterministic.
//!
//! # Two-Ply Lookahead
//!
//! With [`SearchDepth::TwoPly`] and a known next piece, each candidate's piece is
//! merged into a board copy (without clearing lines) and the best one-ply score
//! of the next piece on that copy is added to the candidate's score. If the next
//! piece has no legal move there, nothing is added. The lookahead never goes
//! deeper than one extra piece.
//!
//! # Example
//!
//! ```
//! use gentris_engine::{Board, Color, Piece, ShapeKind};
//! use gentris_evaluator::{
//!     chromosome::Chromosome,
//!     move_search::{MoveSearch, SearchDepth},
//! };
//!
//! let board = Board::new();
//! let piece = Piece::new(ShapeKind::T, 0, Color::new(0));
//! let next = Piece::new(ShapeKind::I, 0, Color::new(1));
//!
//! let search = MoveSearch::new(&Chromosome::KNOWN_GOOD).with_depth(SearchDepth::TwoPly);
//! let best = search.best_move(&board, piece, Some(next)).unwrap();
//! assert!(board.is_valid_position(best.placement(piece).dropped(&board)));
//! ```

use std::ops::RangeInclusive;

use arrayvec::ArrayVec;
use gentris_engine::{Board, Piece};
use serde::{Deserialize, Serialize};

use crate::{
    board_analysis::BaselineMode, chromosome::Chromosome, placement_analysis::PlacementAnalysis,
};

/// Column offsets tried for every rotation.
pub const SEARCH_X_RANGE: RangeInclusive<i32> = -2..=7;

/// Upper bound on candidates per search: 4 rotations × 10 offsets.
pub const MAX_CANDIDATES: usize = 4 * 10;

/// Row a chosen move is released from before it is dropped onto the real board.
pub const RELEASE_Y: i32 = -1;

pub type MoveList = ArrayVec<MoveCandidate, MAX_CANDIDATES>;

/// A scored (rotation, column offset) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveCandidate {
    pub rotation: usize,
    pub x: i32,
    pub score: f64,
}

impl MoveCandidate {
    /// Returns `piece` turned to this move's rotation at its release position.
    ///
    /// The result still has to be dropped.
    #[must_use]
    pub fn placement(&self, piece: Piece) -> Piece {
        piece
            .with_rotation(self.rotation)
            .with_position(self.x, RELEASE_Y)
    }
}

/// How far ahead the search looks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchDepth {
    /// Only the current piece is considered.
    #[default]
    OnePly,
    /// The known next piece's best follow-up is added to each candidate.
    TwoPly,
}

#[derive(Debug, Clone, Copy)]
pub struct MoveSearch<'a> {
    chromosome: &'a Chromosome,
    depth: SearchDepth,
    baseline: BaselineMode,
}

impl<'a> MoveSearch<'a> {
    /// Creates a one-ply search scored by `chromosome` against a zero baseline.
    #[must_use]
    pub fn new(chromosome: &'a Chromosome) -> Self {
        Self {
            chromosome,
            depth: SearchDepth::default(),
            baseline: BaselineMode::default(),
        }
    }

    #[must_use]
    pub fn with_depth(self, depth: SearchDepth) -> Self {
        Self { depth, ..self }
    }

    #[must_use]
    pub fn with_baseline(self, baseline: BaselineMode) -> Self {
        Self { baseline, ..self }
    }

    #[must_use]
    pub fn chromosome(&self) -> &'a Chromosome {
        self.chromosome
    }

    #[must_use]
    pub fn depth(&self) -> SearchDepth {
        self.depth
    }

    /// Scores every valid move of `piece` on `board`.
    ///
    /// `next_piece` is only looked at when the search is two-ply.
    #[must_use]
    pub fn enumerate_moves(
        &self,
        board: &Board,
        piece: Piece,
        next_piece: Option<Piece>,
    ) -> MoveList {
        let lookahead = match self.depth {
            SearchDepth::OnePly => None,
            SearchDepth::TwoPly => next_piece,
        };
        self.enumerate(board, piece, lookahead)
    }

    /// Returns the best move, or `None` if `piece` fits nowhere.
    #[must_use]
    pub fn best_move(
        &self,
        board: &Board,
        piece: Piece,
        next_piece: Option<Piece>,
    ) -> Option<MoveCandidate> {
        choose_best(&self.enumerate_moves(board, piece, next_piece))
    }

    fn enumerate(&self, board: &Board, piece: Piece, lookahead: Option<Piece>) -> MoveList {
        let baseline = self.baseline.baseline(board);
        let mut moves = MoveList::new();

        for rotation in 0..piece.shape().rotation_count() {
            for x in SEARCH_X_RANGE {
                let Some(analysis) = PlacementAnalysis::try_move(board, piece, x, rotation) else {
                    continue;
                };
                let mut score = self.chromosome.score(&analysis.features(baseline));
                if let Some(next) = lookahead {
                    let mut after = board.clone();
                    after.place(analysis.placement());
                    score += choose_best(&self.enumerate(&after, next, None))
                        .map_or(0.0, |best| best.score);
                }
                moves.push(MoveCandidate { rotation, x, score });
            }
        }

        moves
    }
}

/// Scores every valid one-ply move of `piece` with a zero baseline.
#[must_use]
pub fn enumerate_moves(board: &Board, piece: Piece, chromosome: &Chromosome) -> MoveList {
    MoveSearch::new(chromosome).enumerate_moves(board, piece, None)
}

/// Returns the highest-scoring candidate; the first one wins a tie.
#[must_use]
pub fn choose_best(moves: &[MoveCandidate]) -> Option<MoveCandidate> {
    moves
        .iter()
        .copied()
        .reduce(|best, candidate| if candidate.score > best.score { candidate } else { best })
}
