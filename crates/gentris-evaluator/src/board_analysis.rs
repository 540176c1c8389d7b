//! Column statistics of a board.
//!
//! Every column is scanned from the floor upwards:
//!
//! - empty cells accumulate into a local hole counter;
//! - an occupied cell moves the local holes into the column's hole total and
//!   adds its height (`BOARD_HEIGHT - row`) to the height sum;
//! - once the column has any hole, every occupied cell from there on counts
//!   as a blocking block, including the one sitting directly on the hole.
//!
//! Blocking blocks are therefore cumulative per column rather than attributed
//! to individual holes, and the height sum grows with every stacked cell, not
//! only with the top of each column.

use std::iter;

use gentris_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board};
use serde::{Deserialize, Serialize};

/// Statistics of a single column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnStats {
    pub holes: usize,
    pub blocking_blocks: usize,
    pub height_sum: usize,
}

impl ColumnStats {
    #[must_use]
    pub fn of(board: &Board, x: usize) -> Self {
        let mut stats = Self::default();
        let mut local_holes = 0;
        for (y, cell) in iter::zip(0..BOARD_HEIGHT, board.column(x)).rev() {
            if cell.is_empty() {
                local_holes += 1;
                continue;
            }
            stats.height_sum += BOARD_HEIGHT - y;
            stats.holes += local_holes;
            local_holes = 0;
            if stats.holes > 0 {
                stats.blocking_blocks += 1;
            }
        }
        stats
    }
}

/// Column statistics summed over the whole board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardAnalysis {
    holes: usize,
    blocking_blocks: usize,
    height_sum: usize,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        (0..BOARD_WIDTH)
            .map(|x| ColumnStats::of(board, x))
            .fold(Self::default(), |acc, column| Self {
                holes: acc.holes + column.holes,
                blocking_blocks: acc.blocking_blocks + column.blocking_blocks,
                height_sum: acc.height_sum + column.height_sum,
            })
    }

    #[must_use]
    pub fn holes(&self) -> usize {
        self.holes
    }

    #[must_use]
    pub fn blocking_blocks(&self) -> usize {
        self.blocking_blocks
    }

    /// Sum of `BOARD_HEIGHT - row` over every occupied cell.
    ///
    /// This is the value scored as the "max height" feature.
    #[must_use]
    pub fn height_sum(&self) -> usize {
        self.height_sum
    }
}

/// Hole and blocking-block counts that a placement's totals are compared against.
///
/// Scoring uses the difference between the board after a placement and the
/// baseline, so a baseline taken from the board before the move turns the
/// two features into "newly created" counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    pub holes: usize,
    pub blocking_blocks: usize,
}

impl Baseline {
    /// Baseline of nothing: deltas equal the absolute counts.
    pub const ZERO: Self = Self {
        holes: 0,
        blocking_blocks: 0,
    };

    /// Baseline taken from the board as it is now.
    #[must_use]
    pub fn of(board: &Board) -> Self {
        let analysis = BoardAnalysis::from_board(board);
        Self {
            holes: analysis.holes(),
            blocking_blocks: analysis.blocking_blocks(),
        }
    }
}

/// Which [`Baseline`] move evaluation subtracts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaselineMode {
    /// Always [`Baseline::ZERO`].
    #[default]
    Zero,
    /// [`Baseline::of`] the board the piece is placed on.
    BeforeMove,
}

impl BaselineMode {
    #[must_use]
    pub fn baseline(self, board: &Board) -> Baseline {
        match self {
            Self::Zero => Baseline::ZERO,
            Self::BeforeMove => Baseline::of(board),
        }
    }
}
