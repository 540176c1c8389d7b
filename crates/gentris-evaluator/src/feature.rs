use serde::{Deserialize, Serialize};

use crate::{board_analysis::Baseline, placement_analysis::PlacementAnalysis};

/// Number of features, and therefore of chromosome genes.
pub const FEATURE_COUNT: usize = 7;

/// The features in scoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Feature {
    #[display("height_sum")]
    HeightSum,
    #[display("cleared_lines")]
    ClearedLines,
    #[display("new_holes")]
    NewHoles,
    #[display("new_blocking_blocks")]
    NewBlockingBlocks,
    #[display("piece_sides")]
    PieceSides,
    #[display("floor_sides")]
    FloorSides,
    #[display("wall_sides")]
    WallSides,
}

impl Feature {
    pub const ALL: [Self; FEATURE_COUNT] = [
        Self::HeightSum,
        Self::ClearedLines,
        Self::NewHoles,
        Self::NewBlockingBlocks,
        Self::PieceSides,
        Self::FloorSides,
        Self::WallSides,
    ];
}

/// Heuristic features of one candidate placement.
///
/// Hole and blocking-block values are differences against a [`Baseline`], so
/// they can be negative when a placement clears lines that uncover holes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub height_sum: usize,
    pub cleared_lines: usize,
    pub new_holes: isize,
    pub new_blocking_blocks: isize,
    pub piece_sides: usize,
    pub floor_sides: usize,
    pub wall_sides: usize,
}

impl FeatureVector {
    #[must_use]
    #[expect(clippy::cast_possible_wrap)]
    pub fn from_analysis(analysis: &PlacementAnalysis, baseline: Baseline) -> Self {
        let board = analysis.board_analysis();
        let contact = analysis.contact_sides();
        Self {
            height_sum: board.height_sum(),
            cleared_lines: analysis.cleared_lines(),
            new_holes: board.holes() as isize - baseline.holes as isize,
            new_blocking_blocks: board.blocking_blocks() as isize
                - baseline.blocking_blocks as isize,
            piece_sides: contact.piece_sides,
            floor_sides: contact.floor_sides,
            wall_sides: contact.wall_sides,
        }
    }

    /// Feature values in [`Feature::ALL`] order.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.height_sum as f64,
            self.cleared_lines as f64,
            self.new_holes as f64,
            self.new_blocking_blocks as f64,
            self.piece_sides as f64,
            self.floor_sides as f64,
            self.wall_sides as f64,
        ]
    }
}
