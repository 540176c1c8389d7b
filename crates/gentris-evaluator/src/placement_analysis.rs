//! Analysis of a single candidate placement.
//!
//! [`PlacementAnalysis`] bundles what happens when a dropped piece is merged
//! into a private copy of the board: the lines it clears, the column
//! statistics of the resulting board and the contact sides measured before
//! the merge. [`evaluate_move`] turns that into a [`FeatureVector`].

use gentris_engine::{Board, Piece};

use crate::{
    board_analysis::{Baseline, BoardAnalysis},
    contact::ContactSides,
    feature::FeatureVector,
};

/// Row a candidate is first tested at before it is dropped.
pub const EVALUATION_START_Y: i32 = 0;

#[derive(Debug, Clone)]
pub struct PlacementAnalysis {
    placement: Piece,
    cleared_lines: usize,
    board_analysis: BoardAnalysis,
    contact_sides: ContactSides,
}

impl PlacementAnalysis {
    /// Analyzes `placement`, which must already be at its landing position.
    #[must_use]
    pub fn from_board(before_placement: &Board, placement: Piece) -> Self {
        let contact_sides = ContactSides::of(before_placement, placement);
        let mut board = before_placement.clone();
        board.place(placement);
        let cleared_lines = board.clear_lines();

        Self {
            placement,
            cleared_lines,
            board_analysis: BoardAnalysis::from_board(&board),
            contact_sides,
        }
    }

    /// Tries `piece` at `rotation` and column `x`, drops it and analyzes the result.
    ///
    /// Returns `None` if the piece does not fit at [`EVALUATION_START_Y`].
    #[must_use]
    pub fn try_move(board: &Board, piece: Piece, x: i32, rotation: usize) -> Option<Self> {
        let start = piece
            .with_rotation(rotation)
            .with_position(x, EVALUATION_START_Y);
        if !board.is_valid_position(start) {
            return None;
        }
        Some(Self::from_board(board, start.dropped(board)))
    }

    /// The piece at its landing position.
    #[must_use]
    pub fn placement(&self) -> Piece {
        self.placement
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Column statistics of the board after placement and line clears.
    #[must_use]
    pub fn board_analysis(&self) -> &BoardAnalysis {
        &self.board_analysis
    }

    #[must_use]
    pub fn contact_sides(&self) -> &ContactSides {
        &self.contact_sides
    }

    #[must_use]
    pub fn features(&self, baseline: Baseline) -> FeatureVector {
        FeatureVector::from_analysis(self, baseline)
    }
}

/// Computes the features of placing `piece` at `rotation` and column `x`.
///
/// Returns `None` for an invalid move.
///
/// ```
/// use gentris_engine::{Board, Color, Piece, ShapeKind};
/// use gentris_evaluator::{board_analysis::Baseline, placement_analysis::evaluate_move};
///
/// let board = Board::new();
/// let piece = Piece::new(ShapeKind::O, 0, Color::new(0));
///
/// let features = evaluate_move(&board, piece, 0, 0, Baseline::ZERO).unwrap();
/// assert_eq!(features.cleared_lines, 0);
/// assert_eq!(features.floor_sides, 2);
///
/// // O's template column 1 would be off the board
/// assert!(evaluate_move(&board, piece, -2, 0, Baseline::ZERO).is_none());
/// ```
#[must_use]
pub fn evaluate_move(
    board: &Board,
    piece: Piece,
    x: i32,
    rotation: usize,
    baseline: Baseline,
) -> Option<FeatureVector> {
    PlacementAnalysis::try_move(board, piece, x, rotation)
        .map(|analysis| analysis.features(baseline))
}

#[cfg(test)]
mod tests {
    use gentris_engine::{BOARD_HEIGHT, Cell, Color, ShapeKind};

    use super::*;

    fn piece(shape: ShapeKind) -> Piece {
        Piece::new(shape, 0, Color::new(0))
    }

    #[test]
    fn test_o_on_empty_board() {
        let board = Board::new();
        let analysis = PlacementAnalysis::try_move(&board, piece(ShapeKind::O), 0, 0).unwrap();

        let mut cells: Vec<_> = analysis.placement().occupied_cells().collect();
        cells.sort_unstable();
        let bottom = BOARD_HEIGHT as i32 - 1;
        assert_eq!(
            cells,
            [(1, bottom - 1), (1, bottom), (2, bottom - 1), (2, bottom)]
        );

        let features = analysis.features(Baseline::ZERO);
        assert_eq!(
            features,
            FeatureVector {
                height_sum: 6,
                cleared_lines: 0,
                new_holes: 0,
                new_blocking_blocks: 0,
                piece_sides: 0,
                floor_sides: 2,
                wall_sides: 0,
            }
        );
    }

    #[test]
    fn test_invalid_start_position() {
        let board = Board::new();
        // horizontal I reaches template column 3, i.e. board column 10
        assert!(PlacementAnalysis::try_move(&board, piece(ShapeKind::I), 7, 1).is_none());
        assert!(PlacementAnalysis::try_move(&board, piece(ShapeKind::I), 6, 1).is_some());
    }

    #[test]
    fn test_blocked_start_row() {
        let mut board = Board::new();
        board.set_cell(2, 0, Cell::Filled(Color::new(0)));
        // vertical I in template column 2 starts on the occupied cell
        assert!(evaluate_move(&board, piece(ShapeKind::I), 0, 0, Baseline::ZERO).is_none());
    }

    #[test]
    fn test_filling_gap_clears_line() {
        let board = Board::from_ascii("####.#####");
        let features = evaluate_move(&board, piece(ShapeKind::I), 2, 0, Baseline::ZERO).unwrap();
        assert_eq!(features.cleared_lines, 1);
        // three I cells stay in column 4 after the clear
        assert_eq!(features.height_sum, 1 + 2 + 3);
        assert_eq!(features.new_holes, 0);
        assert_eq!(features.floor_sides, 1);
        // the cells at (3, 24) and (5, 24) flank the bottom I cell
        assert_eq!(features.piece_sides, 2);
    }

    #[test]
    fn test_baseline_is_subtracted() {
        let board = Board::from_ascii(
            "
            #.........
            ..........
            ",
        );
        let baseline = Baseline::of(&board);
        assert_eq!(baseline.holes, 1);

        let o = piece(ShapeKind::O);
        let absolute = evaluate_move(&board, o, 5, 0, Baseline::ZERO).unwrap();
        let relative = evaluate_move(&board, o, 5, 0, baseline).unwrap();
        assert_eq!(absolute.new_holes, 1);
        assert_eq!(relative.new_holes, 0);
        assert_eq!(relative.new_blocking_blocks, 0);
    }

    #[test]
    fn test_contact_is_measured_before_placement() {
        let board = Board::new();
        let analysis = PlacementAnalysis::try_move(&board, piece(ShapeKind::O), -1, 0).unwrap();
        assert_eq!(analysis.contact_sides().piece_sides, 0);
        assert_eq!(analysis.contact_sides().wall_sides, 2);
    }
}
