//! Contact counts between a dropped piece and its surroundings.

use gentris_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board, Piece, TEMPLATE_SIZE};

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const LAST_COLUMN: i32 = BOARD_WIDTH as i32 - 1;
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const LAST_ROW: i32 = BOARD_HEIGHT as i32 - 1;
const TEMPLATE_LAST: usize = TEMPLATE_SIZE - 1;

/// How many sides of a piece touch blocks, the floor and the walls.
///
/// Measured with the piece at its landing position against the board *before*
/// the piece is placed.
///
/// Every cell of the piece's 5×5 template is visited:
///
/// - A piece cell in column 0 or the last column counts one wall side. A piece
///   cell in the bottom row counts one floor side. Piece cells on the template
///   border also count a piece side for an occupied neighbour outside the
///   template (below, left or right).
/// - An empty template cell covering an occupied board cell counts one piece
///   side for each piece cell directly above it, left of it or right of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactSides {
    pub piece_sides: usize,
    pub floor_sides: usize,
    pub wall_sides: usize,
}

impl ContactSides {
    #[must_use]
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn of(board: &Board, piece: Piece) -> Self {
        let mask = piece.mask();
        let mut sides = Self::default();

        for row in 0..TEMPLATE_SIZE {
            for col in 0..TEMPLATE_SIZE {
                let x = piece.x() + col as i32;
                let y = piece.y() + row as i32;

                if mask.is_occupied(col, row) {
                    if x == 0 || x == LAST_COLUMN {
                        sides.wall_sides += 1;
                    }
                    if y == LAST_ROW {
                        sides.floor_sides += 1;
                    } else if row == TEMPLATE_LAST && board.is_filled_at(x, y + 1) {
                        sides.piece_sides += 1;
                    }
                    if col == 0 && x > 0 && board.is_filled_at(x - 1, y) {
                        sides.piece_sides += 1;
                    }
                    if col == TEMPLATE_LAST && x < LAST_COLUMN && board.is_filled_at(x + 1, y) {
                        sides.piece_sides += 1;
                    }
                } else if board.is_filled_at(x, y) {
                    let neighbours = [
                        row > 0 && mask.is_occupied(col, row - 1),
                        col > 0 && mask.is_occupied(col - 1, row),
                        mask.is_occupied(col + 1, row),
                    ];
                    sides.piece_sides += neighbours.into_iter().filter(|&n| n).count();
                }
            }
        }

        sides
    }
}
