use serde::{Deserialize, Serialize};

use super::{
    BOARD_WIDTH, TEMPLATE_SIZE,
    board::Board,
    shape::{ShapeKind, ShapeMask},
};

/// Column a freshly spawned piece's template starts at.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const SPAWN_X: i32 = (BOARD_WIDTH / 2) as i32 - (TEMPLATE_SIZE / 2) as i32;
/// Row a freshly spawned piece's template starts at (above the board).
pub const SPAWN_Y: i32 = -2;

/// Colour index of a placed block.
///
/// Only used to tell blocks apart when rendering; it plays no part in search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(u8);

impl Color {
    /// Number of distinct colours a piece can be given.
    pub const COUNT: u8 = 4;

    /// Creates a colour index, wrapping values past [`Self::COUNT`].
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index % Self::COUNT)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// A tetromino at a position and rotation.
///
/// `Piece` is a plain value: every move returns a new piece, so search code can
/// try placements freely without touching the piece the game is holding.
///
/// `x`/`y` are the board coordinates of the template's top-left corner. Both can
/// be negative: the template is wider than most shapes, and pieces spawn with
/// `y < 0`.
///
/// # Example
///
/// ```
/// use gentris_engine::{Color, Piece, ShapeKind};
///
/// let piece = Piece::new(ShapeKind::T, 0, Color::new(0));
/// let moved = piece.shifted(1, 0).rotated_right();
/// assert_eq!(moved.x(), piece.x() + 1);
/// assert_eq!(moved.rotation(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    shape: ShapeKind,
    rotation: usize,
    x: i32,
    y: i32,
    color: Color,
}

impl Piece {
    /// Creates a piece at the spawn position.
    #[must_use]
    pub fn new(shape: ShapeKind, rotation: usize, color: Color) -> Self {
        Self {
            shape,
            rotation: rotation % shape.rotation_count(),
            x: SPAWN_X,
            y: SPAWN_Y,
            color,
        }
    }

    #[must_use]
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn mask(&self) -> &'static ShapeMask {
        self.shape.mask(self.rotation)
    }

    /// Board coordinates of every occupied cell, including cells above the board.
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.mask()
            .occupied_cells()
            .map(move |(col, row)| (self.x + col as i32, self.y + row as i32))
    }

    #[must_use]
    pub fn with_rotation(self, rotation: usize) -> Self {
        Self {
            rotation: rotation % self.shape.rotation_count(),
            ..self
        }
    }

    #[must_use]
    pub fn with_position(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    #[must_use]
    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    #[must_use]
    pub fn rotated_right(self) -> Self {
        self.with_rotation(self.rotation + 1)
    }

    #[must_use]
    pub fn rotated_left(self) -> Self {
        let count = self.shape.rotation_count();
        self.with_rotation(self.rotation + count - 1)
    }

    /// Moves the piece down while the position one row lower is still valid.
    ///
    /// The starting position itself is not checked.
    #[must_use]
    pub fn dropped(self, board: &Board) -> Self {
        let mut piece = self;
        while board.is_valid(piece, 0, 1) {
            piece = piece.shifted(0, 1);
        }
        piece
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BOARD_HEIGHT;

    #[test]
    fn test_spawn_position() {
        let piece = Piece::new(ShapeKind::L, 1, Color::new(2));
        assert_eq!((piece.x(), piece.y()), (3, -2));
        assert_eq!(piece.rotation(), 1);
        assert_eq!(piece.color().index(), 2);
    }

    #[test]
    fn test_rotation_is_normalized() {
        let piece = Piece::new(ShapeKind::S, 3, Color::new(0));
        assert_eq!(piece.rotation(), 1);
        assert_eq!(piece.rotated_right().rotation(), 0);
        assert_eq!(piece.rotated_right().rotated_left().rotation(), 1);

        let o = Piece::new(ShapeKind::O, 0, Color::new(0));
        assert_eq!(o.rotated_left().rotation(), 0);
    }

    #[test]
    fn test_color_wraps() {
        assert_eq!(Color::new(5), Color::new(1));
    }

    #[test]
    fn test_occupied_cells_follow_position() {
        let piece = Piece::new(ShapeKind::O, 0, Color::new(0)).with_position(-1, 4);
        let cells: Vec<_> = piece.occupied_cells().collect();
        assert_eq!(cells, [(0, 6), (1, 6), (0, 7), (1, 7)]);
    }

    #[test]
    fn test_dropped_lands_on_floor() {
        let board = Board::new();
        let piece = Piece::new(ShapeKind::I, 0, Color::new(0)).with_position(0, 0);
        let landed = piece.dropped(&board);
        let lowest = landed.occupied_cells().map(|(_, y)| y).max().unwrap();
        assert_eq!(lowest, BOARD_HEIGHT as i32 - 1);
        assert!(!board.is_valid(landed, 0, 1));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let piece = Piece::new(ShapeKind::J, 2, Color::new(3)).with_position(-2, 7);
        let json = serde_json::to_string(&piece).unwrap();
        let back: Piece = serde_json::from_str(&json).unwrap();
        assert_eq!(back, piece);
    }
}
