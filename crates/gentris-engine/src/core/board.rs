use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{Color, Piece},
};

/// A single board cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

/// One board row, left to right.
pub type Row = [Cell; BOARD_WIDTH];

const EMPTY_ROW: Row = [Cell::Empty; BOARD_WIDTH];

/// The 10×25 playing field.
///
/// Row 0 is the top row and row `BOARD_HEIGHT - 1` the bottom one. Coordinates
/// taken by the collision helpers are signed: anything with `y < 0` is above the
/// board, where spawning pieces are allowed to stick out.
///
/// `Board` is `Clone` and small; search code evaluates placements on private
/// copies and never shares a board between games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    /// Creates a board with every cell empty.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: [EMPTY_ROW; BOARD_HEIGHT],
        }
    }

    /// Returns whether (`x`, `y`) lies inside the board horizontally and not below it.
    ///
    /// There is no upper bound: rows above the board count as "on board" here so
    /// spawn checks can probe them.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[must_use]
    pub const fn is_on_board(x: i32, y: i32) -> bool {
        x >= 0 && x < BOARD_WIDTH as i32 && y < BOARD_HEIGHT as i32
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    /// Returns whether the cell at signed coordinates holds a block.
    ///
    /// Positions outside the grid (including above it) are reported as empty.
    #[must_use]
    pub fn is_filled_at(&self, x: i32, y: i32) -> bool {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) if x < BOARD_WIDTH && y < BOARD_HEIGHT => self.rows[y][x].is_filled(),
            _ => false,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter()
    }

    /// Iterates over the cells of column `x`, top to bottom.
    pub fn column(
        &self,
        x: usize,
    ) -> impl DoubleEndedIterator<Item = Cell> + ExactSizeIterator + '_ {
        self.rows.iter().map(move |row| row[x])
    }

    /// Number of filled cells on the board.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count()
    }

    /// Checks the piece, offset by (`dx`, `dy`), against walls, floor and blocks.
    ///
    /// Cells that would sit above the board are ignored; every other occupied
    /// cell must be on the board and land on an empty cell.
    #[must_use]
    pub fn is_valid(&self, piece: Piece, dx: i32, dy: i32) -> bool {
        piece.occupied_cells().all(|(x, y)| {
            let (x, y) = (x + dx, y + dy);
            y < 0 || (Self::is_on_board(x, y) && !self.is_filled_at(x, y))
        })
    }

    /// Shorthand for [`Self::is_valid`] without an offset.
    #[must_use]
    pub fn is_valid_position(&self, piece: Piece) -> bool {
        self.is_valid(piece, 0, 0)
    }

    /// Writes the piece's colour into every cell it covers.
    ///
    /// No collision check is done; callers validate first. Cells above the board
    /// are dropped.
    pub fn place(&mut self, piece: Piece) {
        let cell = Cell::Filled(piece.color());
        for (x, y) in piece.occupied_cells() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
                self.rows[y][x] = cell;
            }
        }
    }

    /// Returns whether every column of `row` is filled.
    #[must_use]
    pub fn is_line_complete(&self, row: usize) -> bool {
        self.rows[row].iter().all(|cell| cell.is_filled())
    }

    /// Removes complete rows and returns how many were removed.
    ///
    /// Rows are scanned bottom to top. When a row is complete everything above
    /// it shifts down one row, the top row is blanked and the same row index is
    /// checked again, so rows that fall into place are cleared too.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT;
        while y > 0 {
            if self.is_line_complete(y - 1) {
                self.rows.copy_within(..y - 1, 1);
                self.rows[0] = EMPTY_ROW;
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Builds a board from text rows aligned to the bottom of the board.
    ///
    /// `.` is an empty cell, `#` a filled cell with colour 0, and a digit a
    /// filled cell with that colour. Blank lines are skipped. Intended for tests
    /// and examples.
    ///
    /// ```
    /// use gentris_engine::Board;
    ///
    /// let board = Board::from_ascii(
    ///     "
    ///     #.........
    ///     ###########
    ///     ",
    /// );
    /// assert!(board.is_line_complete(Board::HEIGHT - 1));
    /// assert_eq!(board.occupied_count(), 11);
    /// ```
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "at most {BOARD_HEIGHT} rows allowed, got {}",
            lines.len()
        );

        let mut board = Self::new();
        let top = BOARD_HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let cells: Vec<Cell> = line
                .chars()
                .map(|c| match c {
                    '.' => Cell::Empty,
                    '#' => Cell::Filled(Color::new(0)),
                    _ => {
                        let digit = c
                            .to_digit(10)
                            .and_then(|d| u8::try_from(d).ok())
                            .unwrap_or_else(|| panic!("unexpected cell character {c:?}"));
                        Cell::Filled(Color::new(digit))
                    }
                })
                .collect();
            assert_eq!(
                cells.len(),
                BOARD_WIDTH,
                "each row must have exactly {BOARD_WIDTH} cells, got {} at row {i}",
                cells.len()
            );
            board.rows[top + i].copy_from_slice(&cells);
        }
        board
    }
}

impl fmt::Display for Board {
    /// One line per row; `.` for empty cells and the colour index otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                match cell {
                    Cell::Empty => f.write_str(".")?,
                    Cell::Filled(color) => write!(f, "{}", color.index())?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::ShapeKind;

    const BOTTOM: usize = BOARD_HEIGHT - 1;

    fn piece(shape: ShapeKind, rotation: usize, x: i32, y: i32) -> Piece {
        Piece::new(shape, rotation, Color::new(1)).with_position(x, y)
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.occupied_count(), 0);
        assert!(board.rows().flatten().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_is_on_board() {
        assert!(Board::is_on_board(0, 0));
        assert!(Board::is_on_board(9, 24));
        assert!(Board::is_on_board(5, -3));
        assert!(!Board::is_on_board(-1, 0));
        assert!(!Board::is_on_board(10, 0));
        assert!(!Board::is_on_board(0, 25));
    }

    #[test]
    fn test_is_valid_ignores_cells_above_board() {
        let board = Board::new();
        // I piece standing up with its top three cells above row 0.
        let p = piece(ShapeKind::I, 0, 0, -3);
        assert!(board.is_valid_position(p));
    }

    #[test]
    fn test_is_valid_rejects_walls_and_floor() {
        let board = Board::new();
        // Horizontal I uses template columns 0..=3.
        let p = piece(ShapeKind::I, 1, 0, 0);
        assert!(board.is_valid_position(p));
        assert!(!board.is_valid(p, -1, 0));
        assert!(board.is_valid(p, 6, 0));
        assert!(!board.is_valid(p, 7, 0));
        assert!(!board.is_valid(p, 0, 23));
        assert!(board.is_valid(p, 0, 22));
    }

    #[test]
    fn test_is_valid_rejects_collision() {
        let board = Board::from_ascii("..#.......");
        // O occupies template columns 1 and 2.
        let p = piece(ShapeKind::O, 0, -1, 21);
        assert!(board.is_valid_position(p));
        let p = piece(ShapeKind::O, 0, 0, 21);
        assert!(!board.is_valid_position(p));
        assert!(board.is_valid(p, 0, -1));
    }

    #[test]
    fn test_place_writes_color() {
        let mut board = Board::new();
        let p = Piece::new(ShapeKind::O, 0, Color::new(3)).with_position(0, 21);
        board.place(p);
        assert_eq!(board.cell(1, BOTTOM), Cell::Filled(Color::new(3)));
        assert_eq!(board.cell(2, BOTTOM - 1), Cell::Filled(Color::new(3)));
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn test_place_skips_cells_above_board() {
        let mut board = Board::new();
        board.place(piece(ShapeKind::I, 0, 0, -2));
        assert_eq!(board.occupied_count(), 2);
        assert!(board.cell(2, 0).is_filled());
        assert!(board.cell(2, 1).is_filled());
    }

    #[test]
    fn test_clear_single_line_shifts_rows_down() {
        let mut board = Board::from_ascii(
            "
            ...#......
            ##########
            ",
        );
        assert_eq!(board.clear_lines(), 1);
        assert_eq!(board.occupied_count(), 1);
        assert!(board.cell(3, BOTTOM).is_filled());
        assert!(!board.is_line_complete(BOTTOM));
    }

    #[test]
    fn test_clear_non_adjacent_lines() {
        let mut board = Board::from_ascii(
            "
            ##########
            #.........
            ##########
            .#........
            ##########
            ",
        );
        assert_eq!(board.clear_lines(), 3);
        assert_eq!(board.occupied_count(), 2);
        assert!(board.cell(1, BOTTOM).is_filled());
        assert!(board.cell(0, BOTTOM - 1).is_filled());
        assert!(board.rows().take(BOTTOM - 1).flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn test_clear_lines_removes_exactly_ten_cells_per_line() {
        let mut board = Board::from_ascii(
            "
            #.#.#.#.#.
            ##########
            ##########
            .#########
            ##########
            ",
        );
        let before = board.occupied_count();
        let cleared = board.clear_lines();
        assert_eq!(cleared, 3);
        assert_eq!(before - board.occupied_count(), BOARD_WIDTH * cleared);
        assert!((0..BOARD_HEIGHT).all(|y| !board.is_line_complete(y)));
    }

    #[test]
    fn test_filling_gap_with_vertical_i_clears_bottom_line() {
        let mut board = Board::from_ascii(
            "
            1.........
            #.........
            ####.#####
            ",
        );
        let p = piece(ShapeKind::I, 0, 2, 0).dropped(&board);
        assert_eq!(p.y(), BOARD_HEIGHT as i32 - 4);
        board.place(p);
        assert_eq!(board.clear_lines(), 1);
        // the 3 upper I cells and the two column-0 blocks moved down one row
        assert_eq!(board.occupied_count(), 5);
        assert_eq!(board.cell(0, BOTTOM), Cell::Filled(Color::new(0)));
        assert_eq!(board.cell(0, BOTTOM - 1), Cell::Filled(Color::new(1)));
        assert!(board.cell(4, BOTTOM).is_filled());
        assert!(!board.cell(5, BOTTOM).is_filled());
    }

    #[test]
    fn test_display_matches_ascii() {
        let board = Board::from_ascii("2........#");
        let text = board.to_string();
        let last = text.lines().last().unwrap();
        assert_eq!(last, "2........0");
        assert_eq!(text.lines().count(), BOARD_HEIGHT);
    }
}
