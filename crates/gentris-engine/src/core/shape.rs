use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::TEMPLATE_SIZE;

/// Occupancy of one rotation state within its 5×5 template.
///
/// Indexed as `[row][column]`, row 0 at the top of the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMask([[bool; TEMPLATE_SIZE]; TEMPLATE_SIZE]);

impl ShapeMask {
    /// Builds a mask from template rows where `O` marks an occupied cell.
    const fn from_template(rows: [&[u8; TEMPLATE_SIZE]; TEMPLATE_SIZE]) -> Self {
        let mut cells = [[false; TEMPLATE_SIZE]; TEMPLATE_SIZE];
        let mut y = 0;
        while y < TEMPLATE_SIZE {
            let mut x = 0;
            while x < TEMPLATE_SIZE {
                cells[y][x] = rows[y][x] == b'O';
                x += 1;
            }
            y += 1;
        }
        Self(cells)
    }

    /// Returns whether the template cell at (`col`, `row`) is part of the shape.
    ///
    /// Coordinates outside the template are never occupied.
    #[must_use]
    pub fn is_occupied(&self, col: usize, row: usize) -> bool {
        row < TEMPLATE_SIZE && col < TEMPLATE_SIZE && self.0[row][col]
    }

    /// Iterates over occupied template cells as `(col, row)`.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, &occupied)| occupied.then_some((col, row)))
        })
    }
}

/// The seven tetromino kinds.
///
/// Declaration order is the order the piece stream draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[repr(u8)]
pub enum ShapeKind {
    S = 0,
    Z = 1,
    J = 2,
    L = 3,
    I = 4,
    O = 5,
    T = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::S,
        Self::Z,
        Self::J,
        Self::L,
        Self::I,
        Self::O,
        Self::T,
    ];

    /// Returns every rotation state of this shape, in rotation-index order.
    #[must_use]
    pub fn rotations(self) -> &'static [ShapeMask] {
        match self {
            Self::S => S_ROTATIONS,
            Self::Z => Z_ROTATIONS,
            Self::J => J_ROTATIONS,
            Self::L => L_ROTATIONS,
            Self::I => I_ROTATIONS,
            Self::O => O_ROTATIONS,
            Self::T => T_ROTATIONS,
        }
    }

    /// Number of distinct rotation states (1, 2 or 4).
    #[must_use]
    pub fn rotation_count(self) -> usize {
        self.rotations().len()
    }

    /// Returns the mask for `rotation`, taken modulo [`Self::rotation_count`].
    #[must_use]
    pub fn mask(self, rotation: usize) -> &'static ShapeMask {
        let rotations = self.rotations();
        &rotations[rotation % rotations.len()]
    }
}

const S_ROTATIONS: &[ShapeMask] = &[
    ShapeMask::from_template([b".....", b".....", b"..OO.", b".OO..", b"....."]),
    ShapeMask::from_template([b".....", b"..O..", b"..OO.", b"...O.", b"....."]),
];

const Z_ROTATIONS: &[ShapeMask] = &[
    ShapeMask::from_template([b".....", b".....", b".OO..", b"..OO.", b"....."]),
    ShapeMask::from_template([b".....", b"..O..", b".OO..", b".O...", b"....."]),
];

const I_ROTATIONS: &[ShapeMask] = &[
    ShapeMask::from_template([b"..O..", b"..O..", b"..O..", b"..O..", b"....."]),
    ShapeMask::from_template([b".....", b".....", b"OOOO.", b".....", b"....."]),
];

const O_ROTATIONS: &[ShapeMask] = &[ShapeMask::from_template([
    b".....", b".....", b".OO..", b".OO..", b".....",
])];

const J_ROTATIONS: &[ShapeMask] = &[
    ShapeMask::from_template([b".....", b".O...", b".OOO.", b".....", b"....."]),
    ShapeMask::from_template([b".....", b"..OO.", b"..O..", b"..O..", b"....."]),
    ShapeMask::from_template([b".....", b".....", b".OOO.", b"...O.", b"....."]),
    ShapeMask::from_template([b".....", b"..O..", b"..O..", b".OO..", b"....."]),
];

const L_ROTATIONS: &[ShapeMask] = &[
    ShapeMask::from_template([b".....", b"...O.", b".OOO.", b".....", b"....."]),
    ShapeMask::from_template([b".....", b"..O..", b"..O..", b"..OO.", b"....."]),
    ShapeMask::from_template([b".....", b".....", b".OOO.", b".O...", b"....."]),
    ShapeMask::from_template([b".....", b".OO..", b"..O..", b"..O..", b"....."]),
];

const T_ROTATIONS: &[ShapeMask] = &[
    ShapeMask::from_template([b".....", b"..O..", b".OOO.", b".....", b"....."]),
    ShapeMask::from_template([b".....", b"..O..", b"..OO.", b"..O..", b"....."]),
    ShapeMask::from_template([b".....", b".....", b".OOO.", b"..O..", b"....."]),
    ShapeMask::from_template([b".....", b"..O..", b".OO..", b"..O..", b"....."]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rotation_has_four_cells() {
        for kind in ShapeKind::ALL {
            for (rotation, mask) in kind.rotations().iter().enumerate() {
                assert_eq!(
                    mask.occupied_cells().count(),
                    4,
                    "{kind} rotation {rotation} should have 4 cells"
                );
            }
        }
    }

    #[test]
    fn test_rotation_counts() {
        let counts: Vec<_> = ShapeKind::ALL.iter().map(|k| k.rotation_count()).collect();
        assert_eq!(counts, [2, 2, 4, 4, 2, 1, 4]);
    }

    #[test]
    fn test_rotation_wraps_modulo_count() {
        assert_eq!(ShapeKind::O.mask(3), ShapeKind::O.mask(0));
        assert_eq!(ShapeKind::I.mask(3), ShapeKind::I.mask(1));
        assert_eq!(ShapeKind::T.mask(6), ShapeKind::T.mask(2));
    }

    #[test]
    fn test_bottom_row_and_right_column_are_always_empty() {
        for kind in ShapeKind::ALL {
            for mask in kind.rotations() {
                for i in 0..TEMPLATE_SIZE {
                    assert!(!mask.is_occupied(i, TEMPLATE_SIZE - 1));
                    assert!(!mask.is_occupied(TEMPLATE_SIZE - 1, i));
                }
            }
        }
    }

    #[test]
    fn test_horizontal_i_reaches_left_template_column() {
        let cells: Vec<_> = ShapeKind::I.mask(1).occupied_cells().collect();
        assert_eq!(cells, [(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_is_occupied_outside_template() {
        let mask = ShapeKind::T.mask(0);
        assert!(mask.is_occupied(2, 1));
        assert!(!mask.is_occupied(TEMPLATE_SIZE, 1));
        assert!(!mask.is_occupied(2, TEMPLATE_SIZE));
    }
}
