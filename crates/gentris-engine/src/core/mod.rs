pub use self::{board::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod shape;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 25;
/// Width and height of every rotation mask.
pub const TEMPLATE_SIZE: usize = 5;
