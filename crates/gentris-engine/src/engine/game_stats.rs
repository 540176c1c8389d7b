use serde::{Deserialize, Serialize};

/// Bonus for clearing 0, 1, 2, 3 or 4 lines with a single drop.
pub const LINE_CLEAR_BONUS: [usize; 5] = [0, 40, 120, 300, 1200];

/// Points awarded for every piece promoted from the preview.
pub const SPAWN_BONUS: usize = 1;

/// Score needed to advance one level.
const SCORE_PER_LEVEL: usize = 400;

/// Running statistics of one game.
///
/// Score is one point per piece promoted from the preview plus [`LINE_CLEAR_BONUS`] per drop.
/// There are no combo, back-to-back or level multipliers.
///
/// # Example
///
/// ```
/// use gentris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.spawn_piece();
/// stats.complete_move(4);
///
/// assert_eq!(stats.score(), 1201);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// assert_eq!(stats.level(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: usize,
    moves_taken: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            moves_taken: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Number of pieces placed on the board.
    #[must_use]
    pub const fn moves_taken(&self) -> usize {
        self.moves_taken
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Histogram of drops by lines cleared; index `n` counts drops that cleared `n` lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Display level, starting at 1 and rising every 400 points.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.score / SCORE_PER_LEVEL + 1
    }

    /// Records a piece promoted from the preview into play.
    pub const fn spawn_piece(&mut self) {
        self.score += SPAWN_BONUS;
    }

    /// Records a placed piece and the lines its drop cleared.
    ///
    /// A single piece spans at most four rows, so `cleared_lines` is at most 4.
    pub fn complete_move(&mut self, cleared_lines: usize) {
        assert!(
            cleared_lines < LINE_CLEAR_BONUS.len(),
            "a single drop cannot clear {cleared_lines} lines"
        );
        self.moves_taken += 1;
        self.total_cleared_lines += cleared_lines;
        self.line_cleared_counter[cleared_lines] += 1;
        self.score += LINE_CLEAR_BONUS[cleared_lines];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_bonus_table() {
        for (lines, bonus) in [(0, 0), (1, 40), (2, 120), (3, 300), (4, 1200)] {
            let mut stats = GameStats::new();
            stats.complete_move(lines);
            assert_eq!(stats.score(), bonus, "{lines} lines");
        }
    }

    #[test]
    fn test_spawn_adds_one_point() {
        let mut stats = GameStats::new();
        stats.spawn_piece();
        stats.spawn_piece();
        assert_eq!(stats.score(), 2);
        assert_eq!(stats.moves_taken(), 0);
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = GameStats::new();
        for lines in [0, 1, 1, 2, 0, 3] {
            stats.spawn_piece();
            stats.complete_move(lines);
        }
        assert_eq!(stats.moves_taken(), 6);
        assert_eq!(stats.total_cleared_lines(), 7);
        assert_eq!(stats.line_cleared_counter(), &[2, 2, 1, 1, 0]);
        assert_eq!(stats.score(), 6 + 40 + 40 + 120 + 300);
    }

    #[test]
    fn test_level_follows_score() {
        let mut stats = GameStats::new();
        assert_eq!(stats.level(), 1);
        for _ in 0..399 {
            stats.spawn_piece();
        }
        assert_eq!(stats.level(), 1);
        stats.spawn_piece();
        assert_eq!(stats.level(), 2);
    }

    #[test]
    #[should_panic(expected = "cannot clear 5 lines")]
    fn test_too_many_lines_panics() {
        GameStats::new().complete_move(5);
    }
}
