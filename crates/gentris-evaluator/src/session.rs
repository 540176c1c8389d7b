//! Game driver: plays one full game with a chromosome.
//!
//! # Game Flow
//!
//! 1. The game starts with a current piece and a preview piece from the stream.
//! 2. When there is no current piece, the preview is promoted, a new preview is
//!    drawn and one point is scored. If the promoted piece does not fit at its
//!    spawn position the game is over.
//! 3. The move search picks a placement. If there is none the game is over.
//! 4. The piece is released at the chosen rotation and column, dropped, merged
//!    and full lines are cleared, scoring the line-clear bonus.
//! 5. Repeat from 2.
//!
//! The first piece enters play without the spawn point and without a spawn
//! check. Games have no built-in end besides topping out; [`PlayConfig`] can
//! cap the number of moves.

use gentris_engine::{Board, GameStats, Piece, PieceSeed, PieceStream};
use serde::{Deserialize, Serialize};

use crate::{
    board_analysis::BaselineMode,
    chromosome::Chromosome,
    move_search::{MoveSearch, SearchDepth},
};

/// Settings for a single game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub depth: SearchDepth,
    pub baseline: BaselineMode,
    /// Stop once this many moves were made, checked before each move.
    /// `None` plays until the game is lost.
    pub move_limit: Option<usize>,
}

/// Why a game stopped.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameOverReason {
    /// The promoted piece overlapped the stack at its spawn position.
    #[display("spawn blocked")]
    SpawnBlocked,
    /// The current piece had no valid placement.
    #[display("no legal move")]
    NoLegalMove,
    /// [`PlayConfig::move_limit`] was reached.
    #[display("move limit reached")]
    MoveLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub stats: GameStats,
    pub reason: GameOverReason,
}

impl GameResult {
    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn moves_taken(&self) -> usize {
        self.stats.moves_taken()
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.stats.total_cleared_lines()
    }
}

/// Read-only view of a game right after a move was applied.
#[derive(Debug, Clone, Copy)]
pub struct GameSnapshot<'a> {
    pub board: &'a Board,
    /// The piece that was just placed, at its landing position.
    pub placed: Piece,
    pub next_piece: Piece,
    pub cleared_lines: usize,
    pub stats: &'a GameStats,
}

/// Receives a snapshot after every applied move.
pub trait GameObserver {
    fn on_move(&mut self, snapshot: &GameSnapshot<'_>);
}

/// Observes nothing.
impl GameObserver for () {
    fn on_move(&mut self, _snapshot: &GameSnapshot<'_>) {}
}

/// Plays a game on an empty board, drawing pieces from `stream`.
///
/// ```
/// use gentris_engine::{PieceSeed, PieceStream};
/// use gentris_evaluator::{
///     chromosome::Chromosome,
///     session::{PlayConfig, play_game},
/// };
///
/// let config = PlayConfig {
///     move_limit: Some(50),
///     ..PlayConfig::default()
/// };
/// let mut stream = PieceStream::with_seed(PieceSeed::from(1));
/// let result = play_game(&Chromosome::KNOWN_GOOD, &config, &mut stream, &mut ());
/// assert!(result.moves_taken() <= 50);
/// ```
pub fn play_game<O>(
    chromosome: &Chromosome,
    config: &PlayConfig,
    stream: &mut PieceStream,
    observer: &mut O,
) -> GameResult
where
    O: GameObserver + ?Sized,
{
    let search = MoveSearch::new(chromosome)
        .with_depth(config.depth)
        .with_baseline(config.baseline);
    let mut board = Board::new();
    let mut stats = GameStats::new();
    let mut current = Some(stream.next_piece());
    let mut next = stream.next_piece();

    let reason = loop {
        if config
            .move_limit
            .is_some_and(|limit| stats.moves_taken() >= limit)
        {
            break GameOverReason::MoveLimit;
        }

        let piece = match current.take() {
            Some(piece) => piece,
            None => {
                let piece = std::mem::replace(&mut next, stream.next_piece());
                stats.spawn_piece();
                if !board.is_valid_position(piece) {
                    break GameOverReason::SpawnBlocked;
                }
                piece
            }
        };

        let Some(best) = search.best_move(&board, piece, Some(next)) else {
            break GameOverReason::NoLegalMove;
        };

        let placed = best.placement(piece).dropped(&board);
        board.place(placed);
        let cleared_lines = board.clear_lines();
        stats.complete_move(cleared_lines);

        observer.on_move(&GameSnapshot {
            board: &board,
            placed,
            next_piece: next,
            cleared_lines,
            stats: &stats,
        });
    };

    GameResult { stats, reason }
}

/// Like [`play_game`], with a fresh stream from `seed` and no observer.
#[must_use]
pub fn play_game_with_seed(
    chromosome: &Chromosome,
    config: &PlayConfig,
    seed: PieceSeed,
) -> GameResult {
    play_game(chromosome, config, &mut PieceStream::with_seed(seed), &mut ())
}
