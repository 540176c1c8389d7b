use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use gentris_engine::{PieceSeed, PieceStream};
use gentris_evaluator::{
    board_analysis::BaselineMode,
    chromosome::Chromosome,
    move_search::SearchDepth,
    session::{self, GameObserver, GameResult, GameSnapshot, PlayConfig},
};

use crate::{
    schema::record::{GameRecord, PlayReport},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Chromosome to play with, e.g. "[-1.42, 7, -8, -2.41, 8, 6, 8]"
    #[arg(long, allow_hyphen_values = true, default_value_t = Chromosome::KNOWN_GOOD)]
    chromosome: Chromosome,
    /// Play with the best chromosome of a training report instead
    #[arg(long, conflicts_with = "chromosome")]
    report: Option<PathBuf>,
    /// Number of games to play; game `i` uses seed `seed + i`
    #[arg(long, default_value_t = 1)]
    games: u64,
    /// Seed of the first game (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Consider the next piece when choosing a move
    #[arg(long)]
    lookahead: bool,
    /// Count holes and blocking blocks relative to the board before each move
    #[arg(long)]
    relative_baseline: bool,
    /// Stop each game after this many moves
    #[arg(long)]
    move_limit: Option<usize>,
    /// Print the board after every move
    #[arg(long)]
    trace: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            chromosome: Chromosome::KNOWN_GOOD,
            report: None,
            games: 1,
            seed: None,
            lookahead: false,
            relative_baseline: false,
            move_limit: None,
            trace: false,
            output: None,
        }
    }
}

impl PlayArg {
    fn play_config(&self) -> PlayConfig {
        PlayConfig {
            depth: if self.lookahead {
                SearchDepth::TwoPly
            } else {
                SearchDepth::OnePly
            },
            baseline: if self.relative_baseline {
                BaselineMode::BeforeMove
            } else {
                BaselineMode::Zero
            },
            move_limit: self.move_limit,
        }
    }

    fn load_chromosome(&self) -> anyhow::Result<Chromosome> {
        let Some(path) = &self.report else {
            return Ok(self.chromosome);
        };
        let report = util::read_training_report(path)?;
        let best = report
            .best
            .with_context(|| format!("No evaluated individual in {}", path.display()))?;
        Ok(*best.chromosome())
    }
}

/// Prints the board after every move.
struct TracePrinter;

impl GameObserver for TracePrinter {
    fn on_move(&mut self, snapshot: &GameSnapshot<'_>) {
        let stats = snapshot.stats;
        eprintln!(
            "Move {}: {} at ({}, {}), cleared {}, score {}, level {}, next {}",
            stats.moves_taken(),
            snapshot.placed.shape(),
            snapshot.placed.x(),
            snapshot.placed.y(),
            snapshot.cleared_lines,
            stats.score(),
            stats.level(),
            snapshot.next_piece.shape(),
        );
        eprintln!("{}", snapshot.board);
    }
}

pub(crate) fn print_result(chromosome: &Chromosome, result: &GameResult) {
    eprintln!("Chromosome {chromosome}");
    eprintln!("\tscored: {}", result.score());
    eprintln!("\tMoves: {}", result.moves_taken());
    eprintln!("\tLinesRemoved: {}", result.cleared_lines());
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let chromosome = arg.load_chromosome()?;
    let config = arg.play_config();
    let (first_seed, _) = util::seed_or_random(arg.seed);

    let mut games = vec![];
    for i in 0..arg.games {
        let seed = PieceSeed::from(first_seed.wrapping_add(i));
        let mut stream = PieceStream::with_seed(seed);
        let result = if arg.trace {
            session::play_game(&chromosome, &config, &mut stream, &mut TracePrinter)
        } else {
            session::play_game(&chromosome, &config, &mut stream, &mut ())
        };

        eprintln!("Game #{i} (seed {seed}): {}", result.reason);
        print_result(&chromosome, &result);
        games.push(GameRecord { seed, result });
    }

    let report = PlayReport {
        played_at: Utc::now(),
        chromosome,
        config,
        games,
    };
    Output::save_json(&report, arg.output.as_deref())?;

    if let Some(path) = &arg.output {
        eprintln!("Results saved to {}", path.display());
    }

    Ok(())
}
