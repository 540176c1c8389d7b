use chrono::{DateTime, Utc};
use gentris_engine::PieceSeed;
use gentris_evaluator::{
    chromosome::Chromosome,
    session::{GameResult, PlayConfig},
};
use gentris_training::genetic::{GenerationReport, GeneticAlgorithmParams, Individual};
use serde::{Deserialize, Serialize};

/// Output of `gentris train`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Timestamp when training finished (ISO 8601 format)
    pub trained_at: DateTime<Utc>,
    /// Seed of the run's random number generator
    pub seed: u64,
    pub params: GeneticAlgorithmParams,
    /// Best individual over all generations
    pub best: Option<Individual>,
    /// Set when the run ended before its last generation
    pub stopped_early: Option<String>,
    pub generations: Vec<GenerationReport>,
}

/// Output of `gentris play`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayReport {
    /// Timestamp when the games finished (ISO 8601 format)
    pub played_at: DateTime<Utc>,
    pub chromosome: Chromosome,
    pub config: PlayConfig,
    pub games: Vec<GameRecord>,
}

/// One finished game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// Random seed used for piece generation
    pub seed: PieceSeed,
    pub result: GameResult,
}
