//! Training system that evolves chromosomes with a genetic algorithm.
//!
//! A chromosome weighs the seven placement features of
//! [`gentris_evaluator`]. This crate searches for weights that score well by
//! letting a population of chromosomes play games and breeding the best ones.
//!
//! # How Training Works
//!
//! 1. **Population** - random chromosomes, plus one known-good chromosome
//! 2. **Evaluation** - each chromosome plays one game; its score is the fitness
//! 3. **Selection** - the best fraction of the population survives
//! 4. **Reproduction** - survivors are spliced and mutated into offspring
//! 5. **Repeat** - for a fixed number of generations
//!
//! # Architecture
//!
//! ```text
//! Genetic Algorithm (genetic)
//!     ↓ evolves
//! Chromosomes (gentris-evaluator)
//!     ↓ drive
//! Game Driver (gentris-evaluator::session)
//!     ↓ produces
//! Game Score = fitness
//!     ↓ guides
//! Selection & Reproduction (genetic, operators)
//! ```
//!
//! Progress is reported through [`genetic::GenerationReport`] values; this
//! crate never prints anything itself.

pub mod genetic;
pub mod operators;
pub mod summary;
