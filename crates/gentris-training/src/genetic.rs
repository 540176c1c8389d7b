//! Genetic algorithm that evolves [`Chromosome`]s.
//!
//! # Algorithm Overview
//!
//! Every generation runs the same cycle:
//!
//! 1. **Evaluate** - each individual plays one full game with its chromosome;
//!    the game score is its fitness
//! 2. **Select** - individuals are stably sorted by score, best first, and the
//!    top `floor(n × selection_rate)` survive
//! 3. **Crossover** - one offspring per survivor; both parents are drawn from
//!    the survivors with replacement and spliced at a single point
//! 4. **Mutate** - every offspring gene mutates with probability
//!    `mutation_rate`
//! 5. **Replace** - survivors (scores dropped) followed by the offspring form
//!    the next population
//!
//! See [`operators`](crate::operators) for the crossover and mutation rules.
//!
//! # Key Components
//!
//! - [`Individual`] - a chromosome and, once evaluated, its [`Fitness`]
//! - [`Population`] - individuals evaluated together
//! - [`PopulationEvolver`] - selection, crossover, mutation and replacement
//! - [`GeneticAlgorithm`] - runs generations from [`GeneticAlgorithmParams`]
//!
//! # Reproducibility
//!
//! A [`GeneticAlgorithm`] owns a single `Pcg32` seeded once. Before each
//! evaluation it draws one [`PieceSeed`] per individual, in population order,
//! so a run is fully determined by its seed and parameters. Games share
//! nothing, which makes parallel evaluation produce exactly the same results
//! as sequential evaluation.
//!
//! # Parallelization
//!
//! With [`GeneticAlgorithmParams::parallel`] every individual plays on its own
//! scoped thread, and all results are collected before selection.
//!
//! # Population Size
//!
//! Replacement yields `2 × floor(n × selection_rate)` individuals, so the
//! population only keeps its size when `selection_rate` halves it exactly
//! (the defaults do). Other rates grow or shrink it every generation. When
//! selection leaves nobody the next generation fails with
//! [`EvolutionError::Extinct`].
//!
//! # Example
//!
//! ```
//! use gentris_engine::PieceSeed;
//! use gentris_evaluator::session::PlayConfig;
//! use gentris_training::genetic::{GeneticAlgorithm, GeneticAlgorithmParams};
//!
//! let params = GeneticAlgorithmParams {
//!     population_size: 4,
//!     generations: 2,
//!     play: PlayConfig {
//!         move_limit: Some(20),
//!         ..PlayConfig::default()
//!     },
//!     ..GeneticAlgorithmParams::default()
//! };
//! let mut ga = GeneticAlgorithm::new(params, PieceSeed::from(1)).unwrap();
//! while !ga.is_finished() {
//!     let report = ga.run_generation().unwrap();
//!     assert_eq!(report.individuals.len(), 4);
//! }
//! assert!(ga.best().is_some());
//! ```
//!
//! # Current Limitations
//!
//! - **One game per individual**: fitness is the score of a single game, so a
//!   lucky piece sequence can carry a weak chromosome
//! - **No elitism**: survivors lose their scores and replay on new seeds
//! - **No convergence check**: the run always lasts `generations` generations

use std::{iter, thread};

use gentris_engine::PieceSeed;
use gentris_evaluator::{
    chromosome::Chromosome,
    feature::FEATURE_COUNT,
    session::{self, GameResult, PlayConfig},
};
use rand::{Rng, SeedableRng as _, seq::IndexedRandom};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{operators, summary::Summary};

/// Result of playing one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fitness {
    pub seed: PieceSeed,
    pub result: GameResult,
}

/// A single individual in the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    chromosome: Chromosome,
    fitness: Option<Fitness>,
}

impl Individual {
    /// Creates an individual that has not played yet.
    #[must_use]
    pub fn new(chromosome: Chromosome) -> Self {
        Self {
            chromosome,
            fitness: None,
        }
    }

    #[must_use]
    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    /// Returns `None` until the individual has been evaluated.
    #[must_use]
    pub fn fitness(&self) -> Option<&Fitness> {
        self.fitness.as_ref()
    }

    /// Game score, or `None` if not evaluated.
    #[must_use]
    pub fn score(&self) -> Option<usize> {
        self.fitness.as_ref().map(|fitness| fitness.result.score())
    }

    /// Plays one game on `seed` and stores the result.
    pub fn evaluate(&mut self, config: &PlayConfig, seed: PieceSeed) {
        let result = session::play_game_with_seed(&self.chromosome, config, seed);
        self.fitness = Some(Fitness { seed, result });
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates `count` random individuals; the first one is
    /// [`Chromosome::KNOWN_GOOD`].
    ///
    /// # Arguments
    ///
    /// * `count` - Number of individuals in the population
    /// * `rng` - Random number generator
    #[must_use]
    pub fn random<R>(count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut chromosomes: Vec<_> = (0..count)
            .map(|_| operators::random_chromosome(rng))
            .collect();
        if let Some(first) = chromosomes.first_mut() {
            *first = Chromosome::KNOWN_GOOD;
        }
        Self::from_chromosomes(chromosomes)
    }

    /// Creates an unevaluated population.
    #[must_use]
    pub fn from_chromosomes<I>(chromosomes: I) -> Self
    where
        I: IntoIterator<Item = Chromosome>,
    {
        Self {
            individuals: chromosomes.into_iter().map(Individual::new).collect(),
        }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Plays one game per individual, the i-th on `seeds[i]`.
    ///
    /// # Arguments
    ///
    /// * `config` - Settings shared by every game
    /// * `seeds` - One piece seed per individual
    /// * `parallel` - Play each game on its own thread
    ///
    /// # Panics
    ///
    /// Panics if the number of seeds differs from the population size.
    pub fn evaluate(&mut self, config: &PlayConfig, seeds: &[PieceSeed], parallel: bool) {
        assert_eq!(seeds.len(), self.individuals.len());
        let pairs = iter::zip(&mut self.individuals, seeds.iter().copied());
        if parallel {
            thread::scope(|s| {
                for (ind, seed) in pairs {
                    s.spawn(move || ind.evaluate(config, seed));
                }
            });
        } else {
            for (ind, seed) in pairs {
                ind.evaluate(config, seed);
            }
        }
    }

    /// Returns the best `floor(len × rate)` individuals, best first.
    ///
    /// The sort is stable, so equal scores keep their population order.
    ///
    /// # Panics
    ///
    /// Panics if an individual has not been evaluated.
    #[must_use]
    pub fn select(&self, rate: f64) -> Vec<Individual> {
        assert!(
            self.individuals.iter().all(|ind| ind.fitness.is_some()),
            "population must be evaluated before selection"
        );
        let mut sorted = self.individuals.clone();
        sorted.sort_by(|a, b| b.score().cmp(&a.score()));
        sorted.truncate(survivor_count(sorted.len(), rate));
        sorted
    }

    /// Statistics of the scores of the evaluated individuals.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn compute_fitness_stats(&self) -> Option<Summary> {
        Summary::of(
            self.individuals
                .iter()
                .filter_map(Individual::score)
                .map(|score| score as f64),
        )
    }

    /// Statistics of each gene across the population, in feature order.
    #[must_use]
    pub fn compute_gene_stats(&self) -> Option<Vec<Summary>> {
        (0..FEATURE_COUNT)
            .map(|i| Summary::of(self.individuals.iter().map(|ind| ind.chromosome.genes()[i])))
            .collect()
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn survivor_count(len: usize, rate: f64) -> usize {
    (len as f64 * rate).floor() as usize
}

/// Controls how one generation turns into the next.
#[derive(Debug, Clone, Copy)]
pub struct PopulationEvolver {
    /// Fraction of the population kept by selection.
    pub selection_rate: f64,
    /// Probability of mutating each offspring gene.
    pub mutation_rate: f64,
}

impl PopulationEvolver {
    /// Builds the next generation from an evaluated population.
    ///
    /// # Returns
    ///
    /// Survivors, unevaluated, followed by as many offspring. Empty if
    /// selection kept nobody.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let survivors: Vec<Chromosome> = population
            .select(self.selection_rate)
            .into_iter()
            .map(|ind| ind.chromosome)
            .collect();

        let mut offspring = Vec::with_capacity(survivors.len());
        for _ in 0..survivors.len() {
            let (Some(p1), Some(p2)) = (survivors.choose(rng), survivors.choose(rng)) else {
                break;
            };
            let mut child = operators::crossover(p1, p2, rng);
            operators::mutate(&mut child, self.mutation_rate, rng);
            offspring.push(child);
        }

        Population::from_chromosomes(survivors.into_iter().chain(offspring))
    }
}

/// Settings of a training run.
///
/// Every field has a default, so a JSON file only needs the values it changes.
///
/// ```
/// use gentris_training::genetic::GeneticAlgorithmParams;
///
/// let params: GeneticAlgorithmParams =
///     serde_json::from_str(r#"{ "generations": 50, "parallel": true }"#).unwrap();
/// assert_eq!(params.generations, 50);
/// assert_eq!(params.population_size, 12);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticAlgorithmParams {
    /// Size of the initial population.
    pub population_size: usize,
    pub generations: usize,
    /// Fraction of each generation that survives selection.
    pub selection_rate: f64,
    /// Per-gene mutation probability.
    pub mutation_rate: f64,
    /// Evaluate individuals on separate threads.
    pub parallel: bool,
    /// Settings of every fitness game.
    pub play: PlayConfig,
}

impl Default for GeneticAlgorithmParams {
    fn default() -> Self {
        Self {
            population_size: 12,
            generations: 10,
            selection_rate: 0.5,
            mutation_rate: 0.1,
            parallel: false,
            play: PlayConfig::default(),
        }
    }
}

impl GeneticAlgorithmParams {
    pub fn validate(&self) -> Result<(), InvalidParamsError> {
        if self.population_size == 0 {
            return Err(InvalidParamsError::EmptyPopulation);
        }
        if !(0.0..=1.0).contains(&self.selection_rate) {
            return Err(InvalidParamsError::SelectionRate {
                value: self.selection_rate,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(InvalidParamsError::MutationRate {
                value: self.mutation_rate,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn evolver(&self) -> PopulationEvolver {
        PopulationEvolver {
            selection_rate: self.selection_rate,
            mutation_rate: self.mutation_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidParamsError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("selection rate must be within [0, 1], got {value}")]
    SelectionRate { value: f64 },
    #[display("mutation rate must be within [0, 1], got {value}")]
    MutationRate { value: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EvolutionError {
    #[display("population died out before generation {generation}")]
    Extinct { generation: usize },
}

/// What happened in one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Zero-based generation index.
    pub generation: usize,
    /// Evaluated individuals in population order.
    pub individuals: Vec<Individual>,
    pub fitness: Summary,
    /// One summary per gene, in feature order.
    pub genes: Vec<Summary>,
}

impl GenerationReport {
    /// The best individual of this generation; the earliest wins a tie.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .reduce(|best, ind| if ind.score() > best.score() { ind } else { best })
    }
}

/// Runs [`GeneticAlgorithmParams::generations`] generations.
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm {
    params: GeneticAlgorithmParams,
    rng: Pcg32,
    population: Population,
    generation: usize,
    best: Option<Individual>,
}

impl GeneticAlgorithm {
    /// Validates `params` and creates the initial population from `seed`.
    pub fn new(params: GeneticAlgorithmParams, seed: PieceSeed) -> Result<Self, InvalidParamsError> {
        params.validate()?;
        let mut rng = Pcg32::from_seed(seed.to_bytes());
        let population = Population::random(params.population_size, &mut rng);
        Ok(Self {
            params,
            rng,
            population,
            generation: 0,
            best: None,
        })
    }

    #[must_use]
    pub fn params(&self) -> &GeneticAlgorithmParams {
        &self.params
    }

    /// The population the next generation will evaluate.
    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Number of generations run so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.generation >= self.params.generations
    }

    /// Best individual seen in any generation so far.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    /// Evaluates the current population, then replaces it with the next one.
    pub fn run_generation(&mut self) -> Result<GenerationReport, EvolutionError> {
        let extinct = EvolutionError::Extinct {
            generation: self.generation,
        };
        if self.population.is_empty() {
            return Err(extinct);
        }

        let seeds: Vec<PieceSeed> = (0..self.population.len())
            .map(|_| self.rng.random())
            .collect();
        self.population
            .evaluate(&self.params.play, &seeds, self.params.parallel);

        let fitness = self
            .population
            .compute_fitness_stats()
            .ok_or(extinct.clone())?;
        let genes = self.population.compute_gene_stats().ok_or(extinct)?;
        let report = GenerationReport {
            generation: self.generation,
            individuals: self.population.individuals.clone(),
            fitness,
            genes,
        };

        if let Some(best) = report.best()
            && self.best.as_ref().is_none_or(|prev| best.score() > prev.score())
        {
            self.best = Some(best.clone());
        }

        self.population = self.params.evolver().evolve(&self.population, &mut self.rng);
        self.generation += 1;
        Ok(report)
    }

    /// Runs the remaining generations, passing each report to `on_generation`.
    pub fn run<F>(&mut self, mut on_generation: F) -> Result<(), EvolutionError>
    where
        F: FnMut(&GenerationReport),
    {
        while !self.is_finished() {
            let report = self.run_generation()?;
            on_generation(&report);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gentris_engine::GameStats;
    use gentris_evaluator::session::GameOverReason;

    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::from_seed(PieceSeed::from(7).to_bytes())
    }

    fn scored(marker: f64, score: usize) -> Individual {
        let mut stats = GameStats::new();
        for _ in 0..score {
            stats.spawn_piece();
        }
        Individual {
            chromosome: Chromosome::new([marker; FEATURE_COUNT]),
            fitness: Some(Fitness {
                seed: PieceSeed::from(0),
                result: GameResult {
                    stats,
                    reason: GameOverReason::SpawnBlocked,
                },
            }),
        }
    }

    fn evaluated(scores: &[usize]) -> Population {
        Population {
            individuals: iter::zip(0_u32.., scores)
                .map(|(i, &score)| scored(f64::from(i), score))
                .collect(),
        }
    }

    fn limited_params(population_size: usize, generations: usize) -> GeneticAlgorithmParams {
        GeneticAlgorithmParams {
            population_size,
            generations,
            play: PlayConfig {
                move_limit: Some(30),
                ..PlayConfig::default()
            },
            ..GeneticAlgorithmParams::default()
        }
    }

    #[test]
    fn test_random_population_starts_with_known_good() {
        let population = Population::random(12, &mut rng());
        assert_eq!(population.len(), 12);
        assert_eq!(population.individuals()[0].chromosome(), &Chromosome::KNOWN_GOOD);
        assert!(population.individuals().iter().all(|ind| ind.fitness().is_none()));
    }

    #[test]
    fn test_select_keeps_floor_of_rate() {
        let population = evaluated(&[5, 1, 9, 3, 7, 2, 8]);
        assert_eq!(population.select(0.5).len(), 3);
        assert_eq!(population.select(0.3).len(), 2);
        assert_eq!(population.select(1.0).len(), 7);
        assert!(population.select(0.1).is_empty());
    }

    #[test]
    fn test_select_is_stable_and_descending() {
        let population = evaluated(&[4, 9, 4, 9, 1]);
        let markers: Vec<f64> = population
            .select(1.0)
            .iter()
            .map(|ind| ind.chromosome().genes()[0])
            .collect();
        assert_eq!(markers, [1.0, 3.0, 0.0, 2.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "evaluated")]
    fn test_select_requires_evaluation() {
        let population = Population::random(4, &mut rng());
        let _ = population.select(0.5);
    }

    #[test]
    fn test_evolve_size_follows_selection() {
        let evolver = GeneticAlgorithmParams::default().evolver();
        let mut rng = rng();

        let even = evolver.evolve(&evaluated(&[1; 12]), &mut rng);
        assert_eq!(even.len(), 12);

        let odd = evolver.evolve(&evaluated(&[1; 7]), &mut rng);
        assert_eq!(odd.len(), 6);

        for ind in odd.individuals() {
            assert!(ind.fitness().is_none());
            assert_eq!(ind.chromosome().genes().len(), FEATURE_COUNT);
        }
    }

    #[test]
    fn test_evolve_keeps_survivors_first() {
        let evolver = PopulationEvolver {
            selection_rate: 0.5,
            mutation_rate: 0.0,
        };
        let population = evaluated(&[3, 8, 1, 6]);
        let next = evolver.evolve(&population, &mut rng());
        let markers: Vec<f64> = next.individuals()[..2]
            .iter()
            .map(|ind| ind.chromosome().genes()[0])
            .collect();
        assert_eq!(markers, [1.0, 3.0]);

        // without mutation every offspring gene comes from a survivor
        for ind in &next.individuals()[2..] {
            assert!(ind.chromosome().genes().iter().all(|g| *g == 1.0 || *g == 3.0));
        }
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        let params = GeneticAlgorithmParams {
            population_size: 0,
            ..GeneticAlgorithmParams::default()
        };
        assert_eq!(params.validate(), Err(InvalidParamsError::EmptyPopulation));

        let params = GeneticAlgorithmParams {
            mutation_rate: 1.5,
            ..GeneticAlgorithmParams::default()
        };
        let err = GeneticAlgorithm::new(params, PieceSeed::from(0)).unwrap_err();
        assert_eq!(err.to_string(), "mutation rate must be within [0, 1], got 1.5");
    }

    #[test]
    fn test_generation_report() {
        let mut ga = GeneticAlgorithm::new(limited_params(6, 3), PieceSeed::from(3)).unwrap();
        let report = ga.run_generation().unwrap();
        assert_eq!(report.generation, 0);
        assert_eq!(report.individuals.len(), 6);
        assert_eq!(report.genes.len(), FEATURE_COUNT);
        assert_eq!(report.fitness.count, 6);
        assert_eq!(ga.generation(), 1);
        assert_eq!(ga.population().len(), 6);

        let best = report.best().unwrap();
        assert!(report.individuals.iter().all(|ind| ind.score() <= best.score()));
        assert_eq!(ga.best(), Some(best));
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut ga = GeneticAlgorithm::new(limited_params(4, 3), PieceSeed::from(5)).unwrap();
            let mut reports = vec![];
            ga.run(|report| reports.push(report.clone())).unwrap();
            reports
        };
        let first = run();
        assert_eq!(first.len(), 3);
        assert_eq!(first, run());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let run = |parallel| {
            let params = GeneticAlgorithmParams {
                parallel,
                ..limited_params(5, 2)
            };
            let mut ga = GeneticAlgorithm::new(params, PieceSeed::from(8)).unwrap();
            let mut reports = vec![];
            ga.run(|report| reports.push(report.clone())).unwrap();
            reports
        };
        assert_eq!(run(false), run(true));
    }

    #[test]
    fn test_population_dies_out() {
        let mut ga = GeneticAlgorithm::new(limited_params(1, 3), PieceSeed::from(2)).unwrap();
        assert!(ga.run_generation().is_ok());
        assert!(ga.population().is_empty());
        assert_eq!(
            ga.run(|_| {}),
            Err(EvolutionError::Extinct { generation: 1 })
        );
    }
}
