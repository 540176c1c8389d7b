use std::{iter, path::PathBuf};

use chrono::Utc;
use gentris_evaluator::{board_analysis::BaselineMode, feature::Feature, move_search::SearchDepth};
use gentris_training::genetic::{GenerationReport, GeneticAlgorithm, GeneticAlgorithmParams};

use crate::{
    command::play::print_result,
    schema::record::TrainingReport,
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Genetic algorithm parameters (JSON); missing fields use the defaults
    #[arg(long)]
    params: Option<PathBuf>,
    /// Seed of the run (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Override the number of generations
    #[arg(long)]
    generations: Option<usize>,
    /// Override the initial population size
    #[arg(long)]
    population_size: Option<usize>,
    /// Evaluate individuals on separate threads
    #[arg(long)]
    parallel: bool,
    /// Consider the next piece when choosing a move
    #[arg(long)]
    lookahead: bool,
    /// Count holes and blocking blocks relative to the board before each move
    #[arg(long)]
    relative_baseline: bool,
    /// Stop each fitness game after this many moves
    #[arg(long)]
    move_limit: Option<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TrainArg {
    fn load_params(&self) -> anyhow::Result<GeneticAlgorithmParams> {
        let mut params: GeneticAlgorithmParams = match &self.params {
            Some(path) => util::read_json_file("parameters", path)?,
            None => GeneticAlgorithmParams::default(),
        };
        if let Some(generations) = self.generations {
            params.generations = generations;
        }
        if let Some(population_size) = self.population_size {
            params.population_size = population_size;
        }
        params.parallel |= self.parallel;
        if self.lookahead {
            params.play.depth = SearchDepth::TwoPly;
        }
        if self.relative_baseline {
            params.play.baseline = BaselineMode::BeforeMove;
        }
        if self.move_limit.is_some() {
            params.play.move_limit = self.move_limit;
        }
        Ok(params)
    }
}

fn print_generation(report: &GenerationReport) {
    eprintln!("Generation #{}:", report.generation);
    for ind in &report.individuals {
        if let Some(fitness) = ind.fitness() {
            print_result(ind.chromosome(), &fitness.result);
        }
    }

    eprintln!("  Gene Stats:");
    eprintln!(
        "    {:<20} {:>8} {:>8} {:>8} {:>8}",
        "Feature", "Min", "Max", "Mean", "Stddev"
    );
    for (feature, stats) in iter::zip(Feature::ALL, &report.genes) {
        eprintln!(
            "    {:<20} {:>8.3} {:>8.3} {:>8.3} {:>8.3}",
            feature.to_string(),
            stats.min,
            stats.max,
            stats.mean,
            stats.std_dev,
        );
    }

    eprintln!("  Fitness Stats:");
    eprintln!("    Min:  {:.0}", report.fitness.min);
    eprintln!("    Max:  {:.0}", report.fitness.max);
    eprintln!("    Mean: {:.3}", report.fitness.mean);
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let params = arg.load_params()?;
    let (seed, piece_seed) = util::seed_or_random(arg.seed);
    let mut ga = GeneticAlgorithm::new(params.clone(), piece_seed)?;

    let mut generations = vec![];
    let outcome = ga.run(|report| {
        print_generation(report);
        generations.push(report.clone());
    });
    let stopped_early = outcome.err().map(|err| {
        eprintln!("Training stopped early: {err}");
        err.to_string()
    });

    eprintln!("Training completed after {} generations.", ga.generation());

    let report = TrainingReport {
        trained_at: Utc::now(),
        seed,
        params,
        best: ga.best().cloned(),
        stopped_early,
        generations,
    };
    Output::save_json(&report, arg.output.as_deref())?;

    eprintln!();
    eprintln!("Report saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Trained at: {}", report.trained_at);
    if let Some(best) = &report.best
        && let Some(fitness) = best.fitness()
    {
        eprintln!("  Best chromosome: {}", best.chromosome());
        eprintln!("  Best score: {}", fitness.result.score());
    }

    Ok(())
}
