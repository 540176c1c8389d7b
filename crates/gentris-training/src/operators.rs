//! Genetic operators on [`Chromosome`]s.
//!
//! These are the building blocks used by [`genetic`](crate::genetic) to
//! create and vary individuals:
//!
//! - **Initialization**: [`random_chromosome`] draws every gene from the
//!   integers in [`INITIAL_GENE_RANGE`]
//! - **Crossover**: [`crossover`] splices two parents at one random point
//! - **Mutation**: [`mutate`] halves a gene and adds a small random shift
//!
//! # Mutation Shape
//!
//! A mutated gene becomes `gene / 2 + u + k`, where `u` is uniform in
//! `[0, 1)` and `k` is an integer in [`MUTATION_SHIFT_RANGE`]. Repeated
//! mutation pulls a gene toward the shift's mean (a little above 2) instead
//! of letting it drift without bound. The shift is not centered on zero, so
//! mutation also nudges weights upward.
//!
//! Operators never rescale genes; only their ratios matter for move choice,
//! but no normalization step is applied.

use std::ops::RangeInclusive;

use gentris_evaluator::{chromosome::Chromosome, feature::FEATURE_COUNT};
use rand::Rng;

/// Integers initial genes are drawn from.
pub const INITIAL_GENE_RANGE: RangeInclusive<i32> = -10..=10;

/// Integer part of the shift added to a mutated gene.
pub const MUTATION_SHIFT_RANGE: RangeInclusive<i32> = -2..=5;

/// Valid crossover points: both parents contribute at least one gene.
pub const CROSSOVER_POINT_RANGE: RangeInclusive<usize> = 1..=FEATURE_COUNT - 1;

/// Generates a chromosome with integer genes from [`INITIAL_GENE_RANGE`].
///
/// ```
/// use gentris_training::operators;
///
/// let chromosome = operators::random_chromosome(&mut rand::rng());
/// assert!(chromosome.genes().iter().all(|g| g.fract() == 0.0 && g.abs() <= 10.0));
/// ```
pub fn random_chromosome<R>(rng: &mut R) -> Chromosome
where
    R: Rng + ?Sized,
{
    Chromosome::new(std::array::from_fn(|_| {
        f64::from(rng.random_range(INITIAL_GENE_RANGE))
    }))
}

/// Single-point crossover at a random point from [`CROSSOVER_POINT_RANGE`].
pub fn crossover<R>(p1: &Chromosome, p2: &Chromosome, rng: &mut R) -> Chromosome
where
    R: Rng + ?Sized,
{
    crossover_at(p1, p2, rng.random_range(CROSSOVER_POINT_RANGE))
}

/// Takes genes `..point` from `p1` and `point..` from `p2`.
///
/// # Panics
///
/// Panics if `point` is greater than [`FEATURE_COUNT`].
///
/// ```
/// use gentris_evaluator::chromosome::Chromosome;
/// use gentris_training::operators;
///
/// let p1 = Chromosome::new([1.0; 7]);
/// let p2 = Chromosome::new([2.0; 7]);
/// let child = operators::crossover_at(&p1, &p2, 3);
/// assert_eq!(child.genes(), &[1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0]);
/// ```
#[must_use]
pub fn crossover_at(p1: &Chromosome, p2: &Chromosome, point: usize) -> Chromosome {
    assert!(point <= FEATURE_COUNT, "crossover point {point} out of range");
    let mut child = *p2;
    child.genes_mut()[..point].copy_from_slice(&p1.genes()[..point]);
    child
}

/// Mutates each gene independently with probability `rate`.
///
/// # Arguments
///
/// * `chromosome` - Chromosome to mutate in place
/// * `rate` - Per-gene mutation probability, in `[0, 1]`
/// * `rng` - Random number generator
///
/// # Panics
///
/// Panics if `rate` is outside `[0, 1]`.
pub fn mutate<R>(chromosome: &mut Chromosome, rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for gene in chromosome.genes_mut() {
        if rng.random_bool(rate) {
            *gene = *gene / 2.0
                + rng.random::<f64>()
                + f64::from(rng.random_range(MUTATION_SHIFT_RANGE));
        }
    }
}

#[cfg(test)]
mod tests {
    use gentris_engine::PieceSeed;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::from_seed(PieceSeed::from(42).to_bytes())
    }

    #[test]
    fn test_random_chromosome_genes_are_integers_in_range() {
        let mut rng = rng();
        for _ in 0..100 {
            let chromosome = random_chromosome(&mut rng);
            for &gene in chromosome.genes() {
                assert_eq!(gene.fract(), 0.0);
                assert!((-10.0..=10.0).contains(&gene), "{gene}");
            }
        }
    }

    #[test]
    fn test_crossover_point_splits_parents() {
        let p1 = Chromosome::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let p2 = Chromosome::new([-1.0, -2.0, -3.0, -4.0, -5.0, -6.0, -7.0]);
        let mut rng = rng();
        for _ in 0..100 {
            let child = crossover(&p1, &p2, &mut rng);
            let genes = child.genes();
            let point = genes.iter().position(|g| *g < 0.0).unwrap();
            assert!(CROSSOVER_POINT_RANGE.contains(&point), "{child}");
            assert_eq!(genes[..point], p1.genes()[..point]);
            assert_eq!(genes[point..], p2.genes()[point..]);
        }
    }

    #[test]
    fn test_crossover_at_ends() {
        let p1 = Chromosome::new([1.0; 7]);
        let p2 = Chromosome::new([2.0; 7]);
        assert_eq!(crossover_at(&p1, &p2, 0), p2);
        assert_eq!(crossover_at(&p1, &p2, FEATURE_COUNT), p1);
    }

    #[test]
    fn test_mutate_rate_zero_keeps_genes() {
        let mut chromosome = Chromosome::KNOWN_GOOD;
        mutate(&mut chromosome, 0.0, &mut rng());
        assert_eq!(chromosome, Chromosome::KNOWN_GOOD);
    }

    #[test]
    fn test_mutate_rate_one_changes_every_gene_within_bounds() {
        let mut rng = rng();
        let original = Chromosome::new([4.0, -6.0, 0.0, 10.0, -10.0, 2.0, 8.0]);
        let mut chromosome = original;
        mutate(&mut chromosome, 1.0, &mut rng);
        assert_eq!(chromosome.genes().len(), FEATURE_COUNT);
        for (before, after) in original.genes().iter().zip(chromosome.genes()) {
            let shift = after - before / 2.0;
            assert!((-2.0..6.0).contains(&shift), "{before} -> {after}");
        }
    }
}
