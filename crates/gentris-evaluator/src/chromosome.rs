use std::{fmt, iter, num::ParseFloatError, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::feature::{FEATURE_COUNT, FeatureVector};

/// Per-feature weights that turn a [`FeatureVector`] into a placement score.
///
/// The score is the dot product of weights and features, so the gene order is
/// the order of [`Feature::ALL`](crate::feature::Feature::ALL). Higher scores
/// are better.
///
/// The text form is a bracketed, comma-separated list; parsing accepts it with
/// or without the brackets.
///
/// ```
/// use gentris_evaluator::chromosome::Chromosome;
///
/// let text = Chromosome::KNOWN_GOOD.to_string();
/// assert_eq!(text, "[-1.42, 7, -8, -2.41, 8, 6, 8]");
/// assert_eq!(text.parse::<Chromosome>().unwrap(), Chromosome::KNOWN_GOOD);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chromosome([f64; FEATURE_COUNT]);

impl Chromosome {
    /// Hand-picked weights that already play reasonably well.
    pub const KNOWN_GOOD: Self = Self([-1.42, 7.0, -8.0, -2.41, 8.0, 6.0, 8.0]);

    #[must_use]
    pub const fn new(genes: [f64; FEATURE_COUNT]) -> Self {
        Self(genes)
    }

    #[must_use]
    pub const fn genes(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub const fn genes_mut(&mut self) -> &mut [f64; FEATURE_COUNT] {
        &mut self.0
    }

    /// Scores a placement.
    #[must_use]
    pub fn score(&self, features: &FeatureVector) -> f64 {
        iter::zip(self.0, features.values())
            .map(|(weight, value)| weight * value)
            .sum()
    }
}

impl Default for Chromosome {
    fn default() -> Self {
        Self::KNOWN_GOOD
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, gene) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{gene}")?;
        }
        f.write_str("]")
    }
}

/// A gene list did not have exactly one gene per feature.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("expected {FEATURE_COUNT} genes, got {len}")]
pub struct ChromosomeLengthError {
    len: usize,
}

impl ChromosomeLengthError {
    /// Number of genes that were supplied.
    #[must_use]
    pub fn gene_count(&self) -> usize {
        self.len
    }
}

impl TryFrom<&[f64]> for Chromosome {
    type Error = ChromosomeLengthError;

    fn try_from(genes: &[f64]) -> Result<Self, Self::Error> {
        let genes = <[f64; FEATURE_COUNT]>::try_from(genes)
            .map_err(|_| ChromosomeLengthError { len: genes.len() })?;
        Ok(Self(genes))
    }
}

impl TryFrom<Vec<f64>> for Chromosome {
    type Error = ChromosomeLengthError;

    fn try_from(genes: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_from(genes.as_slice())
    }
}

/// Text could not be parsed as a [`Chromosome`].
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum ParseChromosomeError {
    #[display("invalid gene {gene:?}: {source}")]
    InvalidGene {
        gene: String,
        source: ParseFloatError,
    },
    #[display("{_0}")]
    #[from]
    Length(ChromosomeLengthError),
}

impl FromStr for Chromosome {
    type Err = ParseChromosomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(s);
        if s.trim().is_empty() {
            return Ok(Self::try_from(&[][..])?);
        }
        let genes = s
            .split(',')
            .map(str::trim)
            .map(|gene| {
                gene.parse::<f64>()
                    .map_err(|source| ParseChromosomeError::InvalidGene {
                        gene: gene.to_owned(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::try_from(genes)?)
    }
}
