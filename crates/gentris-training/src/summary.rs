use serde::{Deserialize, Serialize};

/// Descriptive statistics of a non-empty sample.
///
/// ```
/// use gentris_training::summary::Summary;
///
/// let summary = Summary::of([2.0, 4.0, 9.0]).unwrap();
/// assert_eq!(summary.min, 2.0);
/// assert_eq!(summary.max, 9.0);
/// assert_eq!(summary.mean, 5.0);
/// assert!(Summary::of(Vec::new()).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl Summary {
    /// Returns `None` for an empty sample.
    #[expect(clippy::cast_precision_loss)]
    pub fn of<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            });

        Some(Self {
            count,
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}
