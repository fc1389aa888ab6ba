use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Summary statistics over a score sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean: f64,
    /// Population standard deviation (divides by n)
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub percentile_5: f64,
    pub median: f64,
    pub percentile_95: f64,
}

impl SummaryStats {
    /// `None` for an empty sequence.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }

        let mut sorted = scores.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Some(Self {
            mean: Statistics::mean(scores.iter()),
            std_dev: Statistics::population_std_dev(scores.iter()),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            percentile_5: percentile(&sorted, 5.0),
            median: percentile(&sorted, 50.0),
            percentile_95: percentile(&sorted, 95.0),
        })
    }
}

/// Percentile `p` (0..=100) of an ascending slice, interpolating linearly
/// between the two nearest order statistics.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Equal-width histogram of a score sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// `counts.len() + 1` ascending bin edges
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bins span [min, max] of the scores and the last bin is closed on the
    /// right. A constant sequence is binned over [value - 0.5, value + 0.5].
    pub fn from_scores(scores: &[f64], bins: usize) -> Option<Self> {
        if scores.is_empty() || bins == 0 {
            return None;
        }

        let (mut lo, mut hi) = scores
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                (lo.min(s), hi.max(s))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let span = hi - lo;
        let width = span / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| lo + span * i as f64 / bins as f64)
            .collect();
        let mut counts = vec![0usize; bins];
        for &score in scores {
            let bin = (((score - lo) / width) as usize).min(bins - 1);
            counts[bin] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
