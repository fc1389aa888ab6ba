use crate::domain::errors::SimulationError;
use crate::domain::ports::MethodCatalog;
use crate::domain::simulation::policy::{MissingRangePolicy, NormalizationPolicy};
use crate::domain::simulation::random::stream_rng;
use crate::domain::simulation::sampler::BoundedSampler;
use crate::domain::simulation::snapshot::AttributeSnapshot;
use crate::domain::simulation::stats::{Histogram, SummaryStats};
use crate::domain::types::{Attribute, AttributeRange, MethodId, MethodSelection, WeightTable, WeightVector};
use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

pub const DEFAULT_TRIALS: usize = 10_000;

/// Scores of one run, in trial order, with statistics computed once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    scores: Vec<f64>,
    stats: Option<SummaryStats>,
}

impl SimulationResult {
    fn new(scores: Vec<f64>) -> Self {
        let stats = SummaryStats::from_scores(&scores);
        Self { scores, stats }
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// `None` when the run had zero trials
    pub fn stats(&self) -> Option<&SummaryStats> {
        self.stats.as_ref()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn histogram(&self, bins: usize) -> Option<Histogram> {
        Histogram::from_scores(&self.scores, bins)
    }
}

/// A selected method with everything a trial needs, looked up once per run.
#[derive(Debug, Clone, Copy)]
struct ResolvedMethod {
    ranges: [AttributeRange; 4],
    weights: WeightVector,
}

#[derive(Debug, Clone)]
struct RunPlan {
    methods: Vec<ResolvedMethod>,
    divisor: f64,
}

/// Monte Carlo aggregation of weighted, bounded attribute samples.
///
/// Each trial draws Cost, Maturity, Integration and Interoperability for every
/// selected method in selection order, sums `weight * sample` across all of
/// them and divides by a normalization divisor fixed for the whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationEngine {
    sampler: BoundedSampler,
    normalization: NormalizationPolicy,
    missing_range: MissingRangePolicy,
}

impl SimulationEngine {
    pub fn new(sampler: BoundedSampler) -> Self {
        Self {
            sampler,
            ..Self::default()
        }
    }

    pub fn with_normalization(mut self, normalization: NormalizationPolicy) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_missing_range(mut self, missing_range: MissingRangePolicy) -> Self {
        self.missing_range = missing_range;
        self
    }

    pub fn sampler(&self) -> &BoundedSampler {
        &self.sampler
    }

    /// Run `trials` sequential trials drawing from `rng`.
    ///
    /// All validation happens before the first draw, so an error never leaves
    /// a partially consumed stream behind a half-built result.
    pub fn run<C, R>(
        &self,
        methods: &MethodSelection,
        weights: &WeightTable,
        catalog: &C,
        trials: usize,
        rng: &mut R,
    ) -> Result<SimulationResult, SimulationError>
    where
        C: MethodCatalog + ?Sized,
        R: Rng + ?Sized,
    {
        let plan = self.plan(methods, weights, catalog)?;
        let mut scores = Vec::with_capacity(trials);
        for _ in 0..trials {
            scores.push(self.trial(&plan, rng));
        }
        Ok(SimulationResult::new(scores))
    }

    /// Same model as [`run`](Self::run), fanned out over rayon in chunks of
    /// `chunk_size` trials. Chunk `i` draws from `stream_rng(seed, i)` and
    /// chunks are concatenated in index order, so the output depends only on
    /// `seed` and `chunk_size`, never on thread scheduling.
    pub fn run_parallel<C>(
        &self,
        methods: &MethodSelection,
        weights: &WeightTable,
        catalog: &C,
        trials: usize,
        seed: u64,
        chunk_size: usize,
    ) -> Result<SimulationResult, SimulationError>
    where
        C: MethodCatalog + ?Sized,
    {
        let plan = self.plan(methods, weights, catalog)?;
        let chunk_size = chunk_size.max(1);
        let chunks = trials.div_ceil(chunk_size);

        let batches: Vec<Vec<f64>> = (0..chunks)
            .into_par_iter()
            .map(|chunk| {
                let mut rng = stream_rng(seed, chunk as u64);
                let start = chunk * chunk_size;
                let len = chunk_size.min(trials - start);
                (0..len)
                    .map(|_| self.trial(&plan, &mut rng))
                    .collect::<Vec<f64>>()
            })
            .collect();

        let mut scores = Vec::with_capacity(trials);
        for batch in batches {
            scores.extend(batch);
        }
        Ok(SimulationResult::new(scores))
    }

    /// Per-attribute mean of range midpoints across the selection.
    pub fn snapshot<C>(
        &self,
        methods: &MethodSelection,
        catalog: &C,
    ) -> Result<AttributeSnapshot, SimulationError>
    where
        C: MethodCatalog + ?Sized,
    {
        AttributeSnapshot::compute(methods, catalog, self.missing_range)
    }

    fn trial<R: Rng + ?Sized>(&self, plan: &RunPlan, rng: &mut R) -> f64 {
        let mut total = 0.0;
        for method in &plan.methods {
            for (attribute, range) in Attribute::ALL.iter().zip(&method.ranges) {
                total += method.weights.get(*attribute) * self.sampler.sample(range, rng);
            }
        }
        total / plan.divisor
    }

    fn plan<C>(
        &self,
        methods: &MethodSelection,
        weights: &WeightTable,
        catalog: &C,
    ) -> Result<RunPlan, SimulationError>
    where
        C: MethodCatalog + ?Sized,
    {
        if methods.is_empty() {
            return Err(SimulationError::EmptySelection);
        }

        let mut resolved = Vec::with_capacity(methods.len());
        for method in methods.iter() {
            let method_weights = *weights
                .get(&method)
                .ok_or(SimulationError::MissingWeights { method })?;

            match resolve_ranges(method, catalog) {
                Ok(ranges) => resolved.push(ResolvedMethod {
                    ranges,
                    weights: method_weights,
                }),
                Err(err) => match self.missing_range {
                    MissingRangePolicy::Fail => return Err(err),
                    MissingRangePolicy::Skip => {
                        warn!("Skipping method {} in every trial: {}", method, err);
                    }
                },
            }
        }

        let last = resolved.last().ok_or(SimulationError::NoContributingMethods)?;
        let divisor = match self.normalization {
            NormalizationPolicy::TotalWeight => resolved.iter().map(|m| m.weights.sum()).sum::<f64>(),
            NormalizationPolicy::LastMethod => last.weights.sum() * methods.len() as f64,
        };
        if divisor == 0.0 || !divisor.is_finite() {
            return Err(SimulationError::DegenerateNormalization { divisor });
        }

        debug!(
            "Run plan: {} of {} methods contribute, {} divisor {:.4}",
            resolved.len(),
            methods.len(),
            self.normalization,
            divisor
        );

        Ok(RunPlan {
            methods: resolved,
            divisor,
        })
    }
}

/// All four ranges of `method`, failing on the first attribute the catalog lacks.
pub(crate) fn resolve_ranges<C>(
    method: MethodId,
    catalog: &C,
) -> Result<[AttributeRange; 4], SimulationError>
where
    C: MethodCatalog + ?Sized,
{
    let lookup = |attribute| {
        catalog
            .attribute_range(method, attribute)
            .ok_or(SimulationError::MissingAttributeRange { method, attribute })
    };
    Ok([
        lookup(Attribute::Cost)?,
        lookup(Attribute::Maturity)?,
        lookup(Attribute::Integration)?,
        lookup(Attribute::Interoperability)?,
    ])
}
