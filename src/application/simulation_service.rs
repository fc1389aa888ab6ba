use crate::config::SimulationConfig;
use crate::domain::errors::SimulationError;
use crate::domain::ports::MethodCatalog;
use crate::domain::simulation::random::{fresh_seed, stream_rng};
use crate::domain::simulation::{
    AttributeSnapshot, BoundedSampler, Histogram, MissingRangePolicy, NormalizationPolicy,
    SimulationEngine, SimulationResult, SummaryStats,
};
use crate::domain::types::{MethodId, MethodSelection, WeightTable, WeightVector};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// One simulation request: which methods, weighted how.
#[derive(Debug, Clone)]
pub struct SimulationRequest {
    pub methods: MethodSelection,
    pub weights: WeightTable,
}

impl SimulationRequest {
    /// Every selected method starts at the default weight of 1.0 per attribute.
    pub fn with_default_weights(methods: MethodSelection) -> Self {
        let weights = methods
            .iter()
            .map(|id| (id, WeightVector::default()))
            .collect();
        Self { methods, weights }
    }

    pub fn set_weights(&mut self, method: MethodId, weights: WeightVector) {
        self.weights.insert(method, weights);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub generated_at: DateTime<Utc>,
    pub methods: Vec<MethodId>,
    pub trials: usize,
    pub sigma: f64,
    /// Master seed the run drew from; replaying with it reproduces the scores
    pub seed: u64,
    pub parallel: bool,
    pub normalization: NormalizationPolicy,
    pub missing_range: MissingRangePolicy,
    pub stats: Option<SummaryStats>,
    pub histogram: Option<Histogram>,
    pub snapshot: AttributeSnapshot,
    #[serde(skip)]
    pub result: SimulationResult,
}

/// Runs the engine against a catalog with the configured knobs.
pub struct SimulationService<'a, C: MethodCatalog + ?Sized> {
    catalog: &'a C,
    config: SimulationConfig,
}

impl<'a, C: MethodCatalog + ?Sized> SimulationService<'a, C> {
    pub fn new(catalog: &'a C, config: SimulationConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn engine(&self) -> Result<SimulationEngine, SimulationError> {
        let sampler = BoundedSampler::new(self.config.sigma)?;
        Ok(SimulationEngine::new(sampler)
            .with_normalization(self.config.normalization)
            .with_missing_range(self.config.missing_range))
    }

    pub fn simulate(&self, request: &SimulationRequest) -> Result<SimulationReport, SimulationError> {
        let engine = self.engine()?;
        let config = &self.config;
        let seed = config.seed.unwrap_or_else(fresh_seed);

        if config.normalization == NormalizationPolicy::LastMethod {
            warn!("Using last-method normalization; scores are only comparable to historical runs");
        }
        info!(
            "Running {} trials over {} methods (sigma={}, seed={}, parallel={})",
            config.trials,
            request.methods.len(),
            config.sigma,
            seed,
            config.parallel
        );

        let result = if config.parallel {
            engine.run_parallel(
                &request.methods,
                &request.weights,
                self.catalog,
                config.trials,
                seed,
                config.chunk_size,
            )?
        } else {
            engine.run(
                &request.methods,
                &request.weights,
                self.catalog,
                config.trials,
                &mut stream_rng(seed, 0),
            )?
        };
        let snapshot = engine.snapshot(&request.methods, self.catalog)?;

        match result.stats() {
            Some(stats) => info!(
                "Simulation complete: mean={:.4} std={:.4} p5={:.4} p50={:.4} p95={:.4}",
                stats.mean, stats.std_dev, stats.percentile_5, stats.median, stats.percentile_95
            ),
            None => info!("Simulation complete: no trials requested"),
        }

        Ok(SimulationReport {
            generated_at: Utc::now(),
            methods: request.methods.as_slice().to_vec(),
            trials: config.trials,
            sigma: config.sigma,
            seed,
            parallel: config.parallel,
            normalization: config.normalization,
            missing_range: config.missing_range,
            stats: result.stats().copied(),
            histogram: result.histogram(config.histogram_bins),
            snapshot,
            result,
        })
    }

    pub fn snapshot(&self, methods: &MethodSelection) -> Result<AttributeSnapshot, SimulationError> {
        self.engine()?.snapshot(methods, self.catalog)
    }
}
