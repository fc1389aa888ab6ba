// Monte Carlo IRL simulation
pub mod engine;
pub mod policy;
pub mod random;
pub mod sampler;
pub mod snapshot;
pub mod stats;

pub use engine::{DEFAULT_TRIALS, SimulationEngine, SimulationResult};
pub use policy::{MissingRangePolicy, NormalizationPolicy};
pub use sampler::{BoundedSampler, DEFAULT_SIGMA};
pub use snapshot::AttributeSnapshot;
pub use stats::{Histogram, SummaryStats};
