use crate::domain::errors::SimulationError;
use crate::domain::types::AttributeRange;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

pub const DEFAULT_SIGMA: f64 = 0.5;

/// Normal draw centred on the range midpoint, clipped into the range.
///
/// Out-of-range draws are clamped to the nearest bound rather than resampled,
/// so a sigma that is large relative to the half-range piles mass onto the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedSampler {
    sigma: f64,
}

impl BoundedSampler {
    pub fn new(sigma: f64) -> Result<Self, SimulationError> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(SimulationError::InvalidSigma { sigma });
        }
        Ok(Self { sigma })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn sample<R: Rng + ?Sized>(&self, range: &AttributeRange, rng: &mut R) -> f64 {
        let z: f64 = StandardNormal.sample(rng);
        let value = range.midpoint() + self.sigma * z;
        value.max(range.min()).min(range.max())
    }
}

impl Default for BoundedSampler {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
        }
    }
}
