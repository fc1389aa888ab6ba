use crate::domain::errors::SimulationError;
use crate::domain::ports::MethodCatalog;
use crate::domain::simulation::engine::resolve_ranges;
use crate::domain::simulation::policy::MissingRangePolicy;
use crate::domain::types::{Attribute, MethodSelection};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Radar chart axis order
pub const RADAR_ORDER: [Attribute; 4] = [
    Attribute::Maturity,
    Attribute::Interoperability,
    Attribute::Integration,
    Attribute::Cost,
];

/// Mean range midpoint per attribute across a method selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeSnapshot {
    pub cost: f64,
    pub maturity: f64,
    pub integration: f64,
    pub interoperability: f64,
    /// Number of methods averaged
    pub methods: usize,
}

impl AttributeSnapshot {
    pub fn compute<C>(
        selection: &MethodSelection,
        catalog: &C,
        missing_range: MissingRangePolicy,
    ) -> Result<Self, SimulationError>
    where
        C: MethodCatalog + ?Sized,
    {
        if selection.is_empty() {
            return Err(SimulationError::EmptySelection);
        }

        let mut sums = [0.0f64; 4];
        let mut counted = 0usize;
        for method in selection.iter() {
            let ranges = match resolve_ranges(method, catalog) {
                Ok(ranges) => ranges,
                Err(err) => match missing_range {
                    MissingRangePolicy::Fail => return Err(err),
                    MissingRangePolicy::Skip => {
                        warn!("Snapshot skips method {}: {}", method, err);
                        continue;
                    }
                },
            };
            for (sum, range) in sums.iter_mut().zip(&ranges) {
                *sum += range.midpoint();
            }
            counted += 1;
        }

        if counted == 0 {
            return Err(SimulationError::NoContributingMethods);
        }

        let n = counted as f64;
        Ok(Self {
            cost: sums[Attribute::Cost.index()] / n,
            maturity: sums[Attribute::Maturity.index()] / n,
            integration: sums[Attribute::Integration.index()] / n,
            interoperability: sums[Attribute::Interoperability.index()] / n,
            methods: counted,
        })
    }

    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Cost => self.cost,
            Attribute::Maturity => self.maturity,
            Attribute::Integration => self.integration,
            Attribute::Interoperability => self.interoperability,
        }
    }

    /// `(label, value)` pairs in radar axis order
    pub fn radar_series(&self) -> Vec<(&'static str, f64)> {
        RADAR_ORDER
            .iter()
            .map(|attribute| (attribute.label(), self.get(*attribute)))
            .collect()
    }
}
