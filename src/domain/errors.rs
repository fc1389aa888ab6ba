use crate::domain::types::{Attribute, MethodId};
use thiserror::Error;

/// Errors raised by the simulation core (sampler, engine, snapshot)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("No methods selected")]
    EmptySelection,

    #[error("Method {method} is selected but has no weight vector")]
    MissingWeights { method: MethodId },

    #[error("Method {method} has no {attribute} range in the catalog")]
    MissingAttributeRange {
        method: MethodId,
        attribute: Attribute,
    },

    #[error("Normalization divisor is {divisor}: at least one weight must be nonzero")]
    DegenerateNormalization { divisor: f64 },

    #[error("None of the selected methods has attribute ranges in the catalog")]
    NoContributingMethods,

    #[error("Invalid attribute range: min {min} > max {max} or not finite")]
    InvalidRange { min: f64, max: f64 },

    #[error("Invalid {attribute} weight {value}: must be finite and >= 0")]
    InvalidWeight { attribute: Attribute, value: f64 },

    #[error("Invalid sampler sigma {sigma}: must be finite and >= 0")]
    InvalidSigma { sigma: f64 },

    #[error("Method {method} selected more than once")]
    DuplicateMethod { method: MethodId },
}

/// Errors related to catalog loading and lookups
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown method: {name}")]
    UnknownMethod { name: String },

    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: &'static str, id: u32 },

    #[error("{entity} {id} references missing {target} {target_id}")]
    DanglingReference {
        entity: &'static str,
        id: u32,
        target: &'static str,
        target_id: u32,
    },

    #[error("Invalid service record {id}: {source}")]
    InvalidRecord {
        id: u32,
        #[source]
        source: SimulationError,
    },

    #[error("Invalid method selection: {0}")]
    InvalidSelection(#[from] SimulationError),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}
