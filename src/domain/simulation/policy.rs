use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the summed weighted score of a trial is scaled back to attribute units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// Divide by the sum of every contributing method's weight sum.
    #[default]
    TotalWeight,
    /// Divide by the last processed method's weight sum times the number of
    /// selected methods. Only equals `TotalWeight` when every method carries
    /// the same weight sum; kept to reproduce historical scores.
    LastMethod,
}

impl FromStr for NormalizationPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "total_weight" | "total" => Ok(NormalizationPolicy::TotalWeight),
            "last_method" | "legacy" => Ok(NormalizationPolicy::LastMethod),
            _ => anyhow::bail!(
                "Invalid normalization policy: {}. Must be 'total_weight' or 'last_method'",
                s
            ),
        }
    }
}

impl fmt::Display for NormalizationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationPolicy::TotalWeight => f.write_str("total_weight"),
            NormalizationPolicy::LastMethod => f.write_str("last_method"),
        }
    }
}

/// What a run does when a selected method has no attribute ranges in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRangePolicy {
    /// Abort the run with `MissingAttributeRange`.
    #[default]
    Fail,
    /// Leave the method out of every trial and of the snapshot.
    Skip,
}

impl FromStr for MissingRangePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(MissingRangePolicy::Fail),
            "skip" => Ok(MissingRangePolicy::Skip),
            _ => anyhow::bail!("Invalid missing range policy: {}. Must be 'fail' or 'skip'", s),
        }
    }
}

impl fmt::Display for MissingRangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingRangePolicy::Fail => f.write_str("fail"),
            MissingRangePolicy::Skip => f.write_str("skip"),
        }
    }
}
