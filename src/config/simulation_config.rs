//! Simulation knobs parsed from environment variables or a TOML file.

use crate::domain::simulation::{
    DEFAULT_SIGMA, DEFAULT_TRIALS, MissingRangePolicy, NormalizationPolicy,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_CHUNK_SIZE: usize = 1_000;
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;
pub const MAX_TRIALS: usize = 100_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub trials: usize,
    pub sigma: f64,
    /// Fixed seed for reproducible runs; OS entropy when unset
    pub seed: Option<u64>,
    pub normalization: NormalizationPolicy,
    pub missing_range: MissingRangePolicy,
    pub parallel: bool,
    pub chunk_size: usize,
    pub histogram_bins: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            sigma: DEFAULT_SIGMA,
            seed: None,
            normalization: NormalizationPolicy::default(),
            missing_range: MissingRangePolicy::default(),
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl SimulationConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            trials: parse_or(&lookup, "IRL_TRIALS", defaults.trials)?,
            sigma: parse_or(&lookup, "IRL_SIGMA", defaults.sigma)?,
            seed: lookup("IRL_SEED")
                .map(|v| v.trim().parse::<u64>())
                .transpose()
                .context("Failed to parse IRL_SEED")?,
            normalization: parse_or(&lookup, "IRL_NORMALIZATION", defaults.normalization)?,
            missing_range: parse_or(&lookup, "IRL_MISSING_RANGE", defaults.missing_range)?,
            parallel: parse_or(&lookup, "IRL_PARALLEL", defaults.parallel)?,
            chunk_size: parse_or(&lookup, "IRL_CHUNK_SIZE", defaults.chunk_size)?,
            histogram_bins: parse_or(&lookup, "IRL_HISTOGRAM_BINS", defaults.histogram_bins)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse simulation config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.trials > MAX_TRIALS {
            anyhow::bail!("trials must be at most {}, got {}", MAX_TRIALS, self.trials);
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            anyhow::bail!("sigma must be finite and >= 0, got {}", self.sigma);
        }
        if self.chunk_size == 0 {
            anyhow::bail!("chunk_size must be > 0");
        }
        if self.histogram_bins == 0 {
            anyhow::bail!("histogram_bins must be > 0");
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}='{}': {}", key, raw, e)),
        None => Ok(default),
    }
}
