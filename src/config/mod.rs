//! Configuration module for irlsim.
//!
//! Structured configuration loaded from environment variables (after `.env`
//! is applied by the binary), organized by concern: Simulation and
//! Observability.

mod observability_config;
mod simulation_config;

pub use observability_config::ObservabilityEnvConfig;
pub use simulation_config::{
    DEFAULT_CHUNK_SIZE, DEFAULT_HISTOGRAM_BINS, MAX_TRIALS, SimulationConfig,
};

use anyhow::Result;
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub observability: ObservabilityEnvConfig,
    /// TOML catalog to load instead of the built-in DECODE fixture
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            simulation: SimulationConfig::from_lookup(&lookup)?,
            observability: ObservabilityEnvConfig::from_lookup(&lookup),
            catalog_path: Self::catalog_path_from_lookup(&lookup),
        })
    }

    /// `IRL_CATALOG` alone, for commands that never touch the simulation knobs
    pub fn catalog_path_from_env() -> Option<PathBuf> {
        Self::catalog_path_from_lookup(|key| std::env::var(key).ok())
    }

    pub fn catalog_path_from_lookup<F>(lookup: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("IRL_CATALOG")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    }
}
