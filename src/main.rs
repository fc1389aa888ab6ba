//! IRL Monte Carlo CLI
//!
//! Scores a bundle of measurement methods against the catalog and prints the
//! resulting Integration Readiness Level distribution.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use irlsim::application::{SimulationReporter, SimulationRequest, SimulationService};
use irlsim::config::{Config, ObservabilityEnvConfig, SimulationConfig};
use irlsim::domain::types::WeightVector;
use irlsim::infrastructure::InMemoryCatalog;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tracing::info;

/// Seed for the built-in DECODE catalog so method ranges are stable between runs
const FIXTURE_SEED: u64 = 2024;

#[derive(Parser)]
#[command(author, version, about = "Integration Readiness Level Monte Carlo simulation", long_about = None)]
struct Cli {
    /// TOML catalog file (defaults to IRL_CATALOG, then the built-in DECODE fixture)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Monte Carlo simulation for a bundle of methods
    Run {
        /// Comma-separated method names
        #[arg(short, long)]
        methods: String,

        /// Per-method weights, e.g. "Neutron Imaging:cost=1.2,maturity=0.8" (repeatable)
        #[arg(short, long)]
        weight: Vec<String>,

        /// Number of Monte Carlo trials
        #[arg(short, long)]
        trials: Option<usize>,

        /// Sampler standard deviation
        #[arg(long)]
        sigma: Option<f64>,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Fan trials out over a thread pool
        #[arg(long)]
        parallel: bool,

        /// TOML file with simulation settings (overrides environment)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output JSON file for the report
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the per-attribute average of range midpoints for a bundle
    Snapshot {
        /// Comma-separated method names
        #[arg(short, long)]
        methods: String,
    },
    /// List catalog methods by task or by technology
    Catalog {
        /// Group by technology instead of task
        #[arg(long)]
        by_technology: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let observability = ObservabilityEnvConfig::from_env();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&observability.log_filter)
            }),
        )
        .with_ansi(observability.ansi)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let catalog_path = cli.catalog.or_else(Config::catalog_path_from_env);
    let catalog = load_catalog(catalog_path.as_deref())?;
    let reporter = SimulationReporter::new(&catalog);

    match cli.command {
        Commands::Run {
            methods,
            weight,
            trials,
            sigma,
            seed,
            parallel,
            config,
            output,
        } => {
            let mut sim_config = match config {
                Some(path) => SimulationConfig::from_toml_file(&path)?,
                None => SimulationConfig::from_env()?,
            };
            if let Some(trials) = trials {
                sim_config.trials = trials;
            }
            if let Some(sigma) = sigma {
                sim_config.sigma = sigma;
            }
            if seed.is_some() {
                sim_config.seed = seed;
            }
            sim_config.parallel |= parallel;
            sim_config.validate()?;

            let selection = catalog.resolve_selection(&split_names(&methods))?;
            let mut request = SimulationRequest::with_default_weights(selection);
            for arg in &weight {
                let (name, weights) = arg.split_once(':').with_context(|| {
                    format!("Invalid --weight '{}': expected 'Method Name:cost=1.0,...'", arg)
                })?;
                let method = catalog
                    .find_method_by_name(name)
                    .with_context(|| format!("Unknown method in --weight: {}", name))?;
                if !request.methods.as_slice().contains(&method.method_id) {
                    anyhow::bail!("--weight given for unselected method {}", method.name);
                }
                let weights: WeightVector = weights.parse()?;
                request.set_weights(method.method_id, weights);
            }

            reporter.print_header(request.methods.as_slice(), sim_config.trials, sim_config.sigma);
            let service = SimulationService::new(&catalog, sim_config);
            let report = service.simulate(&request)?;
            reporter.print_summary(&report);

            if let Some(path) = output {
                reporter.save_json(&report, &path)?;
                info!("Report written to {}", path.display());
            }
        }
        Commands::Snapshot { methods } => {
            let selection = catalog.resolve_selection(&split_names(&methods))?;
            let service = SimulationService::new(&catalog, SimulationConfig::from_env()?);
            let snapshot = service.snapshot(&selection)?;
            reporter.print_snapshot(&snapshot);
        }
        Commands::Catalog { by_technology } => {
            if by_technology {
                reporter.print_methods_by_technology();
            } else {
                reporter.print_methods_by_task();
            }
        }
    }

    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<InMemoryCatalog> {
    match path {
        Some(path) => {
            info!("Loading catalog from: {}", path.display());
            InMemoryCatalog::from_toml_file(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))
        }
        None => {
            info!("Using built-in DECODE catalog");
            InMemoryCatalog::decode_fixture(&mut StdRng::seed_from_u64(FIXTURE_SEED))
                .context("Failed to build DECODE catalog")
        }
    }
}

fn split_names(methods: &str) -> Vec<String> {
    methods
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
