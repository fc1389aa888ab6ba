//! Reporting utilities for simulation results.
//!
//! Provides formatted console output and JSON export capabilities.

use crate::application::simulation_service::SimulationReport;
use crate::domain::simulation::AttributeSnapshot;
use crate::domain::types::MethodId;
use crate::infrastructure::InMemoryCatalog;
use anyhow::{Context, Result};
use std::path::Path;

/// Reporter for simulation output.
pub struct SimulationReporter<'a> {
    catalog: &'a InMemoryCatalog,
}

impl<'a> SimulationReporter<'a> {
    pub fn new(catalog: &'a InMemoryCatalog) -> Self {
        Self { catalog }
    }

    fn method_name(&self, id: MethodId) -> String {
        self.catalog
            .method(id)
            .map(|m| m.display_name())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn print_header(&self, methods: &[MethodId], trials: usize, sigma: f64) {
        println!("\n{}", "=".repeat(80));
        println!("IRL Monte Carlo Simulation");
        println!("{}", "=".repeat(80));
        println!("Trials: {}   Sigma: {}", trials, sigma);
        println!("Bundle:");
        for id in methods {
            println!("  - {}", self.method_name(*id));
        }
    }

    pub fn print_summary(&self, report: &SimulationReport) {
        println!("\n{}", "-".repeat(80));
        println!(
            "Seed: {}   Normalization: {}   Missing ranges: {}",
            report.seed, report.normalization, report.missing_range
        );

        match &report.stats {
            Some(stats) => {
                println!("Mean IRL Score:     {:.4}", stats.mean);
                println!("Standard Deviation: {:.4}", stats.std_dev);
                println!(
                    "5th Percentile: {:.4}, Median: {:.4}, 95th Percentile: {:.4}",
                    stats.percentile_5, stats.median, stats.percentile_95
                );
                println!("Range: [{:.4}, {:.4}]", stats.min, stats.max);
            }
            None => println!("No trials were run."),
        }

        self.print_snapshot(&report.snapshot);
    }

    pub fn print_snapshot(&self, snapshot: &AttributeSnapshot) {
        println!(
            "\nAverage values for selected methods ({} averaged):",
            snapshot.methods
        );
        for (label, value) in snapshot.radar_series() {
            println!("  {:<18} {:>6.3}", label, value);
        }
    }

    pub fn print_methods_by_task(&self) {
        for (task, methods) in self.catalog.methods_by_task() {
            println!("Task {}", task.task_code);
            for method in methods {
                println!(
                    "  - {} ({})",
                    method.name,
                    method.method_type.as_deref().unwrap_or("-")
                );
            }
        }
    }

    pub fn print_methods_by_technology(&self) {
        for (technology, methods) in self.catalog.methods_by_technology() {
            println!("Technology: {}", technology.name);
            for method in methods {
                println!("  - {}", method.name);
            }
        }
    }

    /// Writes the report (without the raw score sequence) as pretty JSON.
    pub fn save_json(&self, report: &SimulationReport, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }
}
