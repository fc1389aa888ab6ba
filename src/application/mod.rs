pub mod reporting;
pub mod simulation_service;

pub use reporting::SimulationReporter;
pub use simulation_service::{SimulationReport, SimulationRequest, SimulationService};
