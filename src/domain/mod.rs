// Catalog entities (tasks, methods, technologies, service records)
pub mod catalog;

// Domain-specific error types
pub mod errors;

// Port interfaces
pub mod ports;

// Monte Carlo simulation core
pub mod simulation;

// Attributes, ranges, weights, selections
pub mod types;
