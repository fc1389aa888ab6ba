//! Synthetic DECODE fuel cell catalog.
//!
//! One project, three tasks, the PEMFC technology and ten characterisation
//! methods. Attribute ranges are drawn uniformly so that every minimum lies
//! below every maximum: cost in [3, 5) / [6, 8), everything else in
//! [4, 6) / [7, 9).

use crate::domain::catalog::{Method, Project, ServiceRecord, Task, Technology};
use crate::domain::errors::{CatalogError, SimulationError};
use crate::domain::types::{AttributeRange, AttributeRanges, MethodId};
use crate::infrastructure::catalog::in_memory::InMemoryCatalog;
use rand::Rng;

const PROJECT_NAME: &str = "DECODE";
const TASK_CODES: [&str; 3] = ["T1.2", "T2.1", "T3.1"];

/// (name, task code, method type, maturity label)
const METHODS: [(&str, &str, &str, &str); 10] = [
    ("X-ray Tomographic Microscopy", "T1.2", "Imaging", "TRL 5"),
    ("Neutron Imaging", "T1.2", "Imaging", "TRL 6"),
    ("Impedance Spectroscopy", "T1.2", "Spectroscopy", "TRL 7"),
    ("Atomic Force Microscopy", "T2.1", "Microscopy", "TRL 6"),
    ("Electron Tomography", "T2.1", "Tomography", "TRL 7"),
    ("Thermal Neutron Radiography", "T2.1", "Radiography", "TRL 5"),
    ("Density Functional Theory", "T3.1", "Simulation", "TRL 8"),
    ("Synchrotron Radiation", "T3.1", "Radiation", "TRL 7"),
    ("FIB/SEM Sectioning", "T3.1", "Sectioning", "TRL 6"),
    ("Raman Spectroscopy", "T3.1", "Spectroscopy", "TRL 5"),
];

/// `T1.2-NEU` for "Neutron Imaging" under task T1.2
pub fn unique_method_code(task_code: &str, name: &str) -> String {
    let prefix: String = name.chars().take(3).collect();
    format!("{}-{}", task_code, prefix.to_uppercase())
}

impl InMemoryCatalog {
    pub fn decode_fixture<R: Rng>(rng: &mut R) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        catalog.add_project(Project {
            project_id: 1,
            name: PROJECT_NAME.to_string(),
        })?;

        for (index, code) in TASK_CODES.iter().enumerate() {
            catalog.add_task(Task {
                task_id: index as u32 + 1,
                project_id: Some(1),
                task_code: code.to_string(),
                description: Some(format!("Fuel cell analysis task {}", index + 1)),
                partner: None,
                contact_person: None,
                email: None,
            })?;
        }

        catalog.add_technology(Technology {
            technology_id: 1,
            name: "PEMFC".to_string(),
            description: Some("Polymer Electrolyte Membrane Fuel Cell".to_string()),
        })?;

        for (index, (name, task_code, method_type, maturity)) in METHODS.iter().enumerate() {
            let method_id = MethodId(index as u32 + 1);
            let task_id = TASK_CODES
                .iter()
                .position(|code| code == task_code)
                .map(|position| position as u32 + 1);

            catalog.add_method(Method {
                method_id,
                task_id,
                method_type: Some(method_type.to_string()),
                name: name.to_string(),
                objective: None,
                maturity: Some(maturity.to_string()),
                category: None,
                unique_id: Some(unique_method_code(task_code, name)),
            })?;

            let service_id = index as u32 + 1;
            let ranges = random_ranges(rng)
                .map_err(|source| CatalogError::InvalidRecord { id: service_id, source })?;
            catalog.add_service(ServiceRecord {
                service_id,
                method_id,
                technology_id: 1,
                ranges,
            })?;
        }

        Ok(catalog)
    }
}

fn random_ranges<R: Rng>(rng: &mut R) -> Result<AttributeRanges, SimulationError> {
    let maturity = AttributeRange::new(rng.random_range(4.0..6.0), rng.random_range(7.0..9.0))?;
    let cost = AttributeRange::new(rng.random_range(3.0..5.0), rng.random_range(6.0..8.0))?;
    let interoperability =
        AttributeRange::new(rng.random_range(4.0..6.0), rng.random_range(7.0..9.0))?;
    let integration = AttributeRange::new(rng.random_range(4.0..6.0), rng.random_range(7.0..9.0))?;

    Ok(AttributeRanges {
        cost,
        maturity,
        integration,
        interoperability,
    })
}
