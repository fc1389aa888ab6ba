//! Catalog entities.
//!
//! Projects group tasks, tasks own methods, and a service record binds a
//! method to a technology together with the four attribute ranges the
//! simulation samples from.

use crate::domain::types::{AttributeRanges, MethodId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: u32,
    #[serde(default)]
    pub project_id: Option<u32>,
    pub task_code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub partner: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub method_id: MethodId,
    #[serde(default)]
    pub task_id: Option<u32>,
    #[serde(default)]
    pub method_type: Option<String>,
    pub name: String,
    #[serde(default)]
    pub objective: Option<String>,
    /// Free-text readiness label such as "TRL 6"
    #[serde(default)]
    pub maturity: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unique_id: Option<String>,
}

impl Method {
    /// `"Neutron Imaging (TRL 6)"`, or just the name when no maturity label is set
    pub fn display_name(&self) -> String {
        match &self.maturity {
            Some(maturity) => format!("{} ({})", self.name, maturity),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technology {
    pub technology_id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Binds a method to a technology together with its attribute ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub service_id: u32,
    pub method_id: MethodId,
    pub technology_id: u32,
    pub ranges: AttributeRanges,
}
