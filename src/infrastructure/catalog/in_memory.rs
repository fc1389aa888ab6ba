//! In-memory method catalog.
//!
//! Holds projects, tasks, methods, technologies and service records, checks
//! referential integrity on insert and answers the range lookups the
//! simulation engine needs. Catalogs can be assembled in code, loaded from a
//! TOML document, or generated with [`InMemoryCatalog::decode_fixture`].

use crate::domain::catalog::{Method, Project, ServiceRecord, Task, Technology};
use crate::domain::errors::CatalogError;
use crate::domain::ports::MethodCatalog;
use crate::domain::types::{Attribute, AttributeRange, MethodId, MethodSelection};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    projects: BTreeMap<u32, Project>,
    tasks: BTreeMap<u32, Task>,
    methods: BTreeMap<MethodId, Method>,
    technologies: BTreeMap<u32, Technology>,
    /// Insertion order; the first record of a method is the one simulated
    services: Vec<ServiceRecord>,
}

/// On-disk layout of a catalog file
#[derive(Debug, Default, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    technologies: Vec<Technology>,
    #[serde(default)]
    methods: Vec<Method>,
    #[serde(default)]
    services: Vec<ServiceRecord>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = toml::from_str(content)?;

        let mut catalog = Self::new();
        for project in document.projects {
            catalog.add_project(project)?;
        }
        for technology in document.technologies {
            catalog.add_technology(technology)?;
        }
        for task in document.tasks {
            catalog.add_task(task)?;
        }
        for method in document.methods {
            catalog.add_method(method)?;
        }
        for service in document.services {
            catalog.add_service(service)?;
        }
        Ok(catalog)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn add_project(&mut self, project: Project) -> Result<(), CatalogError> {
        if self.projects.contains_key(&project.project_id) {
            return Err(CatalogError::DuplicateId {
                entity: "project",
                id: project.project_id,
            });
        }
        self.projects.insert(project.project_id, project);
        Ok(())
    }

    pub fn add_task(&mut self, task: Task) -> Result<(), CatalogError> {
        if self.tasks.contains_key(&task.task_id) {
            return Err(CatalogError::DuplicateId {
                entity: "task",
                id: task.task_id,
            });
        }
        if let Some(project_id) = task.project_id
            && !self.projects.contains_key(&project_id)
        {
            return Err(CatalogError::DanglingReference {
                entity: "task",
                id: task.task_id,
                target: "project",
                target_id: project_id,
            });
        }
        self.tasks.insert(task.task_id, task);
        Ok(())
    }

    pub fn add_technology(&mut self, technology: Technology) -> Result<(), CatalogError> {
        if self.technologies.contains_key(&technology.technology_id) {
            return Err(CatalogError::DuplicateId {
                entity: "technology",
                id: technology.technology_id,
            });
        }
        self.technologies.insert(technology.technology_id, technology);
        Ok(())
    }

    pub fn add_method(&mut self, method: Method) -> Result<(), CatalogError> {
        if self.methods.contains_key(&method.method_id) {
            return Err(CatalogError::DuplicateId {
                entity: "method",
                id: method.method_id.0,
            });
        }
        if let Some(task_id) = method.task_id
            && !self.tasks.contains_key(&task_id)
        {
            return Err(CatalogError::DanglingReference {
                entity: "method",
                id: method.method_id.0,
                target: "task",
                target_id: task_id,
            });
        }
        self.methods.insert(method.method_id, method);
        Ok(())
    }

    pub fn add_service(&mut self, service: ServiceRecord) -> Result<(), CatalogError> {
        if self.services.iter().any(|s| s.service_id == service.service_id) {
            return Err(CatalogError::DuplicateId {
                entity: "service",
                id: service.service_id,
            });
        }
        if !self.methods.contains_key(&service.method_id) {
            return Err(CatalogError::DanglingReference {
                entity: "service",
                id: service.service_id,
                target: "method",
                target_id: service.method_id.0,
            });
        }
        if !self.technologies.contains_key(&service.technology_id) {
            return Err(CatalogError::DanglingReference {
                entity: "service",
                id: service.service_id,
                target: "technology",
                target_id: service.technology_id,
            });
        }
        self.services.push(service);
        Ok(())
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.values()
    }

    pub fn technologies(&self) -> impl Iterator<Item = &Technology> {
        self.technologies.values()
    }

    pub fn method(&self, id: MethodId) -> Option<&Method> {
        self.methods.get(&id)
    }

    /// Exact name match, falling back to a case-insensitive one
    pub fn find_method_by_name(&self, name: &str) -> Option<&Method> {
        let name = name.trim();
        self.methods
            .values()
            .find(|m| m.name == name)
            .or_else(|| self.methods.values().find(|m| m.name.eq_ignore_ascii_case(name)))
    }

    /// Selection in the order the names are given
    pub fn resolve_selection<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<MethodSelection, CatalogError> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let method = self
                .find_method_by_name(name.as_ref())
                .ok_or_else(|| CatalogError::UnknownMethod {
                    name: name.as_ref().to_string(),
                })?;
            ids.push(method.method_id);
        }
        Ok(MethodSelection::new(ids)?)
    }

    /// First service record registered for `method`
    pub fn primary_service(&self, method: MethodId) -> Option<&ServiceRecord> {
        self.services.iter().find(|s| s.method_id == method)
    }

    /// Every task in id order with the methods that belong to it
    pub fn methods_by_task(&self) -> Vec<(&Task, Vec<&Method>)> {
        self.tasks
            .values()
            .map(|task| {
                let methods = self
                    .methods
                    .values()
                    .filter(|m| m.task_id == Some(task.task_id))
                    .collect();
                (task, methods)
            })
            .collect()
    }

    /// Every technology in id order with the methods that have a service
    /// record for it, in record order
    pub fn methods_by_technology(&self) -> Vec<(&Technology, Vec<&Method>)> {
        self.technologies
            .values()
            .map(|technology| {
                let mut methods: Vec<&Method> = Vec::new();
                for service in self
                    .services
                    .iter()
                    .filter(|s| s.technology_id == technology.technology_id)
                {
                    if let Some(method) = self.methods.get(&service.method_id)
                        && !methods.iter().any(|m| m.method_id == method.method_id)
                    {
                        methods.push(method);
                    }
                }
                (technology, methods)
            })
            .collect()
    }
}

impl MethodCatalog for InMemoryCatalog {
    fn attribute_range(&self, method: MethodId, attribute: Attribute) -> Option<AttributeRange> {
        self.primary_service(method).map(|s| s.ranges.get(attribute))
    }
}
