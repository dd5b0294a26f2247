//! Documentation catalog - read-only endpoint records loaded once at start-up
//!
//! The catalog is shared with the app layer behind an `Arc` and never mutated.

pub mod loader;
pub mod models;

pub use loader::{load_catalog, parse_catalog};
pub use models::*;

/// Immutable set of documented endpoints plus project metadata
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    project: ProjectInfo,
    endpoints: Vec<EndpointDescriptor>,
}

impl Catalog {
    pub fn new(project: ProjectInfo, endpoints: Vec<EndpointDescriptor>) -> Self {
        Catalog { project, endpoints }
    }

    pub fn project(&self) -> &ProjectInfo {
        &self.project
    }

    pub fn endpoints(&self) -> &[EndpointDescriptor] {
        &self.endpoints
    }

    pub fn get(&self, index: usize) -> Option<&EndpointDescriptor> {
        self.endpoints.get(index)
    }

    /// Locate an endpoint by `group` and `name`
    pub fn find(&self, group: &str, name: &str) -> Option<usize> {
        self.endpoints
            .iter()
            .position(|ep| ep.group == group && ep.name == name)
    }

    /// Groups in order of first appearance
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for endpoint in &self.endpoints {
            if !groups.contains(&endpoint.group.as_str()) {
                groups.push(endpoint.group.as_str());
            }
        }
        groups
    }

    /// Endpoints matching `search`, grouped by first appearance of their group
    pub fn grouped(&self, search: &str) -> Vec<(&str, Vec<usize>)> {
        let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();

        for (index, endpoint) in self.endpoints.iter().enumerate() {
            if !endpoint.matches(search) {
                continue;
            }
            match groups.iter().position(|(g, _)| *g == endpoint.group) {
                Some(slot) => groups[slot].1.push(index),
                None => groups.push((endpoint.group.as_str(), vec![index])),
            }
        }

        groups
    }

    /// Flattened listing order used for navigation
    pub fn listing(&self, search: &str) -> Vec<usize> {
        self.grouped(search)
            .into_iter()
            .flat_map(|(_, members)| members)
            .collect()
    }
}
