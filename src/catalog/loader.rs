//! apidoc output loader (`api_data.json` + `api_project.json`)

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::catalog::models::{EndpointDescriptor, ProjectInfo};
use crate::catalog::Catalog;
use crate::constants::{API_DATA_FILE, API_PROJECT_FILE};

/// Load a catalog from an apidoc output directory.
/// The project file is optional, the endpoint file is not.
pub fn load_catalog(dir: &Path) -> Result<Catalog> {
    let data_path = dir.join(API_DATA_FILE);
    let data = fs::read_to_string(&data_path)
        .with_context(|| format!("reading {}", data_path.display()))?;

    let project_path = dir.join(API_PROJECT_FILE);
    let project = if project_path.exists() {
        Some(
            fs::read_to_string(&project_path)
                .with_context(|| format!("reading {}", project_path.display()))?,
        )
    } else {
        None
    };

    let catalog = parse_catalog(&data, project.as_deref())
        .with_context(|| format!("parsing catalog in {}", dir.display()))?;
    tracing::info!(
        dir = %dir.display(),
        endpoints = catalog.endpoints().len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

/// Parse catalog JSON documents
pub fn parse_catalog(api_data: &str, api_project: Option<&str>) -> Result<Catalog> {
    let endpoints: Vec<EndpointDescriptor> =
        serde_json::from_str(api_data).context("invalid endpoint records")?;
    let project = match api_project {
        Some(text) => serde_json::from_str::<ProjectInfo>(text).context("invalid project metadata")?,
        None => ProjectInfo::default(),
    };
    Ok(Catalog::new(project, endpoints))
}
