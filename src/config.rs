//! Startup configuration: command line, optional YAML file, catalog defaults

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::constants::{APP_NAME, CONFIG_FILE};

/// Browse an apidoc catalog and send requests against it
#[derive(Parser, Debug, Default, Clone)]
#[command(name = APP_NAME, version, about)]
pub struct Cli {
    /// Directory holding api_data.json and api_project.json
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Base URL requests are sent to
    #[arg(long)]
    pub host: Option<String>,

    /// Open an endpoint on startup, as GROUP/NAME
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Config file to read instead of the per-user one
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Contents of `config.yaml`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: Option<String>,
    pub catalog_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// `<config dir>/apiboard/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Read a config file. A missing file is an empty config; a malformed
    /// one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Explicit path from the command line, else the per-user default
    pub fn discover(cli: &Cli) -> Result<Self> {
        match cli.config.as_deref() {
            Some(path) => Config::load(path),
            None => match Config::default_path() {
                Some(path) => Config::load(&path),
                None => Ok(Config::default()),
            },
        }
    }
}

/// Effective settings after merging command line and config file
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub catalog_dir: PathBuf,
    pub log_dir: PathBuf,
    pub endpoint: Option<(String, String)>,
    host: Option<String>,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let endpoint = match cli.endpoint.as_deref() {
            Some(link) => Some(parse_endpoint_ref(link)?),
            None => None,
        };

        Ok(Settings {
            catalog_dir: cli
                .catalog
                .clone()
                .or_else(|| config.catalog_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            log_dir: config.log_dir.clone().unwrap_or_else(|| PathBuf::from(".")),
            endpoint,
            host: cli.host.clone().or_else(|| config.host.clone()),
        })
    }

    /// Host to start with; falls back to the catalog's own URL, then empty
    pub fn host(&self, project_url: Option<&str>) -> String {
        self.host
            .clone()
            .or_else(|| project_url.map(str::to_string))
            .unwrap_or_default()
    }
}

/// `Group/Name` deep link into the catalog
pub fn parse_endpoint_ref(link: &str) -> Result<(String, String)> {
    match link.split_once('/') {
        Some((group, name)) if !group.is_empty() && !name.is_empty() => {
            Ok((group.to_string(), name.to_string()))
        }
        _ => anyhow::bail!("endpoint must look like GROUP/NAME, got {:?}", link),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "host: http://api.local\ncatalog_dir: /srv/doc\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.host.as_deref(), Some("http://api.local"));
        assert_eq!(config.catalog_dir, Some(PathBuf::from("/srv/doc")));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "host: [unclosed").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_host_precedence() {
        let config = Config {
            host: Some("http://from-config".into()),
            ..Config::default()
        };
        let cli = Cli {
            host: Some("http://from-cli".into()),
            ..Cli::default()
        };

        let settings = Settings::resolve(&cli, &config).unwrap();
        assert_eq!(settings.host(Some("http://project")), "http://from-cli");

        let settings = Settings::resolve(&Cli::default(), &config).unwrap();
        assert_eq!(settings.host(Some("http://project")), "http://from-config");

        let settings = Settings::resolve(&Cli::default(), &Config::default()).unwrap();
        assert_eq!(settings.host(Some("http://project")), "http://project");
        assert_eq!(settings.host(None), "");
    }

    #[test]
    fn test_endpoint_ref() {
        assert_eq!(
            parse_endpoint_ref("User/GetUser").unwrap(),
            ("User".to_string(), "GetUser".to_string())
        );
        assert!(parse_endpoint_ref("GetUser").is_err());
        assert!(parse_endpoint_ref("/GetUser").is_err());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from(["apiboard", "-c", "doc", "--host", "http://x", "-e", "A/B"]).unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("doc")));
        let settings = Settings::resolve(&cli, &Config::default()).unwrap();
        assert_eq!(settings.endpoint, Some(("A".into(), "B".into())));
        assert_eq!(settings.catalog_dir, PathBuf::from("doc"));
    }
}
