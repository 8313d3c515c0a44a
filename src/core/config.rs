use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Public mindicador.cl API, used when the config names no base URL.
pub const DEFAULT_BASE_URL: &str = "https://mindicador.cl/api";

/// Example configuration written by `indicador setup`.
pub const DEFAULT_CONFIG: &str = include_str!("../../docs/example_config.yaml");

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MindicadorProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProvidersConfig {
    pub mindicador: Option<MindicadorProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            mindicador: Some(MindicadorProviderConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    pub local_catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Loads the default config file, or defaults when none has been created.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("cl", "mindicador", "indicador")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        self.providers
            .mindicador
            .as_ref()
            .map_or(DEFAULT_BASE_URL, |p| &p.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: AppConfig = serde_yaml::from_str(DEFAULT_CONFIG).expect("Failed to deserialize");
        assert_eq!(config.base_url(), "https://mindicador.cl/api");
        assert!(config.local_catalog_path.is_none());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  mindicador:
    base_url: "http://localhost:8080/api"
local_catalog_path: "/tmp/mindicador.json"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.base_url(), "http://localhost:8080/api");
        assert_eq!(
            config.local_catalog_path,
            Some(PathBuf::from("/tmp/mindicador.json"))
        );
    }

    #[test]
    fn test_config_without_providers() {
        let config: AppConfig = serde_yaml::from_str("local_catalog_path: ~\n").unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);

        let config: AppConfig = serde_yaml::from_str("providers:\n  mindicador: ~\n").unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_from_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "providers:\n  mindicador:\n    base_url: http://example.com\n")
            .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.base_url(), "http://example.com");
        assert!(AppConfig::load_from_path("/nonexistent/config.yaml").is_err());
    }
}
