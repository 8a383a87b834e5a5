//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, Environment, File};
use std::path::Path;
use sunlog_core::SunlogError;
use tracing::{debug, info};
use url::Url;

/// Configuration loader.
///
/// Configuration is loaded from multiple sources in order:
/// 1. `config/default.toml` - Default values
/// 2. `config/{environment}.toml` - Environment-specific overrides
/// 3. `config/local.toml` - Local overrides (not committed)
/// 4. Environment variables with `SUNLOG__` prefix
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader for the given directory.
    #[must_use]
    pub fn new(config_dir: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Creates a loader for the default location (`./config`).
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Loads and validates the configuration.
    pub fn load(&self) -> Result<AppConfig, SunlogError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("SUNLOG_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        let default_path = format!("{}/default.toml", self.config_dir);
        if Path::new(&default_path).exists() {
            debug!("Loading default config from: {}", default_path);
            builder = builder.add_source(File::with_name(&default_path).required(false));
        }

        let env_path = format!("{}/{}.toml", self.config_dir, environment);
        if Path::new(&env_path).exists() {
            debug!("Loading environment config from: {}", env_path);
            builder = builder.add_source(File::with_name(&env_path).required(false));
        }

        let local_path = format!("{}/local.toml", self.config_dir);
        if Path::new(&local_path).exists() {
            debug!("Loading local config from: {}", local_path);
            builder = builder.add_source(File::with_name(&local_path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("SUNLOG")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| SunlogError::Configuration(e.to_string()))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| SunlogError::Configuration(e.to_string()))?;

        validate_config(&app_config)?;
        Ok(app_config)
    }
}

/// Validates critical configuration values before startup.
fn validate_config(config: &AppConfig) -> Result<(), SunlogError> {
    let db_url = Url::parse(&config.database.url)
        .map_err(|e| SunlogError::Configuration(format!("Invalid database URL: {}", e)))?;
    if db_url.scheme() != "mysql" {
        return Err(SunlogError::Configuration(format!(
            "Unsupported database scheme '{}', expected 'mysql'",
            db_url.scheme()
        )));
    }

    let lookup_url = Url::parse(&config.lookup.base_url)
        .map_err(|e| SunlogError::Configuration(format!("Invalid lookup base URL: {}", e)))?;
    if !matches!(lookup_url.scheme(), "http" | "https") {
        return Err(SunlogError::Configuration(format!(
            "Unsupported lookup scheme '{}', expected http or https",
            lookup_url.scheme()
        )));
    }

    if config.database.max_connections == 0 {
        return Err(SunlogError::Configuration(
            "database.max_connections must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults_from_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string());
        let config = loader.load().unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_overrides_from_default_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nhost = \"127.0.0.1\"\nport = 9090\ncors_enabled = false\ncors_origins = []\n"
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string());
        let config = loader.load().unwrap();
        assert_eq!(config.server.rest_addr(), "127.0.0.1:9090");
        assert!(!config.server.cors_enabled);
    }

    #[test]
    fn test_invalid_database_url_is_rejected() {
        let mut config = AppConfig::default();
        config.database.url = "postgres://wrong".to_string();
        assert!(validate_config(&config).is_err());

        config.database.url = "not a url".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_lookup_url_is_rejected() {
        let mut config = AppConfig::default();
        config.lookup.base_url = "ftp://api.sunrise-sunset.org".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_pool_size_is_rejected() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(validate_config(&config).is_err());
    }
}
