//! # Configuration
//!
//! Layered settings: built-in defaults, then an optional TOML file, then
//! `ALGOCAT_*` environment variables. CLI flags are applied last by the caller.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [catalog]
//! path = "data/catalog.json"
//!
//! [security]
//! rate_limit = 100          # requests/second, 0 disables
//! cors_origins = "*"        # or a comma-separated list
//! api_key = "secret"
//! ```

use algocat_core::CatalogError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "algocat.toml";

pub const ENV_CATALOG: &str = "ALGOCAT_CATALOG";
pub const ENV_RATE_LIMIT: &str = "ALGOCAT_RATE_LIMIT";
pub const ENV_CORS_ORIGINS: &str = "ALGOCAT_CORS_ORIGINS";
pub const ENV_API_KEY: &str = "ALGOCAT_API_KEY";

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/catalog.json"),
        }
    }
}

/// HTTP hardening options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecurityConfig {
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
    /// `*` for any origin, a comma-separated list, or `None` for localhost only.
    pub cors_origins: Option<String>,
    /// Bearer token required on every route except `/health`.
    pub api_key: Option<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            rate_limit: 100,
            cors_origins: None,
            api_key: None,
        }
    }
}

impl SecurityConfig {
    /// The API key, if one is set and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

impl Config {
    /// Read the config file.
    ///
    /// An explicit path must exist. Without one, `algocat.toml` in the working
    /// directory is used if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let metadata = std::fs::metadata(path)
            .map_err(|e| CatalogError::Config(format!("{}: {}", path.display(), e)))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(CatalogError::Config(format!(
                "{}: file size {} bytes exceeds maximum {} bytes",
                path.display(),
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        toml::from_str(text).map_err(|e| CatalogError::Config(e.to_string()))
    }

    /// Apply `ALGOCAT_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any variable source. Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_CATALOG).filter(|p| !p.is_empty()) {
            self.catalog.path = PathBuf::from(path);
        }
        if let Some(rate) = lookup(ENV_RATE_LIMIT) {
            match rate.trim().parse() {
                Ok(rate) => self.security.rate_limit = rate,
                Err(_) => tracing::warn!("Ignoring invalid {}: {:?}", ENV_RATE_LIMIT, rate),
            }
        }
        if let Some(origins) = lookup(ENV_CORS_ORIGINS) {
            self.security.cors_origins = Some(origins);
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.security.api_key = Some(key);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").expect("parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.security.rate_limit, 100);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [server]
            port = 9000

            [security]
            api_key = "secret"
            "#,
        )
        .expect("parse");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.security.api_key(), Some("secret"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = Config::from_toml_str("[server]\nthreads = 4\n");
        assert!(matches!(result, Err(CatalogError::Config(_))));
    }

    #[test]
    fn environment_overrides_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_CATALOG, "/srv/catalog.json"),
            (ENV_RATE_LIMIT, "0"),
            (ENV_API_KEY, ""),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|name| env.get(name).map(|v| (*v).to_string()));

        assert_eq!(config.catalog.path, PathBuf::from("/srv/catalog.json"));
        assert_eq!(config.security.rate_limit, 0);
        assert_eq!(config.security.api_key(), None);
        assert_eq!(config.security.cors_origins, None);
    }

    #[test]
    fn bad_rate_limit_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|name| (name == ENV_RATE_LIMIT).then(|| "fast".to_string()));
        assert_eq!(config.security.rate_limit, 100);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/algocat.toml")));
        assert!(matches!(result, Err(CatalogError::Config(_))));
    }
}
