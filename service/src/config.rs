//! Service configuration.
//!
//! Sources are merged lowest to highest:
//!
//! 1. [`Config::default`]
//! 2. the YAML file named on the command line (`config.yaml` if not given)
//! 3. the bare `PORT` and `DATABASE_URL` variables older deployments set
//! 4. `MEMBERS_`-prefixed variables, nested with `__`
//!    (`MEMBERS_STORAGE__BACKEND=postgres`)

use std::fmt;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_vec_from_string_or_vec;

/// YAML file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Prefix for structured environment overrides.
const ENV_PREFIX: &str = "MEMBERS_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

/// Which member store backs the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map, lost on restart.
    Memory,
    /// `members` table in `PostgreSQL`.
    Postgres,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Unset means "postgres if a database URL is configured".
    pub backend: Option<StorageBackend>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string.
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// A level (`debug`, `info`, ...) or any `EnvFilter` directive.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// `"*"` allows every origin; an empty list allows none. YAML may give a
    /// list, the environment a comma-separated string.
    #[serde(deserialize_with = "origin_list")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".into()],
        }
    }
}

fn origin_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = deserialize_vec_from_string_or_vec(deserializer)?;
    Ok(raw
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect())
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SwaggerConfig {
    /// Serve `/swagger-ui` and `/api-docs/openapi.json`.
    pub enabled: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load from [`DEFAULT_CONFIG_FILE`] and the environment.
    ///
    /// # Errors
    /// Returns an error if a source cannot be parsed or the result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from `yaml_path` and the environment. A missing file is skipped.
    ///
    /// # Errors
    /// Returns an error if a source cannot be parsed or the result is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(yaml_path).extract()?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn figment(yaml_path: &str) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL"])
                    .map(|_| "database.url".into()),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// The store to run: `storage.backend` if set, else postgres when a
    /// database URL is configured, else memory.
    #[must_use]
    pub fn storage_backend(&self) -> StorageBackend {
        match self.storage.backend {
            Some(backend) => backend,
            None if self.database.url.is_empty() => StorageBackend::Memory,
            None => StorageBackend::Postgres,
        }
    }

    /// # Errors
    /// Returns [`ConfigError::Validation`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Validation(msg));

        if self.server.port == 0 {
            return invalid("server.port must be between 1 and 65535".into());
        }
        if self.database.max_connections == 0 {
            return invalid("database.max_connections must be at least 1".into());
        }
        if self.storage_backend() == StorageBackend::Postgres && self.database.url.is_empty() {
            return invalid(
                "database.url is required for the postgres backend (DATABASE_URL or MEMBERS_DATABASE__URL)"
                    .into(),
            );
        }
        if let Some(origin) = self
            .cors
            .allowed_origins
            .iter()
            .find(|o| *o != "*" && !o.starts_with("http://") && !o.starts_with("https://"))
        {
            return invalid(format!(
                "cors.allowed_origins: '{origin}' is neither '*' nor an http(s) origin"
            ));
        }

        Ok(())
    }
}
