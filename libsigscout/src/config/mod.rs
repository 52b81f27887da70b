//! Application configuration.
//!
//! Configuration is layered: built-in defaults, then an optional YAML file,
//! then `SIGSCOUT_<SECTION>__<KEY>` environment variables. Command line flags
//! are applied on top by the binary.

use crate::error::{Result, ScoutError};
use config::{Config as ConfigRs, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};


const ENV_PREFIX: &str = "SIGSCOUT";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub registry: Registry,
    #[serde(default)]
    pub auth: Auth,
    #[serde(default)]
    pub network: Network,
    #[serde(default)]
    pub output: Output,
}

impl Config {
    /// Parses a `Config` from a YAML string.
    ///
    /// This function is primarily used for testing.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let builder = Self::defaults()?.add_source(File::from_str(s, FileFormat::Yaml));

        Self::from_builder(builder, None)
    }

    /// Loads a `Config` from an optional file path and the process environment.
    ///
    /// A path that is given must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`Config::load`], reading overrides from `vars` instead of the
    /// process environment when it is `Some`.
    pub fn load_with_env(
        path: Option<&Path>,
        vars: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Self::defaults()?;

        if let Some(p) = path {
            builder = builder.add_source(File::from(p).format(FileFormat::Yaml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars),
        );

        Self::from_builder(builder, path)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = ConfigRs::try_from(&Config::default()).map_err(|e| {
            ScoutError::config_with_source("Failed to build default configuration", None, e)
        })?;
        Ok(ConfigRs::builder().add_source(defaults))
    }

    /// Creates a `Config` from a `config::ConfigBuilder`.
    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: Option<&Path>,
    ) -> Result<Self> {
        let path = path.map(|p| p.display().to_string());
        let config: Config = builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| {
                ScoutError::config_with_source(
                    "Failed to deserialize configuration".to_string(),
                    path.clone(),
                    e,
                )
            })?;

        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: Option<String>) -> Result<()> {
        if self.network.timeout == 0 {
            return Err(ScoutError::config(
                "network.timeout must be greater than zero".to_string(),
                path,
            ));
        }
        if self.registry.url.trim().is_empty() || self.auth.url.trim().is_empty() {
            return Err(ScoutError::config(
                "registry.url and auth.url cannot be empty".to_string(),
                path,
            ));
        }
        Ok(())
    }
}

/// Registry API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registry {
    #[serde(default = "default_registry_url")]
    pub url: String,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
        }
    }
}

fn default_registry_url() -> String {
    "https://registry.hub.docker.com".to_string()
}

/// Token service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Auth {
    #[serde(default = "default_auth_url")]
    pub url: String,

    #[serde(default = "default_auth_service")]
    pub service: String,
}

impl Default for Auth {
    fn default() -> Self {
        Self {
            url: default_auth_url(),
            service: default_auth_service(),
        }
    }
}

fn default_auth_url() -> String {
    "https://auth.docker.io/token".to_string()
}

fn default_auth_service() -> String {
    "registry.docker.io".to_string()
}

/// Network settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Network {
    /// Request timeout in seconds
    #[serde(default = "default_network_timeout")]
    pub timeout: u64,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            timeout: default_network_timeout(),
        }
    }
}

fn default_network_timeout() -> u64 {
    30
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Output {
    /// Number of tags shown in the summary log line
    #[serde(default = "default_output_limit")]
    pub limit: usize,

    #[serde(default = "default_output_log_file")]
    pub log_file: PathBuf,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            limit: default_output_limit(),
            log_file: default_output_log_file(),
        }
    }
}

fn default_output_limit() -> usize {
    10
}

fn default_output_log_file() -> PathBuf {
    PathBuf::from("sigscout.log")
}
