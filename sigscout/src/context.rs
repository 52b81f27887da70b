//! Application context that holds resolved configuration
//!
//! The context is built following the precedence order:
//! 1. Default values
//! 2. Config file values
//! 3. Environment variables (`SIGSCOUT_<SECTION>__<KEY>`)
//! 4. CLI flags
//!
//! Once built, the context is passed as read-only throughout the application.

use libsigscout::{Config, Result};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

/// How much is logged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Errors only (-q)
    Quiet,
    /// Informational output (default)
    Normal,
    /// Debug output (-v)
    Verbose,
    /// Everything (-vv and more)
    Trace,
}

impl VerbosityLevel {
    /// Maps the -v count and the -q flag to a level. -q wins.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Trace,
        }
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::INFO,
            Self::Verbose => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

/// Settings given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub limit: Option<usize>,
    pub log_file: Option<PathBuf>,
}

/// Application context with resolved configuration and runtime state
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Repository to scan
    pub repository: String,
    /// Resolved configuration
    pub config: Config,
    pub verbosity: VerbosityLevel,
}

impl AppContext {
    /// Build context with precedence: defaults > config file > env vars > CLI flags
    pub fn build(
        repository: String,
        overrides: Overrides,
        verbosity: VerbosityLevel,
    ) -> Result<Self> {
        // An explicit path must exist; the default one is optional
        let path = overrides
            .config_path
            .clone()
            .or_else(|| get_config_path().filter(|p| p.exists()));

        let config = Config::load(path.as_deref())?;
        Ok(Self::with_config(repository, config, overrides, verbosity))
    }

    /// Applies CLI flags on top of an already layered configuration.
    pub fn with_config(
        repository: String,
        mut config: Config,
        overrides: Overrides,
        verbosity: VerbosityLevel,
    ) -> Self {
        if let Some(limit) = overrides.limit {
            config.output.limit = limit;
        }
        if let Some(log_file) = overrides.log_file {
            config.output.log_file = log_file;
        }

        Self {
            repository,
            config,
            verbosity,
        }
    }

    pub fn log_file(&self) -> &Path {
        &self.config.output.log_file
    }
}

/// Default configuration file location (`<config dir>/sigscout/config.yaml`)
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sigscout").join("config.yaml"))
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
