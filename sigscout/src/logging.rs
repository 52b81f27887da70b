//! Log output for a run.
//!
//! Events go to the console (stderr) and are appended to a log file. The
//! subscriber is only active inside [`RunLogger::in_scope`], so nothing is
//! installed process-wide.

use crate::context::VerbosityLevel;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::Dispatch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Console and file logging for the duration of one run
pub struct RunLogger {
    dispatch: Dispatch,
}

impl RunLogger {
    /// Opens (or creates) the log file in append mode and builds the subscriber.
    ///
    /// `RUST_LOG` replaces the filter derived from `verbosity` when set.
    pub fn open(log_file: &Path, verbosity: VerbosityLevel) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(log_file)?;
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

        Ok(Self::with_writers(filter, io::stderr, file))
    }

    fn with_writers<C>(filter: EnvFilter, console: C, file: File) -> Self
    where
        C: for<'a> fmt::MakeWriter<'a> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(console).with_target(false))
            .with(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            );

        Self {
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// Runs `f` with this logger as the active subscriber.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

/// Our crates log at the chosen level, dependencies only warn.
pub fn filter_directive(verbosity: VerbosityLevel) -> String {
    let level = verbosity.level_filter();
    format!("warn,sigscout={level},libsigscout={level}")
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
