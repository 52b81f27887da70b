use clap::Parser;
use libsigscout::{Scout, TracingReporter};
use std::path::PathBuf;
use std::process::ExitCode;

mod context;
mod logging;

use context::{AppContext, Overrides, VerbosityLevel};
use logging::RunLogger;

/// sigscout - Registry Tag Signature Scanner
///
/// Lists the tags of a repository, fetches the manifest of every tag and
/// reports which images have a cosign signature tag.
#[derive(Parser, Debug)]
#[command(name = "sigscout")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Repository name, e.g. "library/ubuntu" or "yossireuven/repo-info"
    #[arg(short, long)]
    repository: String,

    /// Number of tags shown in the tag summary [default: 10]
    #[arg(short, long)]
    limit: Option<usize>,

    /// Configuration file (YAML)
    #[arg(short, long, env = "SIGSCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Log file, appended to on every run [default: sigscout.log]
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            config_path: self.config.clone(),
            limit: self.limit,
            log_file: self.log_file.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Build context with precedence: defaults > config file > env vars > CLI flags
    let ctx = match AppContext::build(
        cli.repository.clone(),
        cli.overrides(),
        VerbosityLevel::from_flags(cli.verbose, cli.quiet),
    ) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("✗ {}", e.detailed());
            return ExitCode::FAILURE;
        }
    };

    let logger = match RunLogger::open(ctx.log_file(), ctx.verbosity) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!(
                "✗ Could not open log file {}: {}",
                ctx.log_file().display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };

    logger.in_scope(|| run(&ctx))
}

/// Scans the repository. Fatal errors have already been reported when this
/// returns failure.
fn run(ctx: &AppContext) -> ExitCode {
    let scout = match Scout::from_config(&ctx.config) {
        Ok(scout) => scout,
        Err(e) => {
            tracing::error!("{}", e.detailed());
            return ExitCode::FAILURE;
        }
    };

    match scout.scan(&ctx.repository, &TracingReporter) {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
