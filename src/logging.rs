use std::io::Stderr;
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `module=log_level`.
/// Logs go to stderr so stdout carries only the report.
pub fn setup(module: &str, log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{module}={log_level}")));

    // A subscriber may already be installed (tests, embedding applications)
    let _ = get_subscriber(filter).try_init();
}

pub fn get_subscriber(filter: EnvFilter) -> SubscriberBuilder<DefaultFields, Format, EnvFilter, fn() -> Stderr> {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr as fn() -> Stderr)
        .with_target(true)
        .with_line_number(true)
}

/// Level for the CLI's `--verbose` / `--debug` flags.
pub fn level_for(verbose: bool, debug: bool) -> &'static str {
    if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    }
}
