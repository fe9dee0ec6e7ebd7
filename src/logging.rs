use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `WORKLOG_LOG=worklog=debug`.
pub const LOG_ENV: &str = "WORKLOG_LOG";

/// Initialize the tracing subscriber, writing to stderr.
///
/// `WORKLOG_LOG` wins when set and valid; otherwise `--verbose` selects
/// `debug`, `--quiet` selects `error`, and the default is `warn`.
/// Safe to call more than once.
pub fn init(verbose: bool, quiet: bool) {
    INIT.call_once(|| {
        let fallback = if verbose {
            "worklog=debug"
        } else if quiet {
            "worklog=error"
        } else {
            "worklog=warn"
        };
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    });
}
