//! Tracing subscriber setup for the command-line front-end

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
///
/// `RUST_LOG` wins when set; otherwise warnings and errors are shown, or
/// everything down to debug with `verbose`. Calling this twice is harmless.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lightmoji={level}")));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    // Already installed (e.g. several CLI runs in one test process)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
