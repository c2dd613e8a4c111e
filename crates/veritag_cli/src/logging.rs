//! Tracing subscriber setup.

use crate::GlobalArgs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Returns the filter used when `RUST_LOG` is unset.
fn default_directive(global: &GlobalArgs) -> &'static str {
    if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, falling back to the
/// level implied by `--verbose`/`--quiet`.
pub fn init(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(global)));
    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(global.color)
                .with_target(true),
        )
        .with(filter)
        .try_init();
}
