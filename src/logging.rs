//! Tracing subscriber setup.
//!
//! Logs go to stderr so tables and JSON on stdout stay pipeable.
//! `RUST_LOG` wins when set; otherwise `--verbose` switches from info to debug.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Install the global subscriber. Only the first call has an effect.
pub fn init(verbose: bool) {
    INIT.get_or_init(|| {
        let default = if verbose { "admit_rank=debug" } else { "admit_rank=info" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        // A subscriber may already be installed by an embedding application.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
