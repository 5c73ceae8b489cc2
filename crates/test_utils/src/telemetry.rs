//! Tracing initialisation for tests
//!
//! Tests run in one process, so the global subscriber can only be installed
//! once; `Lazy` guards the initialisation across test threads.

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init()
        .ok();
});

/// Installs the test tracing subscriber (idempotent)
///
/// Call at the top of a test that should emit `tracing` output; set
/// `RUST_LOG` to raise the level.
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
