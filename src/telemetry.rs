// src/telemetry.rs
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when RUST_LOG is not set. Quiet by default so the console
/// search output is not interleaved with logs.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a compact stderr subscriber. Safe to call more than once.
pub fn init_tracing() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // another subscriber may already be installed (tests, embedding apps)
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init();
    });
}
