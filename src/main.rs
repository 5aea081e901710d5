//! Price list analyzer — binary entrypoint.
//! Loads `*price*` files from the configured directory (cwd by default), writes
//! `output.html`, then runs the console search on stdin/stdout.

use anyhow::Result;
use price_list_analyzer::{run, telemetry, AnalyzerConfig};

fn main() -> Result<()> {
    // Load .env when present; no-op otherwise.
    let _ = dotenvy::dotenv();

    telemetry::init_tracing();

    let cfg = AnalyzerConfig::load_default()?;
    tracing::debug!(?cfg, "effective config");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(&cfg, stdin.lock(), stdout.lock())?;
    Ok(())
}
