//! Diagnostics for the questionnaire runner.
//!
//! Reads `RUST_LOG` (default `warn`) and writes compact events to stderr so
//! the answers printed on stdout stay machine-readable.
//!
//! ```bash
//! RUST_LOG=questionnaire=debug questionnaire run --script answers.json
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
