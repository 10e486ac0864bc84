//! Logging configuration
//!
//! Diagnostics go to stderr so stdout carries only command output (human
//! or NDJSON). `RUST_LOG` wins over the `-v` count when set.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level selected by the number of `-v` flags
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Filter used when `RUST_LOG` is unset; other crates stay at `warn`
pub fn default_filter(verbose: u8) -> String {
    let level = level_for_verbosity(verbose).as_str().to_lowercase();
    format!("warn,cutover={level}")
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_logging(verbose: u8, ansi: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(ansi),
        )
        .try_init();
}
