use std::io::IsTerminal;
use tracing::Level;

use crate::CliArgs;

/// Default tracing filter expression for INFO level logging.
const DEFAULT_TRACING_FILTER: &str = "info";

/// Initialize tracing/logging based on the contents of the parsed CLI args.
///
/// # Verbosity levels
///
/// - `0`: WARN and ERROR only, simple format with color (silent on happy path)
/// - `1`: INFO level, structured format with timestamp/target
/// - `2`: DEBUG level, structured format
/// - `3+`: TRACE level, structured format
///
/// # Environment variable support
///
/// Log filtering can be controlled via environment variables in priority order:
/// 1. `HARVEST_LOG` - harvest-specific log filter (checked first)
/// 2. `RUST_LOG` - standard Rust log filter (fallback)
/// 3. Hard-coded defaults based on verbosity level (if neither env var is set)
///
/// # Panics
///
/// This function will panic if called more than once in the same process, as the
/// global tracing subscriber can only be initialized once.
pub(crate) fn init(args: &CliArgs) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let (level, use_simple_format) = match args.verbose {
        0 => (Level::WARN, true),
        1 => (Level::INFO, false),
        2 => (Level::DEBUG, false),
        _ => (Level::TRACE, false),
    };

    // Try environment variables in priority order: HARVEST_LOG > RUST_LOG > hard-coded default
    let filter = EnvFilter::try_from_env("HARVEST_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| {
            if args.verbose == 0 {
                // For silent mode, only show WARN and ERROR
                EnvFilter::new("warn")
            } else {
                EnvFilter::new(format!("{},{}", DEFAULT_TRACING_FILTER, level))
            }
        });

    // Check if we're outputting to a TTY for color support
    let use_ansi = std::io::stderr().is_terminal();

    if use_simple_format {
        // Simple format for default (non-verbose) mode: just the message, with color if TTY.
        // Warnings about unreadable or uncopyable files should not look "loggy".
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_ansi(use_ansi)
                    .without_time(),
            )
            .init();
    } else {
        // Structured format for verbose modes: timestamp, target, level, message
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(use_ansi),
            )
            .init();
    }
}

/// Initialize tracing for tests with sensible defaults.
///
/// Uses [`std::sync::OnceLock`] so logging is initialized only once per test process,
/// and the test writer so output is captured with the owning test.
///
/// Defaults to DEBUG level; override with `HARVEST_LOG` or `RUST_LOG` (`HARVEST_LOG`
/// takes priority).
#[cfg(test)]
pub(crate) fn init_test_logging() {
    use std::sync::OnceLock;
    use tracing_subscriber::{EnvFilter, fmt};

    static INIT: OnceLock<()> = OnceLock::new();

    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env("HARVEST_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("debug"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_level(true)
            .init();
    });
}
