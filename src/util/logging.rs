//! Structured logging setup for aboutgen
//!
//! Logs always go to stderr so stdout carries only command output.
//!
//! # Environment Variables
//!
//! - `ABOUTGEN_LOG_LEVEL`: level used when no CLI flag is given
//! - `ABOUTGEN_LOG_JSON`: `true` for JSON lines instead of console output
//! - `RUST_LOG`: standard filtering; when set, the default noise filters are skipped
//!
//! # Example
//!
//! ```no_run
//! use aboutgen::util::{init_logging, LoggingConfig};
//! use tracing::Level;
//!
//! init_logging(LoggingConfig::with_level(Level::DEBUG));
//! tracing::debug!(repo = "acme/widget", "Fetching repository");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Dependencies whose chatter is held at `warn` unless `RUST_LOG` says otherwise
const QUIET_TARGETS: [&str; 3] = ["h2", "hyper", "reqwest"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for aboutgen's own targets
    pub level: Level,

    /// Emit JSON lines
    pub use_json: bool,

    /// Include the module target in each line
    pub include_target: bool,

    /// Include file and line number
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Level from the CLI flags, JSON switch from `ABOUTGEN_LOG_JSON`
    pub fn from_args(log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        let use_json = env::var("ABOUTGEN_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level: resolve_level(log_level, verbose, quiet),
            use_json,
            include_location: use_json,
            ..Default::default()
        }
    }
}

/// Picks the effective level: explicit flag, then `-v`/`-q`, then `ABOUTGEN_LOG_LEVEL`
pub fn resolve_level(log_level: Option<&str>, verbose: bool, quiet: bool) -> Level {
    if let Some(level) = log_level {
        parse_level(level)
    } else if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        parse_level(&env::var("ABOUTGEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()))
    }
}

/// Parses a log level case-insensitively, falling back to `INFO`
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();

    let mut directives = vec![format!("aboutgen={}", level)];
    if env::var("RUST_LOG").is_err() {
        directives.extend(QUIET_TARGETS.iter().map(|target| format!("{}=warn", target)));
    }

    for directive in directives {
        if let Ok(parsed) = directive.parse() {
            filter = filter.add_directive(parsed);
        }
    }
    filter
}

/// Installs the global subscriber; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}
