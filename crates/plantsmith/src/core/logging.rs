//! Logging infrastructure for diagram processing
//!
//! Structured logging uses the `tracing` crate. Library code only emits spans
//! and events; installing a subscriber is left to binaries and tests through
//! [`init_logging`].
//!
//! # Log Levels
//!
//! - `trace`: per-line parser decisions, skipped lines, individual rewrites
//! - `debug`: per-stage counts (nodes, edges, fixes)
//! - `info`: pipeline milestones
//! - `warn`: degraded output (skeleton fallbacks, renderer failures); the default
//! - `error`: error messages
//!
//! # Log Formats
//!
//! - `compact`: single-line format, good for production
//! - `pretty`: multi-line format with colors, good for development
//! - `json`: JSON format, good for log aggregation systems
//!
//! # Environment Variables
//!
//! - `PLANTSMITH_LOG_LEVEL`: log level or filter directive
//! - `PLANTSMITH_LOG_FORMAT`: log format
//! - `RUST_LOG`: standard `tracing-subscriber` filter, used when the above is unset
//!
//! # Filtering Logs
//!
//! ```bash
//! # Only the repair engine at trace level
//! RUST_LOG="plantsmith::plugins::repair=trace" plantsmith repair -i diagram.puml
//! ```

use std::fmt as std_fmt;
use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

const DEFAULT_LEVEL: &str = "warn";

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event
    #[default]
    Compact,
    /// Multi-line, with source locations and span activity
    Pretty,
    /// Newline-delimited JSON objects
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .zip([LogFormat::Compact, LogFormat::Pretty, LogFormat::Json])
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, format)| format)
            .ok_or_else(|| format!("Unknown log format: {}", s))
    }
}

impl std_fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        let name = match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl LogFormat {
    /// Names accepted by [`FromStr`]
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Level or filter directive: argument, then `PLANTSMITH_LOG_LEVEL`, then
/// `RUST_LOG`, then `warn`
fn resolve_filter(level: Option<&str>) -> EnvFilter {
    let directive = level
        .map(str::to_string)
        .or_else(|| std::env::var("PLANTSMITH_LOG_LEVEL").ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Format name: argument, then `PLANTSMITH_LOG_FORMAT`, then `compact`
fn resolve_format(format: Option<&str>) -> Result<LogFormat, String> {
    match format
        .map(str::to_string)
        .or_else(|| std::env::var("PLANTSMITH_LOG_FORMAT").ok())
    {
        Some(name) => LogFormat::from_str(&name).map_err(|e| format!("Invalid log format: {}", e)),
        None => Ok(LogFormat::default()),
    }
}

/// Install the global tracing subscriber
///
/// * `level` - log level or filter directive (`debug`,
///   `plantsmith::plugins::repair=trace`, `off`)
/// * `format` - `compact`, `pretty` or `json`
///
/// Unset arguments fall back to the environment variables listed in the
/// module docs. Events are always written to stderr so diagram text on
/// stdout stays clean.
///
/// Returns an error for an unknown format or when a global subscriber is
/// already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = resolve_filter(level);
    let format = resolve_format(format)?;

    // Exactly one of these is Some; a None layer is a no-op
    let compact = (format == LogFormat::Compact).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_span_events(FmtSpan::NONE)
            .compact()
    });
    let pretty = (format == LogFormat::Pretty).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::ACTIVE)
            .pretty()
    });
    let json = (format == LogFormat::Json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::ACTIVE)
            .json()
    });

    Registry::default()
        .with(filter)
        .with(compact)
        .with(pretty)
        .with(json)
        .try_init()?;

    Ok(())
}

/// [`init_logging`] with every setting taken from the environment
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("invalid").is_err());
    }

    #[test]
    fn test_display_round_trips_through_variants() {
        for name in LogFormat::variants() {
            assert_eq!(LogFormat::from_str(name).unwrap().to_string(), *name);
        }
    }

    #[test]
    fn test_explicit_format_wins() {
        assert_eq!(resolve_format(Some("pretty")), Ok(LogFormat::Pretty));
        assert!(resolve_format(Some("xml")).is_err());
    }

    #[test]
    fn test_bad_directive_falls_back() {
        assert_eq!(resolve_filter(Some("plantsmith=loud")).to_string(), "warn");
        assert_eq!(resolve_filter(Some("off")).to_string(), "off");
    }
}
