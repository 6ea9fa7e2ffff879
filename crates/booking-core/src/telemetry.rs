//! Logging initialisation.
//!
//! Installs a `tracing` subscriber with an env filter and either a pretty or
//! a JSON formatter. Only compiled with the `telemetry` feature so library
//! crates do not pull in the subscriber.

#[cfg(feature = "telemetry")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor a configured level is present.
pub const DEFAULT_FILTER: &str = "info,booking=debug,tower_http=debug";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Parses a configured format name, defaulting to pretty output.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Builds the filter directive from a configured level.
///
/// A bare level such as `warn` keeps the gateway's own crates at that level
/// too; anything containing `=` or `,` is taken as a full directive.
#[must_use]
pub fn filter_directive(level: Option<&str>) -> String {
    match level.map(str::trim) {
        None | Some("") => DEFAULT_FILTER.to_string(),
        Some(level) if level.contains('=') || level.contains(',') => level.to_string(),
        Some(level) => format!("{level},booking={level}"),
    }
}

/// Initializes the global subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
#[cfg(feature = "telemetry")]
pub fn init_logging(level: Option<&str>, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
    };

    if let Err(e) = result {
        tracing::warn!("Logging already initialized: {}", e);
    }
}

/// Placeholder for when the telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_logging(_level: Option<&str>, _format: LogFormat) {}
