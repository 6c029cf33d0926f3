use crate::config::{AppConfig, AppEnvironment, LogFormat, TelemetryConfig};
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { directive: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { directive, .. } => {
                write!(f, "invalid log filter '{directive}'")
            }
            TelemetryError::Subscriber(err) => write!(f, "failed to install log subscriber: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Filter used when neither `RUST_LOG` nor `APP_LOG_LEVEL` is set. Test runs
/// stay quiet; development shows the catalog's own debug events.
pub const fn default_directive(environment: AppEnvironment) -> &'static str {
    match environment {
        AppEnvironment::Development => "warn,date_night=debug,date_night_cli=debug",
        AppEnvironment::Test => "warn",
        AppEnvironment::Production => "info",
    }
}

/// `RUST_LOG` wins, then the configured level, then the environment default.
pub fn resolve_directive(
    environment: AppEnvironment,
    telemetry: &TelemetryConfig,
    rust_log: Option<String>,
) -> String {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .or_else(|| telemetry.log_level.clone())
        .unwrap_or_else(|| default_directive(environment).to_string())
}

pub fn build_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|source| TelemetryError::InvalidFilter {
        directive: directive.to_string(),
        source,
    })
}

/// Installs the global subscriber on stderr so command output stays pipeable.
pub fn init(config: &AppConfig) -> Result<(), TelemetryError> {
    let directive = resolve_directive(
        config.environment,
        &config.telemetry,
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    let filter = build_filter(&directive)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.telemetry.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().with_target(false).with_ansi(false).try_init(),
        LogFormat::Json => builder.json().with_ansi(false).try_init(),
    }
    .map_err(TelemetryError::Subscriber)
}
