use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Setting a log filter directive was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOrigin {
    RustLog,
    LogLevel,
}

impl FilterOrigin {
    pub fn setting(self) -> &'static str {
        match self {
            FilterOrigin::RustLog => EnvFilter::DEFAULT_ENV,
            FilterOrigin::LogLevel => "COUNSELLING_LOG_LEVEL",
        }
    }
}

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter {
        origin: FilterOrigin,
        directive: String,
        source: ParseError,
    },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter {
                origin, directive, ..
            } => write!(
                f,
                "{} value '{}' is not a valid log filter",
                origin.setting(),
                directive
            ),
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

/// Install the global subscriber. Logs go to stderr so reports written to stdout stay clean.
///
/// A non-blank `RUST_LOG` takes precedence over `COUNSELLING_LOG_LEVEL`.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (origin, filter) = select_filter(rust_log.as_deref(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)?;

    tracing::debug!(setting = origin.setting(), "log filter installed");
    Ok(())
}

fn select_filter(
    rust_log: Option<&str>,
    log_level: &str,
) -> Result<(FilterOrigin, EnvFilter), TelemetryError> {
    let (origin, directive) = match rust_log.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => (FilterOrigin::RustLog, value),
        None => (FilterOrigin::LogLevel, log_level.trim()),
    };

    let filter = EnvFilter::try_new(directive).map_err(|source| TelemetryError::InvalidFilter {
        origin,
        directive: directive.to_string(),
        source,
    })?;
    Ok((origin, filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_takes_precedence_over_configured_level() {
        let (origin, _) = select_filter(Some("counselling=debug"), "info").expect("valid filter");
        assert_eq!(origin, FilterOrigin::RustLog);

        let (origin, _) = select_filter(Some("  "), "warn").expect("valid filter");
        assert_eq!(origin, FilterOrigin::LogLevel);
    }

    #[test]
    fn invalid_filter_names_the_setting_it_came_from() {
        let error = select_filter(None, "counselling=notalevel").expect_err("invalid level");
        assert_eq!(
            error.to_string(),
            "COUNSELLING_LOG_LEVEL value 'counselling=notalevel' is not a valid log filter"
        );

        let error = select_filter(Some("counselling=loud"), "info").expect_err("invalid RUST_LOG");
        match error {
            TelemetryError::InvalidFilter { origin, directive, .. } => {
                assert_eq!(origin, FilterOrigin::RustLog);
                assert_eq!(directive, "counselling=loud");
            }
            other => panic!("expected filter error, got {other:?}"),
        }
    }
}
