use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::counselling::{AllocationError, AllocationTaskError, ReportError};
use crate::workflows::roster::RosterImportError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Roster(RosterImportError),
    Allocation(AllocationError),
    Task(AllocationTaskError),
    Report(ReportError),
    Input(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Roster(err) => write!(f, "roster error: {}", err),
            AppError::Allocation(err) => write!(f, "check your inputs: {}", err),
            AppError::Task(err) => write!(f, "allocation error: {}", err),
            AppError::Report(err) => write!(f, "report error: {}", err),
            AppError::Input(message) => write!(f, "check your inputs: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Roster(err) => Some(err),
            AppError::Allocation(err) => Some(err),
            AppError::Task(err) => Some(err),
            AppError::Report(err) => Some(err),
            AppError::Input(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RosterImportError> for AppError {
    fn from(value: RosterImportError) -> Self {
        Self::Roster(value)
    }
}

impl From<AllocationError> for AppError {
    fn from(value: AllocationError) -> Self {
        Self::Allocation(value)
    }
}

impl From<AllocationTaskError> for AppError {
    fn from(value: AllocationTaskError) -> Self {
        match value {
            AllocationTaskError::Rejected(err) => Self::Allocation(err),
            other => Self::Task(other),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        Self::Report(value)
    }
}
