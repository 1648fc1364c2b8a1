use crate::workflows::counselling::{Category, QuotaPlan, WAITING_LIST_SIZE};
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub allocation: AllocationConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("COUNSELLING_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let waiting_list_size = match env::var("COUNSELLING_WAITING_LIST_SIZE") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidWaitingListSize)?,
            Err(_) => WAITING_LIST_SIZE,
        };

        let quota_fractions = match env::var("COUNSELLING_QUOTAS") {
            Ok(raw) => parse_quota_fractions(&raw)?,
            Err(_) => QuotaPlan::default_fractions(),
        };

        let log_level = env::var("COUNSELLING_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            allocation: AllocationConfig {
                waiting_list_size,
                quota_fractions,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// First-round quota split and waiting-list length.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationConfig {
    pub waiting_list_size: usize,
    pub quota_fractions: Vec<(Category, f64)>,
}

impl AllocationConfig {
    pub fn first_round_plan(&self, total_seats: i64) -> QuotaPlan {
        QuotaPlan::percentage(total_seats, self.quota_fractions.clone())
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Parse `UR=0.4,OBC=0.3,...`. Fractions must fall within (0, 1]; they are not normalized.
pub fn parse_quota_fractions(raw: &str) -> Result<Vec<(Category, f64)>, ConfigError> {
    let mut fractions = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let invalid = || ConfigError::InvalidQuota {
            entry: entry.to_string(),
        };
        let (code, value) = entry.split_once('=').ok_or_else(invalid)?;
        if code.trim().is_empty() {
            return Err(invalid());
        }
        let fraction = value.trim().parse::<f64>().map_err(|_| invalid())?;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(invalid());
        }
        fractions.push((Category::parse(code), fraction));
    }

    if fractions.is_empty() {
        return Err(ConfigError::InvalidQuota {
            entry: raw.to_string(),
        });
    }

    Ok(fractions)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidWaitingListSize,
    InvalidQuota { entry: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWaitingListSize => {
                write!(f, "COUNSELLING_WAITING_LIST_SIZE must be a non-negative integer")
            }
            ConfigError::InvalidQuota { entry } => write!(
                f,
                "COUNSELLING_QUOTAS entry '{}' must look like CATEGORY=FRACTION with a fraction in (0, 1]",
                entry
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
