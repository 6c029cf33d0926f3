use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "data/la_date_night_restaurants.json";
pub const DEFAULT_CITY: &str = "Los Angeles";

/// Distinguishes runtime behavior for different stages of the directory build.
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
    pub data: DataConfig,
    pub catalog: CatalogConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let restaurants_path = env::var("DATE_NIGHT_DATA")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let featured_path = env::var("DATE_NIGHT_FEATURED")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let city = env::var("DATE_NIGHT_CITY")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CITY.to_string());
        let random_seed = match env::var("DATE_NIGHT_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed { value: raw })?,
            ),
            _ => None,
        };

        let log_level = env::var("APP_LOG_LEVEL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) if !raw.trim().is_empty() => {
                LogFormat::from_str(&raw).ok_or(ConfigError::InvalidLogFormat { value: raw })?
            }
            _ => LogFormat::for_environment(environment),
        };

        Ok(Self {
            environment,
            data: DataConfig {
                restaurants_path,
                featured_path,
            },
            catalog: CatalogConfig { city, random_seed },
            telemetry: TelemetryConfig { log_level, format },
        })
    }
}

/// Locations of the flat data files.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub restaurants_path: PathBuf,
    pub featured_path: Option<PathBuf>,
}

/// Settings applied while deriving and sampling the catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub city: String,
    pub random_seed: Option<u64>,
}

/// Tracing controls. Without an explicit level the environment picks one.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: Option<String>,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub const fn for_environment(environment: AppEnvironment) -> Self {
        match environment {
            AppEnvironment::Development => Self::Pretty,
            AppEnvironment::Test => Self::Compact,
            AppEnvironment::Production => Self::Json,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSeed { value: String },
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSeed { value } => {
                write!(f, "DATE_NIGHT_SEED must be a valid u64 (got '{value}')")
            }
            ConfigError::InvalidLogFormat { value } => {
                write!(
                    f,
                    "APP_LOG_FORMAT must be compact, pretty or json (got '{value}')"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
