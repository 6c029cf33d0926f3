use crate::catalog::export::ExportError;
use crate::catalog::{CatalogImportError, FeaturedError};
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    UnknownRestaurant { slug: String },
    Import(CatalogImportError),
    Featured(FeaturedError),
    Export(ExportError),
    Output(serde_json::Error),
}

impl AppError {
    /// Process exit code for the CLI. Bad input data is distinguished from
    /// environment problems.
    pub const fn exit_code(&self) -> i32 {
        match self {
            AppError::Import(_) | AppError::Featured(_) | AppError::UnknownRestaurant { .. } => 2,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Export(_)
            | AppError::Output(_) => 1,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::UnknownRestaurant { slug } => write!(f, "no restaurant with slug '{slug}'"),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Featured(err) => write!(f, "featured error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::Output(err) => write!(f, "output error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::UnknownRestaurant { .. } => None,
            AppError::Import(err) => Some(err),
            AppError::Featured(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::Output(err) => Some(err),
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

impl From<CatalogImportError> for AppError {
    fn from(value: CatalogImportError) -> Self {
        Self::Import(value)
    }
}

impl From<FeaturedError> for AppError {
    fn from(value: FeaturedError) -> Self {
        Self::Featured(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}
