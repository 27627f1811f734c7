use crate::config::ConfigError;
use crate::competition::{EventTableError, HeptathlonError};
use crate::telemetry::TelemetryError;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    EventTable(EventTableError),
    Heptathlon(HeptathlonError),
    Output(OutputError),
}

impl AppError {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::FileAccess { path, source } => {
                write!(f, "could not read {}: {}", path.display(), source)
            }
            AppError::EventTable(err) => write!(f, "event table error: {}", err),
            AppError::Heptathlon(err) => write!(f, "results error: {}", err),
            AppError::Output(err) => write!(f, "output error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::FileAccess { source, .. } => Some(source),
            AppError::EventTable(err) => Some(err),
            AppError::Heptathlon(err) => Some(err),
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

impl From<EventTableError> for AppError {
    fn from(value: EventTableError) -> Self {
        Self::EventTable(value)
    }
}

impl From<HeptathlonError> for AppError {
    fn from(value: HeptathlonError) -> Self {
        Self::Heptathlon(value)
    }
}

impl From<OutputError> for AppError {
    fn from(value: OutputError) -> Self {
        Self::Output(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(OutputError::Json(value))
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Output(OutputError::Csv(value))
    }
}

/// Failures while writing the rendered summary.
#[derive(Debug)]
pub enum OutputError {
    Json(serde_json::Error),
    Csv(csv::Error),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Json(err) => write!(f, "failed to encode summary as JSON: {}", err),
            OutputError::Csv(err) => write!(f, "failed to encode summary as CSV: {}", err),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Json(err) => Some(err),
            OutputError::Csv(err) => Some(err),
        }
    }
}
