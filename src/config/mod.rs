use crate::competition::events::{EventTable, EventTableError};
use crate::competition::report::DEFAULT_COLUMN_WIDTH;
use crate::competition::FieldSeparator;
use std::env;
use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;

pub const DEFAULT_INPUT_PATH: &str = "heptathlon.csv";

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input: InputConfig,
    pub report: ReportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Reads the environment (and `.env`), letting any set override win.
    ///
    /// Environment values shadowed by an override are never parsed, so a
    /// bad variable does not block a valid command line flag.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let path = match &overrides.input {
            Some(path) => path.clone(),
            None => env::var("HEPTATHLON_INPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_INPUT_PATH)),
        };

        let separator = match (overrides.separator, env::var("HEPTATHLON_SEPARATOR")) {
            (Some(separator), _) => separator,
            (None, Ok(value)) => parse_separator(&value)?,
            (None, Err(_)) => FieldSeparator::default(),
        };

        let events_path = match &overrides.events_path {
            Some(path) => Some(path.clone()),
            None => env::var("HEPTATHLON_EVENTS")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
        };

        let column_width = match (overrides.column_width, env::var("HEPTATHLON_COLUMN_WIDTH")) {
            (Some(width), _) => width,
            (None, Ok(value)) => parse_column_width(&value)?,
            (None, Err(_)) => DEFAULT_COLUMN_WIDTH,
        };

        let log_level = env::var("HEPTATHLON_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            input: InputConfig {
                path,
                separator,
                events_path,
            },
            report: ReportConfig { column_width },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Values given on the command line; each one replaces its environment variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub separator: Option<FieldSeparator>,
    pub events_path: Option<PathBuf>,
    pub column_width: Option<usize>,
}

/// Where results come from and how rows are split.
#[derive(Debug, Clone)]
pub struct InputConfig {
    pub path: PathBuf,
    pub separator: FieldSeparator,
    pub events_path: Option<PathBuf>,
}

impl InputConfig {
    /// Standard heptathlon table unless an override file is configured.
    pub fn event_table(&self) -> Result<EventTable, EventTableError> {
        match &self.events_path {
            Some(path) => EventTable::from_path(path),
            None => Ok(EventTable::standard()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub column_width: usize,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

pub fn parse_separator(value: &str) -> Result<FieldSeparator, ConfigError> {
    FieldSeparator::parse(value).ok_or_else(|| ConfigError::InvalidSeparator {
        value: value.to_string(),
    })
}

pub fn parse_column_width(value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidColumnWidth {
            value: value.to_string(),
            source: None,
        }),
        Ok(width) => Ok(width),
        Err(source) => Err(ConfigError::InvalidColumnWidth {
            value: value.to_string(),
            source: Some(source),
        }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSeparator {
        value: String,
    },
    InvalidColumnWidth {
        value: String,
        source: Option<ParseIntError>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSeparator { value } => write!(
                f,
                "separator '{}' must be a single ASCII character other than ':' or a line break",
                value
            ),
            ConfigError::InvalidColumnWidth { value, .. } => {
                write!(f, "column width '{}' must be a positive integer", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidSeparator { .. } => None,
            ConfigError::InvalidColumnWidth { source, .. } => source
                .as_ref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
        }
    }
}
