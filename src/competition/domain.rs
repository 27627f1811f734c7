use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// One athlete's parsed result before scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeRecord {
    pub athlete: String,
    pub event: String,
    pub result: f64,
    pub date: NaiveDate,
}

/// One athlete's scored result in one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub athlete: String,
    pub event: String,
    pub result: f64,
    pub date: NaiveDate,
    pub points: i64,
}

/// Single-byte column delimiter for input rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSeparator(u8);

impl FieldSeparator {
    pub const COMMA: Self = Self(b',');

    pub fn new(value: char) -> Option<Self> {
        if value.is_ascii() && !matches!(value, '\n' | '\r' | ':') {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(value), None) => Self::new(value),
            _ => None,
        }
    }

    pub const fn as_byte(self) -> u8 {
        self.0
    }

    pub const fn as_char(self) -> char {
        self.0 as char
    }
}

impl Default for FieldSeparator {
    fn default() -> Self {
        Self::COMMA
    }
}

impl fmt::Display for FieldSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    FieldCount { found: usize },
    Result { value: String },
    Date { value: String },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::FieldCount { found } => {
                write!(f, "expected 4 fields, found {}", found)
            }
            MalformedReason::Result { value } => write!(f, "unparsable result '{}'", value),
            MalformedReason::Date { value } => write!(f, "unparsable date '{}'", value),
        }
    }
}

#[derive(Debug, Error)]
pub enum HeptathlonError {
    #[error("malformed row{}: {reason}", LineSuffix(.line))]
    MalformedRow {
        line: Option<u64>,
        reason: MalformedReason,
    },
    #[error("unknown event '{code}'{}", LineSuffix(.line))]
    UnknownEvent { code: String, line: Option<u64> },
    #[error("result {result} for event '{event}' is outside the scoring table{}", LineSuffix(.line))]
    InvalidResult {
        event: String,
        result: f64,
        line: Option<u64>,
    },
    #[error("points total for '{athlete}' is out of range")]
    PointsOverflow { athlete: String },
    #[error("could not read result rows: {0}")]
    Read(#[from] csv::Error),
}

impl HeptathlonError {
    pub(crate) fn malformed(reason: MalformedReason) -> Self {
        Self::MalformedRow { line: None, reason }
    }

    /// Attaches the 1-based input line to row-level errors.
    pub(crate) fn at_line(self, number: u64) -> Self {
        match self {
            Self::MalformedRow { reason, .. } => Self::MalformedRow {
                line: Some(number),
                reason,
            },
            Self::UnknownEvent { code, .. } => Self::UnknownEvent {
                code,
                line: Some(number),
            },
            Self::InvalidResult { event, result, .. } => Self::InvalidResult {
                event,
                result,
                line: Some(number),
            },
            other => other,
        }
    }

    pub fn line(&self) -> Option<u64> {
        match self {
            Self::MalformedRow { line, .. }
            | Self::UnknownEvent { line, .. }
            | Self::InvalidResult { line, .. } => *line,
            Self::PointsOverflow { .. } | Self::Read(_) => None,
        }
    }
}

struct LineSuffix<'a>(&'a Option<u64>);

impl fmt::Display for LineSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(line) => write!(f, " (line {})", line),
            None => Ok(()),
        }
    }
}
