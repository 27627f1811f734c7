use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Measurement family of an event; decides which scoring formula applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Running,
    Jumping,
    Throwing,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Weights {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EventDefinition {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub weights: Weights,
}

impl EventDefinition {
    pub const fn new(kind: EventKind, a: f64, b: f64, c: f64) -> Self {
        Self {
            kind,
            weights: Weights { a, b, c },
        }
    }
}

/// Immutable lookup of event code to scoring definition.
///
/// Built once at start-up and passed by reference to the parser, the
/// pipeline and the scoring engine. Codes are stored lower-cased so they
/// line up with the normalized event field of a row.
#[derive(Debug, Clone, PartialEq)]
pub struct EventTable {
    events: BTreeMap<String, EventDefinition>,
}

impl EventTable {
    /// World Athletics heptathlon table for the seven scored events.
    pub fn standard() -> Self {
        let events = [
            ("100m", EventDefinition::new(EventKind::Running, 9.23076, 26.7, 1.835)),
            ("200m", EventDefinition::new(EventKind::Running, 4.99087, 42.5, 1.81)),
            ("800m", EventDefinition::new(EventKind::Running, 0.11193, 254.0, 1.88)),
            ("long", EventDefinition::new(EventKind::Jumping, 0.188807, 210.0, 1.41)),
            ("high", EventDefinition::new(EventKind::Jumping, 1.84523, 75.0, 1.348)),
            ("shot", EventDefinition::new(EventKind::Throwing, 56.0211, 1.50, 1.05)),
            ("javelin", EventDefinition::new(EventKind::Throwing, 15.9803, 3.80, 1.04)),
        ]
        .into_iter()
        .map(|(code, definition)| (code.to_string(), definition))
        .collect();

        Self { events }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, EventTableError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| EventTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_reader(file)
    }

    /// Reads a table shaped like `{"100m": {"type": "running", "weights": {"A": .., "B": .., "C": ..}}}`.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, EventTableError> {
        let raw: BTreeMap<String, EventDefinition> = serde_json::from_reader(reader)?;
        Self::from_definitions(raw)
    }

    pub fn from_definitions<I>(definitions: I) -> Result<Self, EventTableError>
    where
        I: IntoIterator<Item = (String, EventDefinition)>,
    {
        let mut events = BTreeMap::new();
        for (code, definition) in definitions {
            let code = code.trim().to_lowercase();
            let Weights { a, b, c } = definition.weights;
            if ![a, b, c].iter().all(|value| value.is_finite()) {
                return Err(EventTableError::NonFiniteWeight { code });
            }
            if events.insert(code.clone(), definition).is_some() {
                return Err(EventTableError::DuplicateCode { code });
            }
        }

        if events.is_empty() {
            return Err(EventTableError::Empty);
        }

        Ok(Self { events })
    }

    pub fn get(&self, code: &str) -> Option<&EventDefinition> {
        self.events.get(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }
}

impl Default for EventTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug)]
pub enum EventTableError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    NonFiniteWeight {
        code: String,
    },
    DuplicateCode {
        code: String,
    },
    Empty,
}

impl fmt::Display for EventTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTableError::Io { path, source } => {
                write!(f, "failed to read event table {}: {}", path.display(), source)
            }
            EventTableError::Json(err) => write!(f, "invalid event table JSON: {}", err),
            EventTableError::NonFiniteWeight { code } => {
                write!(f, "event '{}' has a non-finite weight", code)
            }
            EventTableError::DuplicateCode { code } => {
                write!(f, "event '{}' is defined more than once", code)
            }
            EventTableError::Empty => write!(f, "event table defines no events"),
        }
    }
}

impl std::error::Error for EventTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EventTableError::Io { source, .. } => Some(source),
            EventTableError::Json(err) => Some(err),
            EventTableError::NonFiniteWeight { .. }
            | EventTableError::DuplicateCode { .. }
            | EventTableError::Empty => None,
        }
    }
}

impl From<serde_json::Error> for EventTableError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
