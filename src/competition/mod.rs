pub mod domain;
pub mod events;
mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod summary;

pub use domain::{FieldSeparator, HeptathlonError, MalformedReason, Outcome, OutcomeRecord};
pub use events::{EventDefinition, EventKind, EventTable, EventTableError, Weights};
pub use parser::parse_row;
pub use pipeline::build_outcomes;
pub use scoring::score_points;
pub use summary::{aggregate, DaySummary, Summary};

/// Runs the full core: parse, score, sort and aggregate.
pub fn summarise(
    raw: &str,
    separator: FieldSeparator,
    table: &EventTable,
) -> Result<Summary, HeptathlonError> {
    let outcomes = build_outcomes(raw, separator, table)?;
    aggregate(&outcomes)
}
