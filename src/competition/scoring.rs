use super::domain::{HeptathlonError, Outcome, OutcomeRecord};
use super::events::{EventDefinition, EventKind, EventTable};

/// Points for `result` in the event `code`, floored to an integer.
///
/// Running results are seconds, jumps and throws are metres; jumps are
/// scored in centimetres.
pub fn score_points(table: &EventTable, code: &str, result: f64) -> Result<i64, HeptathlonError> {
    let definition = table
        .get(code)
        .ok_or_else(|| HeptathlonError::UnknownEvent {
            code: code.to_string(),
            line: None,
        })?;

    points_for(definition, result).ok_or_else(|| HeptathlonError::InvalidResult {
        event: code.to_string(),
        result,
        line: None,
    })
}

fn points_for(definition: &EventDefinition, result: f64) -> Option<i64> {
    let weights = definition.weights;
    let base = match definition.kind {
        EventKind::Running => weights.b - result,
        EventKind::Jumping => result * 100.0 - weights.b,
        EventKind::Throwing => result - weights.b,
    };

    // A negative base only has a real power for whole exponents.
    if base < 0.0 && weights.c.fract() != 0.0 {
        return None;
    }

    let points = (weights.a * base.powf(weights.c)).floor();
    if !points.is_finite() || points.abs() > i64::MAX as f64 {
        return None;
    }

    Some(points as i64)
}

impl OutcomeRecord {
    pub fn score(self, table: &EventTable) -> Result<Outcome, HeptathlonError> {
        let points = score_points(table, &self.event, self.result)?;
        Ok(Outcome {
            athlete: self.athlete,
            event: self.event,
            result: self.result,
            date: self.date,
            points,
        })
    }
}
