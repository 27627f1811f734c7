use super::domain::{FieldSeparator, HeptathlonError, Outcome};
use super::events::EventTable;
use super::parser::{parse_fields, row_reader};
use csv::StringRecord;
use tracing::debug;

/// Parses, scores and date-orders every non-blank line of `raw`.
///
/// `\n`, `\r\n` and bare `\r` all terminate a line. Equal dates keep their
/// input order. The first bad row aborts the whole run.
pub fn build_outcomes(
    raw: &str,
    separator: FieldSeparator,
    table: &EventTable,
) -> Result<Vec<Outcome>, HeptathlonError> {
    let mut reader = row_reader(raw.as_bytes(), separator);
    let mut outcomes = Vec::new();

    for record in reader.records() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }

        let outcome = parse_fields(record.iter())
            .and_then(|parsed| parsed.score(table))
            .map_err(|err| match record.position() {
                Some(position) => err.at_line(line_at(raw.as_bytes(), position.byte())),
                None => err,
            })?;
        outcomes.push(outcome);
    }

    outcomes.sort_by_key(|outcome| outcome.date);
    debug!(rows = outcomes.len(), "parsed and scored result rows");

    Ok(outcomes)
}

/// Whitespace-only lines come back as a single empty field.
fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(str::is_empty)
}

/// 1-based line of the first non-terminator byte at or after `offset`.
///
/// A record's position can point at blank lines the reader skipped before
/// it, so those are stepped over first. `\r\n` counts once.
fn line_at(raw: &[u8], offset: u64) -> u64 {
    let offset = usize::try_from(offset).map_or(raw.len(), |offset| offset.min(raw.len()));
    let start = raw[offset..]
        .iter()
        .position(|byte| !matches!(byte, b'\r' | b'\n'))
        .map_or(raw.len(), |skipped| offset + skipped);

    let mut line = 1;
    for (index, byte) in raw[..start].iter().enumerate() {
        match byte {
            b'\n' if index > 0 && raw[index - 1] == b'\r' => {}
            b'\r' | b'\n' => line += 1,
            _ => {}
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competition::domain::MalformedReason;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 5, day).expect("valid date")
    }

    fn build(raw: &str) -> Result<Vec<Outcome>, HeptathlonError> {
        build_outcomes(raw, FieldSeparator::COMMA, &EventTable::standard())
    }

    #[test]
    fn accepts_every_line_terminator_and_skips_blanks() {
        let raw = "ennis,100m,16.2,2017-05-03\r\n\r\nthiam,long,7.27,2017-05-04\rjohnson,javelin,60.90,2017-05-04\n   \n";
        let outcomes = build(raw).expect("pipeline succeeds");

        assert_eq!(outcomes.len(), 3);
        assert_eq!(
            outcomes.iter().map(|outcome| outcome.points).collect::<Vec<_>>(),
            vec![690, 1264, 1072]
        );
    }

    #[test]
    fn sorts_by_date_keeping_input_order_for_ties() {
        let raw = "\
b,long,6.5,2017-05-04 09:00
a,100m,13.5,2017-05-03 18:00
c,high,1.75,2017-05-04 08:00
a,high,1.80,2017-05-03 10:00
";
        let outcomes = build(raw).expect("pipeline succeeds");
        let order: Vec<(&str, NaiveDate)> = outcomes
            .iter()
            .map(|outcome| (outcome.athlete.as_str(), outcome.date))
            .collect();

        assert_eq!(
            order,
            vec![("a", date(3)), ("a", date(3)), ("b", date(4)), ("c", date(4))]
        );
        assert_eq!(outcomes[0].event, "100m");
        assert_eq!(outcomes[1].event, "high");
    }

    #[test]
    fn first_error_aborts_with_line_number() {
        let raw = "ennis,100m,16.2,2017-05-03\nennis,pole,4.1,2017-05-03\nennis,100m,oops,2017-05-03\n";
        let error = build(raw).expect_err("unknown event");
        match error {
            HeptathlonError::UnknownEvent { code, line } => {
                assert_eq!(code, "pole");
                assert_eq!(line, Some(2));
            }
            other => panic!("expected unknown event, got {other:?}"),
        }
    }

    #[test]
    fn scoring_domain_errors_surface_with_line() {
        let raw = "ennis,100m,16.2,2017-05-03\n\nennis,200m,1:00,2017-05-03\n";
        let error = build(raw).expect_err("result slower than the table allows");
        assert!(matches!(
            error,
            HeptathlonError::InvalidResult { line: Some(3), .. }
        ));
    }

    #[test]
    fn empty_input_yields_no_outcomes() {
        assert!(build("").expect("empty is fine").is_empty());
        assert!(build("\n\r\n \n").expect("blank is fine").is_empty());
    }

    #[test]
    fn line_numbers_follow_mixed_terminators() {
        let raw = b"a\r\nb\rc\n\nd";
        assert_eq!(line_at(raw, 0), 1);
        assert_eq!(line_at(raw, 2), 2);
        assert_eq!(line_at(raw, 3), 2);
        assert_eq!(line_at(raw, 4), 3);
        assert_eq!(line_at(raw, 6), 5);
        assert_eq!(line_at(b"", 0), 1);
    }

    #[test]
    fn errors_after_blank_lines_and_bare_returns_report_physical_line() {
        let raw = "ennis,100m,16.2,2017-05-03\r\n\r\n  \rennis,100m,fast,2017-05-03\n";
        let error = build(raw).expect_err("unparsable result");
        match error {
            HeptathlonError::MalformedRow {
                line,
                reason: MalformedReason::Result { value },
            } => {
                assert_eq!(value, "fast");
                assert_eq!(line, Some(4));
            }
            other => panic!("expected malformed result, got {other:?}"),
        }
    }

    #[test]
    fn short_rows_report_their_field_count() {
        let error = build("ennis,100m,16.2,2017-05-03\nthiam,100m\n").expect_err("two fields");
        assert!(matches!(
            error,
            HeptathlonError::MalformedRow {
                line: Some(2),
                reason: MalformedReason::FieldCount { found: 2 },
            }
        ));
    }

    #[test]
    fn honours_custom_separator() {
        let outcomes = build_outcomes(
            "ennis;800m;2:10.5;2017-05-04",
            FieldSeparator::parse(";").expect("separator"),
            &EventTable::standard(),
        )
        .expect("pipeline succeeds");

        assert_eq!(outcomes[0].result, 130.5);
        assert_eq!(outcomes[0].points, 957);
    }
}
