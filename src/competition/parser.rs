use super::domain::{FieldSeparator, HeptathlonError, MalformedReason, OutcomeRecord};
use super::normalizer::normalize_field;
use chrono::NaiveDate;
use csv::StringRecord;
use std::io::Read;

const FIELD_COUNT: usize = 4;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses one raw input line into an unscored record.
///
/// Columns are `athlete, event, result, date`. Event codes are not checked
/// here; the scoring step rejects codes missing from the event table.
pub fn parse_row(
    raw_line: &str,
    separator: FieldSeparator,
) -> Result<OutcomeRecord, HeptathlonError> {
    let mut reader = row_reader(raw_line.as_bytes(), separator);
    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    parse_fields(record.iter())
}

/// Headerless, unquoted reader splitting on `separator`.
///
/// Rows may end in `\n`, `\r\n` or a bare `\r`. Field counts are left to
/// `parse_fields` so a short row reports how many fields it had.
pub(crate) fn row_reader<R: Read>(input: R, separator: FieldSeparator) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .delimiter(separator.as_byte())
        .terminator(csv::Terminator::CRLF)
        .from_reader(input)
}

pub fn parse_fields<'a, I>(fields: I) -> Result<OutcomeRecord, HeptathlonError>
where
    I: IntoIterator<Item = &'a str>,
{
    let fields: Vec<String> = fields.into_iter().map(normalize_field).collect();
    let [athlete, event, result, date]: [String; FIELD_COUNT] =
        fields.try_into().map_err(|fields: Vec<String>| {
            HeptathlonError::malformed(MalformedReason::FieldCount {
                found: fields.len(),
            })
        })?;

    Ok(OutcomeRecord {
        athlete,
        event,
        result: parse_result(&result)?,
        date: parse_date(&date)?,
    })
}

/// Plain decimal, or `minutes:seconds` converted to total seconds.
pub(crate) fn parse_result(value: &str) -> Result<f64, HeptathlonError> {
    let malformed = || {
        HeptathlonError::malformed(MalformedReason::Result {
            value: value.to_string(),
        })
    };

    let parts: Vec<&str> = value.split(':').collect();
    let seconds = match parts.as_slice() {
        [single] => parse_number(single),
        [minutes, seconds] => match (parse_number(minutes), parse_number(seconds)) {
            (Some(minutes), Some(seconds)) => Some(minutes * 60.0 + seconds),
            _ => None,
        },
        _ => None,
    };

    seconds.ok_or_else(malformed)
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Calendar day of the first space-separated token; any time of day is dropped.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, HeptathlonError> {
    let token = value.split(' ').next().unwrap_or_default();
    NaiveDate::parse_from_str(token, DATE_FORMAT).map_err(|_| {
        HeptathlonError::malformed(MalformedReason::Date {
            value: value.to_string(),
        })
    })
}
