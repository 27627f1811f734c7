use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingEntry {
    pub athlete: String,
    pub points_today: i64,
    pub cumulative: i64,
}

/// One day bucket ranked by cumulative score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayStandings {
    pub day: usize,
    pub date: NaiveDate,
    pub entries: Vec<StandingEntry>,
}

/// Flat row for spreadsheet export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingRow<'a> {
    pub day: usize,
    pub date: NaiveDate,
    pub rank: usize,
    pub athlete: &'a str,
    pub points_today: i64,
    pub cumulative: i64,
}
