use super::domain::{HeptathlonError, Outcome};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Points for every known athlete at the close of one day bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    date: NaiveDate,
    points_earned: HashMap<String, i64>,
    cumulative_scores: HashMap<String, i64>,
}

impl DaySummary {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Points scored within this bucket only; zero for idle athletes.
    pub fn points_earned(&self, athlete: &str) -> Option<i64> {
        self.points_earned.get(athlete).copied()
    }

    /// Running total through and including this bucket.
    pub fn cumulative(&self, athlete: &str) -> Option<i64> {
        self.cumulative_scores.get(athlete).copied()
    }

    pub fn cumulative_scores(&self) -> &HashMap<String, i64> {
        &self.cumulative_scores
    }
}

/// Ordered day buckets plus every athlete seen in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    days: Vec<DaySummary>,
    athletes: Vec<String>,
}

impl Summary {
    pub fn days(&self) -> &[DaySummary] {
        &self.days
    }

    /// Athlete keys in first-seen order.
    pub fn athletes(&self) -> &[String] {
        &self.athletes
    }

    pub fn final_day(&self) -> Option<&DaySummary> {
        self.days.last()
    }
}

struct DayBucket {
    date: NaiveDate,
    points: HashMap<String, i64>,
}

impl DayBucket {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            points: HashMap::new(),
        }
    }

    fn add(&mut self, athlete: &str, points: i64) -> Result<(), HeptathlonError> {
        let total = self.points.entry(athlete.to_string()).or_insert(0);
        *total = checked_total(athlete, *total, points)?;
        Ok(())
    }
}

fn checked_total(athlete: &str, total: i64, points: i64) -> Result<i64, HeptathlonError> {
    total
        .checked_add(points)
        .ok_or_else(|| HeptathlonError::PointsOverflow {
            athlete: athlete.to_string(),
        })
}

/// Groups date-sorted outcomes into day buckets with cumulative totals.
///
/// A new bucket starts whenever an outcome's date differs from the previous
/// outcome's date, so a date that reappears after a different one opens a
/// second bucket rather than merging with the first. The input is not
/// re-sorted. Fails if a daily or running total leaves the `i64` range.
pub fn aggregate(outcomes: &[Outcome]) -> Result<Summary, HeptathlonError> {
    let mut athletes: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut buckets: Vec<DayBucket> = Vec::new();

    for outcome in outcomes {
        if seen.insert(outcome.athlete.as_str()) {
            athletes.push(outcome.athlete.clone());
        }

        if buckets.last().map(|bucket| bucket.date) != Some(outcome.date) {
            buckets.push(DayBucket::new(outcome.date));
        }
        if let Some(bucket) = buckets.last_mut() {
            bucket.add(&outcome.athlete, outcome.points)?;
        }
    }

    let mut running: HashMap<String, i64> = athletes
        .iter()
        .map(|athlete| (athlete.clone(), 0))
        .collect();

    let mut days: Vec<DaySummary> = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        let mut points_earned: HashMap<String, i64> = HashMap::with_capacity(athletes.len());
        for athlete in &athletes {
            let earned = bucket.points.get(athlete).copied().unwrap_or(0);
            let total = running.entry(athlete.clone()).or_insert(0);
            *total = checked_total(athlete, *total, earned)?;
            points_earned.insert(athlete.clone(), earned);
        }

        days.push(DaySummary {
            date: bucket.date,
            points_earned,
            cumulative_scores: running.clone(),
        });
    }

    info!(
        days = days.len(),
        athletes = athletes.len(),
        "aggregated cumulative scores"
    );

    Ok(Summary { days, athletes })
}
