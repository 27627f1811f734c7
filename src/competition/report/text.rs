use super::super::summary::Summary;
use super::views::{DayStandings, StandingEntry};

pub const DEFAULT_COLUMN_WIDTH: usize = 20;

const DATE_LABEL_FORMAT: &str = "%d %b %Y";

/// Fixed-width leaderboard, one block per day bucket.
///
/// Blocks are separated by a blank line and the output carries no trailing
/// newline.
pub fn render_text(summary: &Summary, width: usize) -> String {
    let standings = summary.standings();
    let rule = "-".repeat(width);
    let mut lines: Vec<String> = Vec::new();

    for (index, day) in standings.iter().enumerate() {
        push_day_block(&mut lines, day, &rule, width);
        if index + 1 < standings.len() {
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn push_day_block(lines: &mut Vec<String>, day: &DayStandings, rule: &str, width: usize) {
    lines.push(rule.to_string());
    lines.push(format!(
        " Day {}: {}",
        day.day,
        day.date.format(DATE_LABEL_FORMAT)
    ));
    lines.push(rule.to_string());
    lines.extend(day.entries.iter().map(|entry| score_line(entry, width)));
}

fn score_line(entry: &StandingEntry, width: usize) -> String {
    let name = entry.athlete.to_uppercase();
    let points = entry.cumulative.to_string();
    let used = name.chars().count() + points.len();
    let padding = if used < width { width - used } else { 1 };

    format!("{}{}{}", name, " ".repeat(padding), points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competition::domain::Outcome;
    use crate::competition::summary::aggregate;
    use chrono::NaiveDate;

    fn outcome(athlete: &str, month: u32, day: u32, points: i64) -> Outcome {
        Outcome {
            athlete: athlete.to_string(),
            event: "high".to_string(),
            result: 0.0,
            date: NaiveDate::from_ymd_opt(2017, month, day).expect("valid date"),
            points,
        }
    }

    #[test]
    fn renders_day_blocks_with_right_aligned_scores() {
        let summary = aggregate(&[
            outcome("jessica ennis", 8, 5, 2104),
            outcome("thiam", 8, 5, 1866),
            outcome("thiam", 8, 6, 1773),
        ])
        .expect("aggregates");

        let expected = "\
--------------------
 Day 1: 05 Aug 2017
--------------------
JESSICA ENNIS   2104
THIAM           1866

--------------------
 Day 2: 06 Aug 2017
--------------------
THIAM           3639
JESSICA ENNIS   2104";

        assert_eq!(render_text(&summary, DEFAULT_COLUMN_WIDTH), expected);
    }

    #[test]
    fn overlong_names_keep_a_single_space() {
        let summary = aggregate(&[outcome("katarina johnson-thompson", 5, 3, 1000)])
            .expect("aggregates");
        let rendered = render_text(&summary, DEFAULT_COLUMN_WIDTH);
        assert!(rendered.ends_with("KATARINA JOHNSON-THOMPSON 1000"));
    }

    #[test]
    fn honours_custom_width() {
        let summary = aggregate(&[outcome("ennis", 12, 25, 7)]).expect("aggregates");
        assert_eq!(
            render_text(&summary, 10),
            "----------\n Day 1: 25 Dec 2017\n----------\nENNIS    7"
        );
    }

    #[test]
    fn empty_summary_renders_nothing() {
        let summary = aggregate(&[]).expect("aggregates");
        assert_eq!(render_text(&summary, DEFAULT_COLUMN_WIDTH), "");
    }
}
