use super::super::summary::Summary;
use super::views::StandingRow;
use std::io::Write;

/// Writes one CSV row per athlete per day bucket, in ranking order.
pub fn write_csv<W: Write>(summary: &Summary, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for day in summary.standings() {
        for (index, entry) in day.entries.iter().enumerate() {
            csv_writer.serialize(StandingRow {
                day: day.day,
                date: day.date,
                rank: index + 1,
                athlete: &entry.athlete,
                points_today: entry.points_today,
                cumulative: entry.cumulative,
            })?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}
