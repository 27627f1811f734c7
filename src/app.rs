use crate::competition::report::{render_text, write_csv};
use crate::competition::{self, FieldSeparator, Summary};
use crate::config::{self, AppConfig, ConfigOverrides};
use crate::error::AppError;
use crate::telemetry;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "heptathlon",
    about = "Turn a heptathlon results file into a day-by-day cumulative leaderboard",
    version
)]
pub struct Cli {
    /// Results file with `athlete, event, result, date` on each line
    pub input: Option<PathBuf>,
    /// Field separator (single ASCII character)
    #[arg(long, short, value_parser = parse_separator_arg)]
    pub separator: Option<FieldSeparator>,
    /// JSON event table replacing the standard heptathlon weights
    #[arg(long)]
    pub events: Option<PathBuf>,
    /// Column width of the text leaderboard
    #[arg(long, value_parser = parse_width_arg)]
    pub width: Option<usize>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn parse_separator_arg(raw: &str) -> Result<FieldSeparator, String> {
    config::parse_separator(raw).map_err(|err| err.to_string())
}

fn parse_width_arg(raw: &str) -> Result<usize, String> {
    config::parse_column_width(raw).map_err(|err| err.to_string())
}

impl Cli {
    /// Flags the user set, to be layered over the environment.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input.clone(),
            separator: self.separator,
            events_path: self.events.clone(),
            column_width: self.width,
        }
    }
}

pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.overrides())?;
    telemetry::init(&config.telemetry)?;

    let output = execute(&config, cli.format)?;
    println!("{output}");
    Ok(())
}

/// Reads the configured input and renders the leaderboard.
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<String, AppError> {
    let table = config.input.event_table()?;
    debug!(events = ?table.codes().collect::<Vec<_>>(), "event table ready");
    let path = &config.input.path;
    let raw =
        std::fs::read_to_string(path).map_err(|source| AppError::file_access(path, source))?;
    debug!(path = %path.display(), bytes = raw.len(), "read results file");

    let summary = competition::summarise(&raw, config.input.separator, &table)?;
    info!(
        days = summary.days().len(),
        athletes = summary.athletes().len(),
        ?format,
        "rendering leaderboard"
    );

    render(&summary, format, config.report.column_width)
}

pub fn render(summary: &Summary, format: OutputFormat, width: usize) -> Result<String, AppError> {
    match format {
        OutputFormat::Text => Ok(render_text(summary, width)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&summary.standings())?),
        OutputFormat::Csv => {
            let mut buffer = Vec::new();
            write_csv(summary, &mut buffer)?;
            Ok(String::from_utf8_lossy(&buffer).trim_end().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InputConfig, ReportConfig, TelemetryConfig};
    use std::io::Write;

    fn config_for(path: PathBuf) -> AppConfig {
        AppConfig {
            input: InputConfig {
                path,
                separator: FieldSeparator::COMMA,
                events_path: None,
            },
            report: ReportConfig { column_width: 20 },
            telemetry: TelemetryConfig {
                log_level: "warn".to_string(),
            },
        }
    }

    #[test]
    fn cli_defaults_override_nothing() {
        let cli = Cli::try_parse_from(["heptathlon"]).expect("parses");
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.overrides(), ConfigOverrides::default());
    }

    #[test]
    fn cli_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "heptathlon",
            "meet.tsv",
            "--separator",
            "\t",
            "--width",
            "30",
            "--events",
            "indoor.json",
            "--format",
            "json",
        ])
        .expect("parses");

        let overrides = cli.overrides();
        assert_eq!(overrides.input, Some(PathBuf::from("meet.tsv")));
        assert_eq!(overrides.separator.map(FieldSeparator::as_char), Some('\t'));
        assert_eq!(overrides.events_path, Some(PathBuf::from("indoor.json")));
        assert_eq!(overrides.column_width, Some(30));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn cli_rejects_bad_separator_and_width() {
        assert!(Cli::try_parse_from(["heptathlon", "--separator", ";;"]).is_err());
        assert!(Cli::try_parse_from(["heptathlon", "--width", "0"]).is_err());
    }

    #[test]
    fn execute_reports_missing_file() {
        let config = config_for(PathBuf::from("./does-not-exist.csv"));
        let error = execute(&config, OutputFormat::Text).expect_err("file missing");
        match error {
            AppError::FileAccess { path, .. } => {
                assert_eq!(path, PathBuf::from("./does-not-exist.csv"))
            }
            other => panic!("expected file access error, got {other:?}"),
        }
    }

    #[test]
    fn execute_renders_json_standings() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "Ennis,100m,16.2,2017-05-03 09:00").expect("write row");
        writeln!(file, "Ennis,long,7.27,2017-05-04 11:00").expect("write row");

        let config = config_for(file.path().to_path_buf());
        let output = execute(&config, OutputFormat::Json).expect("renders");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(value[0]["day"], 1);
        assert_eq!(value[0]["date"], "2017-05-03");
        assert_eq!(value[0]["entries"][0]["athlete"], "ennis");
        assert_eq!(value[0]["entries"][0]["cumulative"], 690);
        assert_eq!(value[1]["entries"][0]["points_today"], 1264);
        assert_eq!(value[1]["entries"][0]["cumulative"], 1954);
    }

    #[test]
    fn execute_propagates_row_errors() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "Ennis,100m,16.2").expect("write row");

        let config = config_for(file.path().to_path_buf());
        let error = execute(&config, OutputFormat::Text).expect_err("malformed row");
        assert!(matches!(error, AppError::Heptathlon(_)));
        assert!(error.to_string().contains("line 1"));
    }

    #[test]
    fn csv_format_has_header_and_rows() {
        let summary = competition::summarise(
            "a,shot,14.0,2017-05-03",
            FieldSeparator::COMMA,
            &Default::default(),
        )
        .expect("summarises");
        let output = render(&summary, OutputFormat::Csv, 20).expect("renders");
        assert_eq!(
            output,
            "day,date,rank,athlete,points_today,cumulative\n1,2017-05-03,1,a,794,794"
        );
    }
}
