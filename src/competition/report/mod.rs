mod export;
mod standings;
mod text;
pub mod views;

pub use export::write_csv;
pub use text::{render_text, DEFAULT_COLUMN_WIDTH};
pub use views::{DayStandings, StandingEntry};
