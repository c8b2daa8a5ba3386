pub mod config;
pub mod plan;
pub mod shell;

use chrono::{Local, NaiveDate};

/// clap value parser for `YYYY-MM-DD` arguments.
pub fn parse_date_arg(text: &str) -> Result<NaiveDate, String> {
    studyplan_core::parse_date(text).map_err(|e| e.to_string())
}

/// Today's date in the local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Turn colors off when the config asks for it; otherwise `colored` follows
/// the environment (NO_COLOR, CLICOLOR, terminal detection).
pub fn apply_display(config: &studyplan_core::Config) {
    if !config.display.color {
        colored::control::set_override(false);
    }
}
