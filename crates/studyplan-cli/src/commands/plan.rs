//! One-shot commands driven by a TOML plan file.

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use studyplan_core::{Config, PlanFile, Session, StudyBudget};

use super::{local_today, parse_date_arg};
use crate::render;

#[derive(Args)]
pub struct PlanArgs {
    /// Path to the plan file (TOML)
    pub file: PathBuf,
    /// First study day (default: plan file value, then today)
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,
    /// Weekday study minutes, 0-600 (overrides plan file and config)
    #[arg(long)]
    pub weekday_minutes: Option<u32>,
    /// Weekend study minutes, 0-900 (overrides plan file and config)
    #[arg(long)]
    pub weekend_minutes: Option<u32>,
}

/// Load the plan, apply overrides and generate the schedule.
fn build_session(
    args: &PlanArgs,
    config: &Config,
    today: NaiveDate,
) -> Result<Session, Box<dyn std::error::Error>> {
    let plan = PlanFile::load(&args.file)?;
    tracing::debug!(
        file = %args.file.display(),
        subjects = plan.subjects.len(),
        "loaded plan file"
    );

    let from_plan = plan.budget(config.study_budget());
    let budget = StudyBudget::new(
        args.weekday_minutes.unwrap_or(from_plan.weekday_minutes()),
        args.weekend_minutes.unwrap_or(from_plan.weekend_minutes()),
    );
    let start = args.start.or(plan.start_date).unwrap_or(today);

    let mut session = plan.into_session(budget)?;
    session.regenerate(start);
    Ok(session)
}

/// Print per-subject tables and today's goal.
pub fn run_plan(
    args: PlanArgs,
    today: Option<NaiveDate>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    super::apply_display(&config);
    let today = today.unwrap_or_else(local_today);
    let session = build_session(&args, &config, today)?;

    let mut out = io::stdout().lock();
    let Some(schedule) = session.schedule() else {
        writeln!(out, "No subjects registered.")?;
        return Ok(());
    };

    if json {
        render::write_json(&mut out, schedule)?;
        return Ok(());
    }

    render::write_schedule(&mut out, schedule, &config.display)?;
    render::write_today(&mut out, &session.today(today))?;
    Ok(())
}

/// Print only the goal for one day.
pub fn run_today(
    args: PlanArgs,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    super::apply_display(&config);
    let date = date.unwrap_or_else(local_today);
    let session = build_session(&args, &config, date)?;

    let mut out = io::stdout().lock();
    if json {
        let summary = session.schedule().and_then(|s| s.day_summary(date));
        render::write_json(&mut out, &summary)?;
        return Ok(());
    }
    render::write_today(&mut out, &session.today(date))?;
    Ok(())
}
