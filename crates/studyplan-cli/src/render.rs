//! Output formatting for CLI commands.

use std::io::{self, Write};

use colored::Colorize;
use studyplan_core::config::DisplayConfig;
use studyplan_core::{
    format_minutes, AllocationRecord, EventKind, Intensity, Schedule, Subject, TodayGoal,
};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Minutes")]
    minutes: u32,
    #[tabled(rename = "Intensity")]
    intensity: String,
    #[tabled(rename = "Event")]
    event: String,
}

#[derive(Tabled)]
struct SubjectRow {
    #[tabled(rename = "Subject")]
    name: String,
    #[tabled(rename = "Difficulty")]
    difficulty: String,
    #[tabled(rename = "Exam")]
    exam_date: String,
}

fn intensity_cell(intensity: Intensity) -> String {
    let level = Intensity::classify(intensity.multiplier());
    match level {
        Intensity::Low => level.label().green().to_string(),
        Intensity::Medium => level.label().yellow().to_string(),
        Intensity::High => level.label().red().bold().to_string(),
    }
}

fn event_cell(event: EventKind) -> String {
    match event {
        EventKind::Study => event.label().to_string(),
        EventKind::Exam => event.label().red().bold().to_string(),
    }
}

fn record_row(record: &AllocationRecord) -> RecordRow {
    RecordRow {
        date: record.date.format("%Y-%m-%d").to_string(),
        minutes: record.minutes,
        intensity: intensity_cell(record.intensity),
        event: event_cell(record.event),
    }
}

/// "2h 5m (125 min)" once a duration reaches an hour, "45m" below that.
pub fn duration_with_total(minutes: u32) -> String {
    if minutes >= 60 {
        format!("{} ({minutes} min)", format_minutes(minutes))
    } else {
        format_minutes(minutes)
    }
}

pub fn write_subjects<W: Write>(out: &mut W, subjects: &[Subject]) -> io::Result<()> {
    if subjects.is_empty() {
        return writeln!(out, "{}", "No subjects registered.".dimmed());
    }
    let rows: Vec<SubjectRow> = subjects
        .iter()
        .map(|s| SubjectRow {
            name: s.name.clone(),
            difficulty: format!("{}/5", s.difficulty.get()),
            exam_date: s.exam_date.format("%Y-%m-%d").to_string(),
        })
        .collect();
    writeln!(out, "{}", Table::new(rows))
}

/// One table per subject followed by its study total.
pub fn write_schedule<W: Write>(
    out: &mut W,
    schedule: &Schedule,
    display: &DisplayConfig,
) -> io::Result<()> {
    if schedule.is_empty() {
        return writeln!(out, "{}", "The schedule has no study time allocated.".dimmed());
    }

    for plan in schedule.by_subject() {
        writeln!(out, "{}", plan.subject.bold())?;
        let rows: Vec<RecordRow> = plan
            .records
            .iter()
            .filter(|r| display.show_exam_rows || r.event == EventKind::Study)
            .map(|r| record_row(r))
            .collect();
        writeln!(out, "{}", Table::new(rows))?;
        writeln!(
            out,
            "Total study time for {}: {}",
            plan.subject,
            duration_with_total(plan.study_minutes())
        )?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_today<W: Write>(out: &mut W, goal: &TodayGoal) -> io::Result<()> {
    match goal {
        TodayGoal::NoSchedule => writeln!(
            out,
            "{}",
            "Generate a schedule to see today's goal.".dimmed()
        ),
        TodayGoal::NothingPlanned => writeln!(out, "{}", "No study planned today.".dimmed()),
        TodayGoal::Planned(summary) => {
            writeln!(
                out,
                "{} {}",
                "Today's goal:".blue().bold(),
                duration_with_total(summary.total_minutes)
            )?;
            for (subject, minutes) in &summary.subjects {
                writeln!(out, "- {subject}: {}", format_minutes(*minutes))?;
            }
            Ok(())
        }
    }
}

pub fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(out, "{json}")
}
