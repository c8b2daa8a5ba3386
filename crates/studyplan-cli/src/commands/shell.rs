//! Interactive planning session.
//!
//! Subjects and the generated schedule live only for as long as the shell
//! runs. Each input line is parsed with clap in multicall mode, so `help`
//! and per-command `--help` work as usual.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use studyplan_core::config::DisplayConfig;
use studyplan_core::{Config, Difficulty, Session, StudyBudget, Subject};

use super::{local_today, parse_date_arg};
use crate::render;

#[derive(Parser)]
#[command(multicall = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Register a subject
    Add {
        /// Subject name (quote names with spaces)
        name: String,
        /// Difficulty from 1 (easy) to 5 (hard), clamped into that range
        #[arg(allow_negative_numbers = true)]
        difficulty: i64,
        /// Exam date (default: today)
        #[arg(value_parser = parse_date_arg)]
        exam: Option<NaiveDate>,
    },
    /// Delete a subject and its scheduled study time
    Remove { name: String },
    /// Delete every subject and the schedule
    Clear,
    /// List registered subjects
    List,
    /// Set weekday and weekend study minutes
    Budget { weekday: u32, weekend: u32 },
    /// Build the schedule from the registered subjects
    Generate {
        /// First study day (default: today)
        #[arg(value_parser = parse_date_arg)]
        start: Option<NaiveDate>,
    },
    /// Show the current schedule
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Show the goal for one day
    Today {
        /// Day to show (default: today)
        #[arg(value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Split a line on whitespace, keeping double-quoted runs together.
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }
    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if has_word {
        words.push(current);
    }
    Ok(words)
}

fn execute<W: Write>(
    command: ShellCommand,
    session: &mut Session,
    out: &mut W,
    display: &DisplayConfig,
    today: NaiveDate,
) -> Result<Flow, Box<dyn std::error::Error>> {
    match command {
        ShellCommand::Add {
            name,
            difficulty,
            exam,
        } => {
            let subject = Subject::new(
                &name,
                Difficulty::clamped(difficulty),
                exam.unwrap_or(today),
            )?;
            let added = subject.name.clone();
            session.add_subject(subject)?;
            writeln!(out, "Added subject '{added}'.")?;
        }
        ShellCommand::Remove { name } => match session.remove_subject(&name) {
            Some(subject) => writeln!(
                out,
                "Removed subject '{}' and its scheduled study time.",
                subject.name
            )?,
            None => writeln!(out, "No subject named '{name}'.")?,
        },
        ShellCommand::Clear => {
            session.clear();
            writeln!(out, "Removed all subjects and the schedule.")?;
        }
        ShellCommand::List => render::write_subjects(out, session.subjects())?,
        ShellCommand::Budget { weekday, weekend } => {
            session.set_budget(StudyBudget::new(weekday, weekend));
            let budget = session.budget();
            writeln!(
                out,
                "Budget set to {} min on weekdays and {} min on weekends.",
                budget.weekday_minutes(),
                budget.weekend_minutes()
            )?;
        }
        ShellCommand::Generate { start } => {
            match session.regenerate(start.unwrap_or(today)) {
                Some(schedule) => writeln!(
                    out,
                    "Schedule generated with {} entries.",
                    schedule.len()
                )?,
                None => writeln!(out, "No subjects registered.")?,
            }
        }
        ShellCommand::Show { json } => match session.schedule() {
            Some(schedule) if json => render::write_json(out, schedule)?,
            Some(schedule) => render::write_schedule(out, schedule, display)?,
            None => writeln!(out, "No schedule generated yet.")?,
        },
        ShellCommand::Today { date } => {
            render::write_today(out, &session.today(date.unwrap_or(today)))?
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Read commands from `input` until EOF or `quit`.
fn repl<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    session: &mut Session,
    display: &DisplayConfig,
    today: NaiveDate,
) -> Result<(), Box<dyn std::error::Error>> {
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let words = match split_words(&line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                Vec::new()
            }
        };

        if !words.is_empty() {
            match ShellLine::try_parse_from(&words) {
                Ok(parsed) => match execute(parsed.command, session, out, display, today) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => writeln!(out, "error: {e}")?,
                },
                Err(e) => write!(out, "{e}")?,
            }
        }

        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    super::apply_display(&config);
    let mut session = Session::new(config.study_budget());
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    repl(
        stdin.lock(),
        &mut out,
        &mut session,
        &config.display,
        local_today(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(script: &str) -> String {
        colored::control::set_override(false);
        let mut session = Session::new(StudyBudget::new(120, 240));
        let mut out = Vec::new();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        repl(
            script.as_bytes(),
            &mut out,
            &mut session,
            &DisplayConfig::default(),
            today,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn split_words_respects_quotes() {
        assert_eq!(
            split_words(r#"add "Linear Algebra" -d 4"#).unwrap(),
            vec!["add", "Linear Algebra", "-d", "4"]
        );
        assert_eq!(split_words(r#"add """#).unwrap(), vec!["add", ""]);
        assert!(split_words(r#"add "open"#).is_err());
        assert!(split_words("   ").unwrap().is_empty());
    }

    #[test]
    fn full_session_round_trip() {
        let output = run_script(
            "add Math 4 2026-10-23\n\
             add History 2 2026-10-30\n\
             list\n\
             generate\n\
             today\n\
             remove History\n\
             show\n\
             quit\n\
             list\n",
        );
        assert!(output.contains("Added subject 'Math'."));
        assert!(output.contains("History"));
        assert!(output.contains("Schedule generated with"));
        assert!(output.contains("Today's goal: 2h (120 min)"));
        assert!(output.contains("Removed subject 'History' and its scheduled study time."));
        assert!(output.contains("Total study time for Math"));
        // Nothing after `quit` runs.
        assert_eq!(output.matches("Subject").count(), 1);
    }

    #[test]
    fn states_are_reported_before_anything_exists() {
        let output = run_script("generate\nshow\ntoday\nlist\n");
        assert!(output.contains("No subjects registered."));
        assert!(output.contains("No schedule generated yet."));
        assert!(output.contains("Generate a schedule to see today's goal."));
    }

    #[test]
    fn removing_last_subject_drops_schedule() {
        let output = run_script("add Math 3 2026-10-20\ngenerate\nremove Math\nshow\n");
        assert!(output.contains("No schedule generated yet."));
    }

    #[test]
    fn duplicate_and_blank_subjects_are_errors() {
        let output = run_script("add Math 3\nadd Math 3\nadd \" \" 3\n");
        assert!(output.contains("error: Subject 'Math' is already registered"));
        assert!(output.contains("error: Subject name must not be empty"));
    }

    #[test]
    fn positional_arguments_follow_the_documented_grammar() {
        let output = run_script(
            "add Physics 9 2026-10-21\n\
             add Art -2\n\
             list\n\
             generate 2026-10-20\n\
             today 2026-10-21\n",
        );
        assert!(output.contains("Added subject 'Physics'."));
        assert!(output.contains("Added subject 'Art'."));
        assert!(output.contains("5/5"));
        assert!(output.contains("1/5"));
        // Art's exam defaults to today, before the start day.
        assert!(output.contains("Schedule generated with 2 entries."));
        assert!(output.contains("Today's goal: 2h (120 min)"));
        assert!(output.contains("- Physics: 2h"));
    }

    #[test]
    fn add_requires_a_difficulty() {
        let output = run_script("add Math\nlist\n");
        assert!(output.contains("error:"));
        assert!(output.contains("No subjects registered."));
    }

    #[test]
    fn budget_is_clamped() {
        let output = run_script("budget 700 1000\n");
        assert!(output.contains("Budget set to 600 min on weekdays and 900 min on weekends."));
    }

    #[test]
    fn unknown_commands_print_clap_errors() {
        let output = run_script("teleport\n");
        assert!(output.contains("error:"));
        assert!(output.contains("teleport"));
    }

    #[test]
    fn clear_removes_everything() {
        let output = run_script("add Math 3\ngenerate\nclear\nshow\nlist\n");
        assert!(output.contains("Removed all subjects and the schedule."));
        assert!(output.contains("No schedule generated yet."));
    }
}
