//! Daily study-time allocator.
//!
//! Splits each day's budget across the subjects still under study, in
//! proportion to `difficulty * intensity`:
//! - Weekdays and weekends draw from separate budgets
//! - Intensity rises as an exam approaches (see [`Intensity`])
//! - Every active subject gets at least 0.1 hours before the day is rescaled
//!   back into budget
//!
//! Shares are rounded to hundredths of an hour twice (before and after
//! rescaling) and the 0.1-hour floor is applied only before rescaling, so a
//! day can drift from its budget by a few minutes per subject. That tolerance
//! is part of the contract.

mod intensity;

pub use intensity::Intensity;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::subject::Subject;

/// Smallest share, in hours, any active subject receives before rescaling.
pub const MIN_SHARE_HOURS: f64 = 0.1;

/// What happens on a scheduled day for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Study,
    Exam,
}

impl EventKind {
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Study => "study",
            EventKind::Exam => "exam",
        }
    }
}

/// Minutes assigned to one subject on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub date: NaiveDate,
    pub subject: String,
    pub minutes: u32,
    pub intensity: Intensity,
    pub event: EventKind,
}

/// Saturday and Sunday draw from the weekend budget.
pub fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Round to two decimals, ties to even.
///
/// Rounds the exact binary value: `1.005` is stored just below the tie and
/// becomes `1.0`. Scaling by 100 first would land on the tie and round up.
pub fn round_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Convert hours to whole minutes, ties to even.
pub fn hours_to_minutes(hours: f64) -> u32 {
    (hours * 60.0).round_ties_even().max(0.0) as u32
}

/// Split `budget_hours` across `weights`, returning hours per weight in input order.
///
/// Each share is rounded to hundredths and floored at [`MIN_SHARE_HOURS`]. If
/// the floored shares overshoot the budget they are scaled back down and
/// rounded again; the floor is not re-applied after that second pass.
pub fn split_budget(weights: &[f64], budget_hours: f64) -> Vec<f64> {
    let total_weight: f64 = weights.iter().sum();
    if weights.is_empty() || total_weight <= 0.0 {
        return vec![0.0; weights.len()];
    }

    let mut shares: Vec<f64> = weights
        .iter()
        .map(|w| round_hundredths(w / total_weight * budget_hours).max(MIN_SHARE_HOURS))
        .collect();

    let assigned: f64 = shares.iter().sum();
    if assigned > budget_hours {
        let factor = budget_hours / assigned;
        for share in &mut shares {
            *share = round_hundredths(*share * factor);
        }
    }

    shares
}

/// Generate the full study schedule.
///
/// Subjects whose exam falls before `start_date` are skipped. Records come
/// out in ascending date order; within a day they follow the order of
/// `subjects`. Negative budgets count as zero.
pub fn generate(
    subjects: &[Subject],
    start_date: NaiveDate,
    weekday_hours: f64,
    weekend_hours: f64,
) -> Vec<AllocationRecord> {
    let weekday_hours = weekday_hours.max(0.0);
    let weekend_hours = weekend_hours.max(0.0);

    // Every subject's window opens on `start_date`, so the union of active
    // days is the contiguous range up to the latest exam.
    let Some(last_day) = subjects
        .iter()
        .map(|s| s.exam_date)
        .filter(|exam| *exam >= start_date)
        .max()
    else {
        return Vec::new();
    };

    let mut records = Vec::new();

    for day in start_date.iter_days().take_while(|d| *d <= last_day) {
        let budget = if is_weekend(day) {
            weekend_hours
        } else {
            weekday_hours
        };

        let active: Vec<(&Subject, Intensity)> = subjects
            .iter()
            .filter(|s| s.is_active_on(start_date, day))
            .map(|s| (s, Intensity::for_days_left(s.days_left(day))))
            .collect();

        if active.is_empty() {
            continue;
        }

        let weights: Vec<f64> = active
            .iter()
            .map(|(s, intensity)| f64::from(s.difficulty.get()) * intensity.multiplier())
            .collect();
        let shares = split_budget(&weights, budget);

        let mut day_minutes: u32 = 0;
        for ((subject, intensity), hours) in active.iter().zip(shares) {
            let minutes = hours_to_minutes(hours);
            if minutes == 0 {
                continue;
            }
            day_minutes = day_minutes.saturating_add(minutes);
            records.push(AllocationRecord {
                date: day,
                subject: subject.name.clone(),
                minutes,
                intensity: *intensity,
                event: if day == subject.exam_date {
                    EventKind::Exam
                } else {
                    EventKind::Study
                },
            });
        }

        tracing::debug!(
            %day,
            budget_hours = budget,
            subjects = active.len(),
            minutes = day_minutes,
            "allocated study day"
        );
    }

    records
}

/// Drop every record for `subject`.
///
/// Returns `None` when nothing is left, which callers treat as "no schedule"
/// rather than an empty one.
pub fn prune(records: Vec<AllocationRecord>, subject: &str) -> Option<Vec<AllocationRecord>> {
    let before = records.len();
    let kept: Vec<AllocationRecord> = records.into_iter().filter(|r| r.subject != subject).collect();
    tracing::debug!(subject, removed = before - kept.len(), "pruned schedule");
    if kept.is_empty() {
        None
    } else {
        Some(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2026-10-19 is a Monday.
    fn monday() -> NaiveDate {
        date(2026, 10, 19)
    }

    fn subject(name: &str, difficulty: u8, exam: NaiveDate) -> Subject {
        Subject::new(name, difficulty, exam).unwrap()
    }

    #[test]
    fn weekend_detection() {
        assert!(!is_weekend(monday()));
        assert!(!is_weekend(date(2026, 10, 23)));
        assert!(is_weekend(date(2026, 10, 24)));
        assert!(is_weekend(date(2026, 10, 25)));
    }

    #[test]
    fn rounding_goes_to_even_on_ties() {
        assert_eq!(round_hundredths(2.647_058_8), 2.65);
        assert_eq!(round_hundredths(0.352_941_1), 0.35);
        assert_eq!(round_hundredths(0.125), 0.12);
        assert_eq!(round_hundredths(0.375), 0.38);
        assert_eq!(hours_to_minutes(2.65), 159);
        assert_eq!(hours_to_minutes(0.35), 21);
        assert_eq!(hours_to_minutes(0.0125), 1);
        assert_eq!(hours_to_minutes(0.0), 0);
    }

    #[test]
    fn rounding_uses_the_stored_value_near_ties() {
        // Both are stored just below the half-way point.
        assert_eq!(round_hundredths(1.005), 1.0);
        assert_eq!(round_hundredths(1.5 / 10.0 * (190.0 / 60.0)), 0.47);
        // Exactly representable tie.
        assert_eq!(round_hundredths(7.5 / 10.0 * (190.0 / 60.0)), 2.38);
    }

    #[test]
    fn huge_budget_saturates_instead_of_overflowing() {
        let subjects = vec![
            subject("Math", 4, date(2026, 10, 20)),
            subject("History", 2, date(2026, 10, 20)),
        ];
        let records = generate(&subjects, monday(), f64::INFINITY, f64::INFINITY);
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.minutes == u32::MAX));
    }

    #[test]
    fn empty_subjects_yield_no_records() {
        assert!(generate(&[], monday(), 2.0, 4.0).is_empty());
    }

    #[test]
    fn single_subject_gets_the_whole_budget() {
        let start = monday();
        let exam = date(2026, 10, 24); // Saturday, start + 5
        let records = generate(&[subject("Math", 4, exam)], start, 2.0, 4.0);

        assert_eq!(records.len(), 6);
        let first = &records[0];
        assert_eq!(first.date, start);
        assert_eq!(first.minutes, 120);
        assert_eq!(first.intensity, Intensity::Medium);
        assert_eq!(first.event, EventKind::Study);

        let last = records.last().unwrap();
        assert_eq!(last.date, exam);
        assert_eq!(last.minutes, 240);
        assert_eq!(last.intensity, Intensity::High);
        assert_eq!(last.event, EventKind::Exam);
    }

    #[test]
    fn single_subject_exam_on_weekday() {
        let start = monday();
        let exam = date(2026, 10, 23); // Friday
        let records = generate(&[subject("Math", 4, exam)], start, 2.0, 4.0);
        let last = records.last().unwrap();
        assert_eq!(last.date, exam);
        assert_eq!(last.minutes, 120);
        assert_eq!(last.event, EventKind::Exam);
    }

    #[test]
    fn weights_split_budget_proportionally() {
        let start = monday();
        let subjects = vec![
            subject("A", 5, start + chrono::Days::new(2)),
            subject("B", 1, start + chrono::Days::new(10)),
        ];
        let records = generate(&subjects, start, 3.0, 3.0);
        let day_one: Vec<_> = records.iter().filter(|r| r.date == start).collect();

        assert_eq!(day_one.len(), 2);
        assert_eq!(day_one[0].subject, "A");
        assert_eq!(day_one[0].minutes, 159);
        assert_eq!(day_one[0].intensity, Intensity::High);
        assert_eq!(day_one[1].subject, "B");
        assert_eq!(day_one[1].minutes, 21);
        assert_eq!(day_one[1].intensity, Intensity::Low);
    }

    #[test]
    fn past_exams_are_skipped() {
        let start = monday();
        let subjects = vec![
            subject("Old", 5, date(2026, 10, 1)),
            subject("New", 2, date(2026, 10, 20)),
        ];
        let records = generate(&subjects, start, 2.0, 4.0);
        assert!(records.iter().all(|r| r.subject == "New"));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn only_past_exams_yield_nothing() {
        let records = generate(&[subject("Old", 5, date(2026, 10, 1))], monday(), 2.0, 4.0);
        assert!(records.is_empty());
    }

    #[test]
    fn exam_on_start_day_is_a_single_exam_record() {
        let start = monday();
        let records = generate(&[subject("Bio", 2, start)], start, 1.5, 4.0);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event, EventKind::Exam);
        assert_eq!(records[0].minutes, 90);
    }

    #[test]
    fn zero_budget_emits_nothing() {
        let start = monday();
        let records = generate(
            &[subject("A", 3, date(2026, 10, 21)), subject("B", 3, date(2026, 10, 22))],
            start,
            0.0,
            0.0,
        );
        assert!(records.is_empty());
    }

    #[test]
    fn weekend_budget_applies_on_weekends() {
        let start = date(2026, 10, 24); // Saturday
        let records = generate(&[subject("Art", 1, date(2026, 10, 26))], start, 1.0, 3.0);
        assert_eq!(records[0].minutes, 180);
        assert_eq!(records[1].minutes, 180);
        assert_eq!(records[2].minutes, 60);
    }

    #[test]
    fn floor_lifts_tiny_shares_before_rescale() {
        // 0.2h across weights 9 and 1 rounds to 0.18 and 0.02; the floor
        // lifts the second to 0.1 and the day is scaled back into budget.
        let shares = split_budget(&[9.0, 1.0], 0.2);
        assert_eq!(shares, vec![0.13, 0.07]);
        // The rescaled share is allowed to sit below the floor.
        assert!(shares[1] < MIN_SHARE_HOURS);
    }

    #[test]
    fn split_budget_handles_degenerate_weights() {
        assert!(split_budget(&[], 2.0).is_empty());
        assert_eq!(split_budget(&[0.0, 0.0], 2.0), vec![0.0, 0.0]);
    }

    #[test]
    fn many_subjects_stay_within_tolerance() {
        let start = monday();
        let subjects: Vec<Subject> = (0..12)
            .map(|i| subject(&format!("S{i}"), (i % 5 + 1) as u8, date(2026, 10, 30)))
            .collect();
        let records = generate(&subjects, start, 0.5, 0.5);
        for day in start.iter_days().take(12) {
            let total: u32 = records.iter().filter(|r| r.date == day).map(|r| r.minutes).sum();
            assert!(total <= 30 + 12 * 6, "{day}: {total} minutes");
        }
    }

    #[test]
    fn generate_is_deterministic() {
        let start = monday();
        let subjects = vec![
            subject("Math", 4, date(2026, 11, 3)),
            subject("History", 2, date(2026, 10, 27)),
        ];
        assert_eq!(
            generate(&subjects, start, 2.0, 4.0),
            generate(&subjects, start, 2.0, 4.0)
        );
    }

    #[test]
    fn prune_removes_subject_and_reports_absence() {
        let start = monday();
        let subjects = vec![
            subject("Math", 4, date(2026, 10, 22)),
            subject("History", 2, date(2026, 10, 21)),
        ];
        let records = generate(&subjects, start, 2.0, 4.0);

        let pruned = prune(records.clone(), "History").unwrap();
        assert!(pruned.iter().all(|r| r.subject == "Math"));
        assert!(prune(pruned, "Math").is_none());

        let untouched = prune(records.clone(), "Chemistry").unwrap();
        assert_eq!(untouched, records);
    }
}
