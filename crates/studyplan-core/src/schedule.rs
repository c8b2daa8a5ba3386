//! Generated schedules and the read-side queries the CLI renders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::allocator::{self, AllocationRecord, EventKind};

/// A generated schedule.
///
/// May be empty when the allocator had nothing to assign. An absent schedule
/// is modelled as `Option<Schedule>::None` by the owner, never as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    records: Vec<AllocationRecord>,
}

/// One subject's slice of the schedule, sorted by date.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectPlan<'a> {
    pub subject: &'a str,
    pub records: Vec<&'a AllocationRecord>,
}

impl SubjectPlan<'_> {
    /// Minutes across study days only; the exam day itself is not counted.
    pub fn study_minutes(&self) -> u32 {
        self.records
            .iter()
            .filter(|r| r.event == EventKind::Study)
            .map(|r| r.minutes)
            .sum()
    }
}

/// What is planned for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_minutes: u32,
    /// Per-subject minutes in schedule order.
    pub subjects: Vec<(String, u32)>,
}

impl Schedule {
    pub fn new(records: Vec<AllocationRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AllocationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct subject names in order of first appearance.
    pub fn subjects(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.subject.as_str()) {
                names.push(&record.subject);
            }
        }
        names
    }

    /// Group records per subject, each group sorted by date.
    pub fn by_subject(&self) -> Vec<SubjectPlan<'_>> {
        self.subjects()
            .into_iter()
            .map(|subject| {
                let mut records: Vec<&AllocationRecord> =
                    self.records.iter().filter(|r| r.subject == subject).collect();
                records.sort_by_key(|r| r.date);
                SubjectPlan { subject, records }
            })
            .collect()
    }

    /// Total minutes planned for `subject` on study days.
    pub fn study_minutes(&self, subject: &str) -> u32 {
        self.records
            .iter()
            .filter(|r| r.subject == subject && r.event == EventKind::Study)
            .map(|r| r.minutes)
            .sum()
    }

    /// Everything planned on `date`, or `None` if nothing is.
    pub fn day_summary(&self, date: NaiveDate) -> Option<DaySummary> {
        let mut subjects: Vec<(String, u32)> = Vec::new();
        for record in self.records.iter().filter(|r| r.date == date) {
            match subjects.iter_mut().find(|(name, _)| *name == record.subject) {
                Some((_, minutes)) => *minutes += record.minutes,
                None => subjects.push((record.subject.clone(), record.minutes)),
            }
        }
        if subjects.is_empty() {
            return None;
        }
        Some(DaySummary {
            date,
            total_minutes: subjects.iter().map(|(_, m)| m).sum(),
            subjects,
        })
    }

    /// Remove `subject` from the schedule. `None` if nothing remains.
    pub fn prune(self, subject: &str) -> Option<Schedule> {
        allocator::prune(self.records, subject).map(Schedule::new)
    }
}

/// Human-readable duration: "45m", "2h", "2h 5m".
pub fn format_minutes(minutes: u32) -> String {
    let (hours, rest) = (minutes / 60, minutes % 60);
    match (hours, rest) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}
