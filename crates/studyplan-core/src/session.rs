//! In-memory study session.
//!
//! Holds the registered subjects, the daily budget and the current schedule.
//! Nothing here is persisted; the owner keeps one `Session` for as long as
//! the user is working and drops it afterwards.

use chrono::NaiveDate;

use crate::allocator;
use crate::error::ValidationError;
use crate::schedule::{DaySummary, Schedule};
use crate::subject::{StudyBudget, Subject};

/// What the "today" view should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodayGoal {
    /// No schedule has been generated yet (or it was pruned away).
    NoSchedule,
    /// A schedule exists but nothing falls on the requested day.
    NothingPlanned,
    Planned(DaySummary),
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    subjects: Vec<Subject>,
    budget: StudyBudget,
    schedule: Option<Schedule>,
}

impl Session {
    pub fn new(budget: StudyBudget) -> Self {
        Self {
            subjects: Vec::new(),
            budget,
            schedule: None,
        }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn budget(&self) -> StudyBudget {
        self.budget
    }

    /// Change the budget. The current schedule is left as generated.
    pub fn set_budget(&mut self, budget: StudyBudget) {
        self.budget = budget;
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// Register a subject.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateSubject`] if the name is taken.
    pub fn add_subject(&mut self, subject: Subject) -> Result<(), ValidationError> {
        if self.subjects.iter().any(|s| s.name == subject.name) {
            return Err(ValidationError::DuplicateSubject(subject.name));
        }
        self.subjects.push(subject);
        Ok(())
    }

    /// Remove a subject and its records from the current schedule.
    ///
    /// If the schedule has nothing left afterwards it becomes absent.
    pub fn remove_subject(&mut self, name: &str) -> Option<Subject> {
        let index = self.subjects.iter().position(|s| s.name == name)?;
        let removed = self.subjects.remove(index);
        self.schedule = self.schedule.take().and_then(|s| s.prune(name));
        tracing::info!(
            subject = name,
            schedule_present = self.schedule.is_some(),
            "removed subject"
        );
        Some(removed)
    }

    /// Drop every subject and the schedule.
    pub fn clear(&mut self) {
        self.subjects.clear();
        self.schedule = None;
    }

    /// Rebuild the schedule from scratch.
    ///
    /// Does nothing and returns `None` while no subjects are registered. A
    /// schedule that comes out empty is still stored.
    pub fn regenerate(&mut self, start_date: NaiveDate) -> Option<&Schedule> {
        if self.subjects.is_empty() {
            return None;
        }
        let records = allocator::generate(
            &self.subjects,
            start_date,
            self.budget.weekday_hours(),
            self.budget.weekend_hours(),
        );
        tracing::info!(
            %start_date,
            subjects = self.subjects.len(),
            records = records.len(),
            "regenerated schedule"
        );
        self.schedule = Some(Schedule::new(records));
        self.schedule.as_ref()
    }

    pub fn today(&self, date: NaiveDate) -> TodayGoal {
        match &self.schedule {
            None => TodayGoal::NoSchedule,
            Some(schedule) => match schedule.day_summary(date) {
                Some(summary) => TodayGoal::Planned(summary),
                None => TodayGoal::NothingPlanned,
            },
        }
    }
}
