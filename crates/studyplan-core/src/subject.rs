//! Subjects under study and the daily time budget they share.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Upper bound for the weekday budget, in minutes.
pub const MAX_WEEKDAY_MINUTES: u32 = 600;
/// Upper bound for the weekend budget, in minutes.
pub const MAX_WEEKEND_MINUTES: u32 = 900;

/// Perceived difficulty of a subject, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Clamp `value` into the valid range.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Clamp any integer input, including negatives.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::clamped)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(3)
    }
}

impl From<u8> for Difficulty {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}

/// A subject with an upcoming exam.
///
/// The name identifies the subject within a set; the allocator and the
/// deletion cascade both match on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub exam_date: NaiveDate,
}

impl Subject {
    /// Build a subject from user input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if the trimmed name is empty.
    pub fn new(
        name: impl AsRef<str>,
        difficulty: impl Into<Difficulty>,
        exam_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            difficulty: difficulty.into(),
            exam_date,
        })
    }

    /// Whole days from `day` until the exam. Negative once the exam has passed.
    pub fn days_left(&self, day: NaiveDate) -> i64 {
        (self.exam_date - day).num_days()
    }

    /// Whether the subject is studied on `day` for a plan starting at `start`.
    pub fn is_active_on(&self, start: NaiveDate, day: NaiveDate) -> bool {
        start <= day && day <= self.exam_date
    }
}

/// Study minutes available per day, split by weekday and weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyBudget {
    weekday_minutes: u32,
    weekend_minutes: u32,
}

impl StudyBudget {
    /// Clamp both budgets into their allowed ranges.
    pub fn new(weekday_minutes: u32, weekend_minutes: u32) -> Self {
        Self {
            weekday_minutes: weekday_minutes.min(MAX_WEEKDAY_MINUTES),
            weekend_minutes: weekend_minutes.min(MAX_WEEKEND_MINUTES),
        }
    }

    pub fn weekday_minutes(&self) -> u32 {
        self.weekday_minutes
    }

    pub fn weekend_minutes(&self) -> u32 {
        self.weekend_minutes
    }

    pub fn weekday_hours(&self) -> f64 {
        f64::from(self.weekday_minutes) / 60.0
    }

    pub fn weekend_hours(&self) -> f64 {
        f64::from(self.weekend_minutes) / 60.0
    }
}

impl Default for StudyBudget {
    fn default() -> Self {
        Self::new(120, 240)
    }
}

/// Parse a `YYYY-MM-DD` date as entered on the command line or in a plan file.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] when the text is not a valid date.
pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(text.to_string()))
}
