//! TOML plan files.
//!
//! A plan file lists subjects and may pin the start date and budgets:
//!
//! ```toml
//! start_date = "2026-10-19"
//! weekday_minutes = 120
//! weekend_minutes = 240
//!
//! [[subjects]]
//! name = "Math"
//! difficulty = 4
//! exam_date = "2026-10-24"
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::Session;
use crate::subject::{StudyBudget, Subject};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend_minutes: Option<u32>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl PlanFile {
    /// Parse a plan from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a plan file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Budget from the file, falling back to `defaults` per field.
    pub fn budget(&self, defaults: StudyBudget) -> StudyBudget {
        StudyBudget::new(
            self.weekday_minutes.unwrap_or(defaults.weekday_minutes()),
            self.weekend_minutes.unwrap_or(defaults.weekend_minutes()),
        )
    }

    /// Build a session holding every subject of the plan.
    ///
    /// # Errors
    ///
    /// Fails on an empty or duplicate subject name.
    pub fn into_session(self, budget: StudyBudget) -> Result<Session> {
        let mut session = Session::new(budget);
        for subject in self.subjects {
            let subject = Subject::new(&subject.name, subject.difficulty, subject.exam_date)?;
            session.add_subject(subject)?;
        }
        Ok(session)
    }
}
