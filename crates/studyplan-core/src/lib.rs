//! # Studyplan Core Library
//!
//! This library provides the core logic for studyplan, an exam-driven study
//! planner. It follows a CLI-first philosophy: the allocator is a pure
//! function, and every interactive surface is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Allocator**: Splits each day's study budget across the subjects whose
//!   exams are still ahead, weighting by difficulty and exam proximity
//! - **Schedule**: Read-side queries over generated records (per-subject
//!   tables, study totals, a single day's goal) and the deletion cascade
//! - **Session**: Explicit in-memory state holding subjects, budget and the
//!   current schedule
//! - **Config**: TOML-based user preferences
//!
//! ## Key Components
//!
//! - [`generate`]: The allocator
//! - [`prune`]: Remove one subject's records from a schedule
//! - [`Session`]: Subjects plus the current schedule
//! - [`Config`]: Application configuration management

pub mod allocator;
pub mod config;
pub mod error;
pub mod plan;
pub mod schedule;
pub mod session;
pub mod subject;

pub use allocator::{generate, prune, AllocationRecord, EventKind, Intensity};
pub use config::Config;
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use plan::PlanFile;
pub use schedule::{format_minutes, DaySummary, Schedule, SubjectPlan};
pub use session::{Session, TodayGoal};
pub use subject::{parse_date, Difficulty, StudyBudget, Subject};
