//! Timetabling domain models.
//!
//! Core data types for representing a school's weekly scheduling
//! problem and its solution. Read-side entities (`ClassUnit`,
//! `Subject`, `Teacher`) are supplied by the persistence layer;
//! write-side entities (`Assignment`, `Timetable`) are produced by
//! the solver.
//!
//! # Domain Mapping
//!
//! | classtime | CSP term |
//! |-----------|----------|
//! | Slot | Domain value |
//! | (class, subject) period | Variable |
//! | Assignment | Committed binding |
//! | Teacher/room/class busy-set | Constraint store |

mod class_unit;
mod subject;
mod teacher;
mod time;
mod timetable;

pub use class_unit::{ClassUnit, ScheduleConfig, DEFAULT_PERIOD_MINUTES, TRANSITION_MINUTES};
pub use subject::Subject;
pub use teacher::Teacher;
pub use time::{ClockTime, ClockTimeParseError, TimeWindow, Weekday};
pub use timetable::{Assignment, Clash, ClashKind, Slot, Timetable};
