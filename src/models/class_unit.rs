//! Class (grade-section) model and its weekly schedule configuration.
//!
//! A `ClassUnit` is a single group of students that needs one complete
//! weekly timetable. Its `ScheduleConfig` drives period generation:
//! day boundaries, break and lunch windows, period length, and the
//! optional transition buffer between periods.

use serde::{Deserialize, Serialize};

use super::time::{ClockTime, TimeWindow};

/// Minutes added between consecutive periods when transitions are enabled.
pub const TRANSITION_MINUTES: u16 = 5;

/// Default period length when none is configured.
pub const DEFAULT_PERIOD_MINUTES: u16 = 45;

/// Weekly schedule configuration for one class.
///
/// All fields are optional: a config with no first/last period times
/// degrades to a fixed default grid rather than failing (see
/// [`crate::periods::weekly_periods`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Start of the first period. `None` = use the default grid.
    pub first_period_start: Option<ClockTime>,
    /// End of the last period on Monday–Thursday.
    pub last_period_end: Option<ClockTime>,
    /// End of the last period on Friday, when it differs.
    pub friday_last_period_end: Option<ClockTime>,
    /// Period length in minutes. `None` = 45.
    pub period_duration_minutes: Option<u16>,
    /// Morning break window, if the class has one.
    pub break_window: Option<TimeWindow>,
    /// Lunch window, if the class has one.
    pub lunch_window: Option<TimeWindow>,
    /// Whether a 5-minute transition buffer separates periods.
    pub include_transition_time: bool,
}

impl ScheduleConfig {
    /// Creates an empty configuration (degrades to the default grid).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the day boundaries.
    pub fn with_day(mut self, first_start: ClockTime, last_end: ClockTime) -> Self {
        self.first_period_start = Some(first_start);
        self.last_period_end = Some(last_end);
        self
    }

    /// Sets a Friday-specific end time.
    pub fn with_friday_end(mut self, end: ClockTime) -> Self {
        self.friday_last_period_end = Some(end);
        self
    }

    /// Sets the period length in minutes.
    pub fn with_period_minutes(mut self, minutes: u16) -> Self {
        self.period_duration_minutes = Some(minutes);
        self
    }

    /// Sets the break window.
    pub fn with_break(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.break_window = Some(TimeWindow::new(start, end));
        self
    }

    /// Sets the lunch window.
    pub fn with_lunch(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.lunch_window = Some(TimeWindow::new(start, end));
        self
    }

    /// Enables the 5-minute transition buffer between periods.
    pub fn with_transition_time(mut self) -> Self {
        self.include_transition_time = true;
        self
    }
}

/// A class (grade-section) requiring a weekly timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassUnit {
    /// Unique class identifier.
    pub id: String,
    /// Human-readable name (e.g., "Grade 7B").
    pub name: String,
    /// Numeric grade level.
    pub grade_level: i32,
    /// Academic year label (e.g., "2025/2026").
    pub academic_year: String,
    /// Weekly schedule configuration.
    pub schedule: ScheduleConfig,
}

impl ClassUnit {
    /// Creates a new class with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            grade_level: 0,
            academic_year: String::new(),
            schedule: ScheduleConfig::default(),
        }
    }

    /// Sets the class name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the grade level.
    pub fn with_grade_level(mut self, grade_level: i32) -> Self {
        self.grade_level = grade_level;
        self
    }

    /// Sets the academic year.
    pub fn with_academic_year(mut self, year: impl Into<String>) -> Self {
        self.academic_year = year.into();
        self
    }

    /// Sets the schedule configuration.
    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_builder() {
        let class = ClassUnit::new("C1")
            .with_name("Grade 7B")
            .with_grade_level(7)
            .with_academic_year("2025/2026")
            .with_schedule(
                ScheduleConfig::new()
                    .with_day(ClockTime::hm(8, 0), ClockTime::hm(15, 0))
                    .with_friday_end(ClockTime::hm(13, 0))
                    .with_period_minutes(40)
                    .with_break(ClockTime::hm(10, 0), ClockTime::hm(10, 30))
                    .with_lunch(ClockTime::hm(12, 30), ClockTime::hm(13, 30))
                    .with_transition_time(),
            );

        assert_eq!(class.id, "C1");
        assert_eq!(class.name, "Grade 7B");
        assert_eq!(class.grade_level, 7);
        assert_eq!(class.schedule.period_duration_minutes, Some(40));
        assert!(class.schedule.include_transition_time);
        assert_eq!(
            class.schedule.friday_last_period_end,
            Some(ClockTime::hm(13, 0))
        );
    }

    #[test]
    fn test_empty_config_degrades() {
        let config = ScheduleConfig::new();
        assert!(config.first_period_start.is_none());
        assert!(config.last_period_end.is_none());
        assert!(!config.include_transition_time);
    }
}
