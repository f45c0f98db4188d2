//! Period-slot generation.
//!
//! Converts a class's [`ScheduleConfig`] into the ordered list of
//! bookable time windows per weekday. The walk runs at one-minute
//! resolution from the first-period start, jumping over break and
//! lunch windows and emitting periods until the day ends.
//!
//! # Failure Semantics
//! This module never errors. Missing day boundaries degrade to a fixed
//! default grid; misconfigured inputs (end before start, a barrier
//! window wider than the day) produce a short or empty day, which the
//! solver later reports as infeasibility.

use std::collections::HashMap;

use log::debug;

use crate::models::{
    ClassUnit, ClockTime, ScheduleConfig, Slot, TimeWindow, Weekday, DEFAULT_PERIOD_MINUTES,
    TRANSITION_MINUTES,
};

/// Shortest gap (minutes) still worth emitting as a period.
pub const MIN_PERIOD_MINUTES: u16 = 10;

/// Hard cap on walk passes per day, against misconfigured inputs.
const MAX_PASSES: u32 = 50;

/// Generates the weekly period grid for a schedule configuration.
///
/// Returns one ordered period list per weekday. Friday uses the
/// Friday-specific end time when configured. If the day boundaries are
/// absent the fixed six-slot default grid is returned for all five
/// days — degraded but deterministic, never an error.
pub fn weekly_periods(config: &ScheduleConfig) -> HashMap<Weekday, Vec<TimeWindow>> {
    let (first_start, last_end) = match (config.first_period_start, config.last_period_end) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            debug!("schedule config missing day boundaries, using default grid");
            return Weekday::ALL
                .iter()
                .map(|&day| (day, default_day_grid()))
                .collect();
        }
    };

    let friday_end = config.friday_last_period_end.unwrap_or(last_end);

    Weekday::ALL
        .iter()
        .map(|&day| {
            let end = if day == Weekday::Friday { friday_end } else { last_end };
            (day, day_periods(config, first_start, end))
        })
        .collect()
}

/// Flattens a class's weekly grid into its slot list, in week order.
pub fn class_slots(class: &ClassUnit) -> Vec<Slot> {
    let grid = weekly_periods(&class.schedule);
    let mut slots = Vec::new();
    for day in Weekday::ALL {
        if let Some(periods) = grid.get(&day) {
            for window in periods {
                slots.push(Slot::new(day, window.start, window.end));
            }
        }
    }
    slots
}

/// Walks one day forward, emitting periods between barriers.
fn day_periods(config: &ScheduleConfig, first_start: ClockTime, last_end: ClockTime) -> Vec<TimeWindow> {
    let base_duration = config
        .period_duration_minutes
        .unwrap_or(DEFAULT_PERIOD_MINUTES);
    let transition = if config.include_transition_time {
        TRANSITION_MINUTES
    } else {
        0
    };
    // Transitions come out of the configured duration, not on top of it:
    // a 45-minute period with transitions is 40 teaching minutes + 5 buffer.
    let duration = base_duration.saturating_sub(transition).max(1);

    let break_window = valid_window(config.break_window);
    let lunch_window = valid_window(config.lunch_window);

    let mut periods = Vec::new();
    let mut current = first_start.minutes();
    let end = last_end.minutes();

    let mut passes = 0;
    while current < end && passes < MAX_PASSES {
        passes += 1;
        let previous = current;

        // Inside break or lunch: jump to its end.
        if let Some(w) = break_window {
            if current >= w.start.minutes() && current < w.end.minutes() {
                current = w.end.minutes();
                continue;
            }
        }
        if let Some(w) = lunch_window {
            if current >= w.start.minutes() && current < w.end.minutes() {
                current = w.end.minutes();
                continue;
            }
        }

        // Next barrier: break start, lunch start, or end of day.
        let mut barrier = end;
        if let Some(w) = break_window {
            if current < w.start.minutes() {
                barrier = barrier.min(w.start.minutes());
            }
        }
        if let Some(w) = lunch_window {
            if current < w.start.minutes() {
                barrier = barrier.min(w.start.minutes());
            }
        }

        let gap = barrier - current;
        let break_start = break_window.map(|w| w.start.minutes());
        let lunch_start = lunch_window.map(|w| w.start.minutes());

        if gap >= duration {
            let period_end = current + duration;
            periods.push(TimeWindow::new(
                ClockTime::from_minutes(current),
                ClockTime::from_minutes(period_end),
            ));
            current = period_end + transition;
        } else if gap >= MIN_PERIOD_MINUTES {
            // Shortened period filling the gap exactly, then jump the barrier.
            periods.push(TimeWindow::new(
                ClockTime::from_minutes(current),
                ClockTime::from_minutes(barrier),
            ));
            if Some(barrier) == break_start {
                current = break_window.map(|w| w.end.minutes()).unwrap_or(barrier);
            } else if Some(barrier) == lunch_start {
                current = lunch_window.map(|w| w.end.minutes()).unwrap_or(barrier);
            } else {
                current = barrier + transition;
            }
        } else if Some(barrier) == break_start {
            current = break_window.map(|w| w.end.minutes()).unwrap_or(barrier);
        } else if Some(barrier) == lunch_start {
            current = lunch_window.map(|w| w.end.minutes()).unwrap_or(barrier);
        } else {
            // Tail gap too small for a period.
            break;
        }

        // Monotonic progress guard.
        if current <= previous {
            current = previous + 1;
        }
    }

    periods
}

/// A window counts only when it has positive length.
fn valid_window(window: Option<TimeWindow>) -> Option<TimeWindow> {
    window.filter(|w| w.end > w.start)
}

/// The fixed fallback grid used when day boundaries are missing.
fn default_day_grid() -> Vec<TimeWindow> {
    [
        (8, 0, 8, 45),
        (8, 45, 9, 30),
        (9, 30, 10, 15),
        (10, 30, 11, 15),
        (11, 15, 12, 0),
        (14, 0, 14, 45),
    ]
    .iter()
    .map(|&(sh, sm, eh, em)| TimeWindow::new(ClockTime::hm(sh, sm), ClockTime::hm(eh, em)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(w: &TimeWindow) -> (String, String) {
        (w.start.to_string(), w.end.to_string())
    }

    #[test]
    fn test_default_grid_when_unconfigured() {
        let grid = weekly_periods(&ScheduleConfig::new());
        assert_eq!(grid.len(), 5);
        for day in Weekday::ALL {
            let periods = &grid[&day];
            assert_eq!(periods.len(), 6);
            assert_eq!(window(&periods[0]), ("08:00".into(), "08:45".into()));
            assert_eq!(window(&periods[5]), ("14:00".into(), "14:45".into()));
        }
    }

    #[test]
    fn test_plain_day_divides_evenly() {
        let config = ScheduleConfig::new()
            .with_day(ClockTime::hm(8, 0), ClockTime::hm(12, 0))
            .with_period_minutes(60);
        let grid = weekly_periods(&config);
        let monday = &grid[&Weekday::Monday];
        assert_eq!(monday.len(), 4);
        assert_eq!(window(&monday[0]), ("08:00".into(), "09:00".into()));
        assert_eq!(window(&monday[3]), ("11:00".into(), "12:00".into()));
    }

    #[test]
    fn test_break_jump_with_short_period() {
        let config = ScheduleConfig::new()
            .with_day(ClockTime::hm(8, 0), ClockTime::hm(12, 0))
            .with_period_minutes(45)
            .with_break(ClockTime::hm(10, 0), ClockTime::hm(10, 30));
        let monday = &weekly_periods(&config)[&Weekday::Monday];
        let got: Vec<_> = monday.iter().map(window).collect();
        assert_eq!(
            got,
            vec![
                ("08:00".into(), "08:45".into()),
                ("08:45".into(), "09:30".into()),
                // 30-minute gap before the break: shortened period
                ("09:30".into(), "10:00".into()),
                ("10:30".into(), "11:15".into()),
                ("11:15".into(), "12:00".into()),
            ]
        );
    }

    #[test]
    fn test_transition_shortens_periods() {
        let config = ScheduleConfig::new()
            .with_day(ClockTime::hm(8, 0), ClockTime::hm(9, 30))
            .with_period_minutes(45)
            .with_transition_time();
        let monday = &weekly_periods(&config)[&Weekday::Monday];
        // 40 teaching minutes + 5 buffer per period; 5-minute tail unused
        assert_eq!(
            monday.iter().map(window).collect::<Vec<_>>(),
            vec![
                ("08:00".into(), "08:40".into()),
                ("08:45".into(), "09:25".into()),
            ]
        );
    }

    #[test]
    fn test_friday_variant_end() {
        let config = ScheduleConfig::new()
            .with_day(ClockTime::hm(8, 0), ClockTime::hm(12, 0))
            .with_friday_end(ClockTime::hm(10, 0))
            .with_period_minutes(60);
        let grid = weekly_periods(&config);
        assert_eq!(grid[&Weekday::Thursday].len(), 4);
        assert_eq!(grid[&Weekday::Friday].len(), 2);
    }

    #[test]
    fn test_lunch_and_break_both_skipped() {
        let config = ScheduleConfig::new()
            .with_day(ClockTime::hm(8, 0), ClockTime::hm(15, 0))
            .with_period_minutes(60)
            .with_break(ClockTime::hm(10, 0), ClockTime::hm(10, 30))
            .with_lunch(ClockTime::hm(12, 30), ClockTime::hm(13, 30));
        let monday = &weekly_periods(&config)[&Weekday::Monday];
        for p in monday {
            let b = TimeWindow::new(ClockTime::hm(10, 0), ClockTime::hm(10, 30));
            let l = TimeWindow::new(ClockTime::hm(12, 30), ClockTime::hm(13, 30));
            assert!(!p.overlaps(&b), "period {:?} overlaps break", window(p));
            assert!(!p.overlaps(&l), "period {:?} overlaps lunch", window(p));
        }
        assert!(!monday.is_empty());
    }

    #[test]
    fn test_end_before_start_yields_empty_day() {
        let config = ScheduleConfig::new()
            .with_day(ClockTime::hm(14, 0), ClockTime::hm(8, 0));
        let grid = weekly_periods(&config);
        assert!(grid[&Weekday::Monday].is_empty());
    }

    #[test]
    fn test_zero_length_break_ignored() {
        let config = ScheduleConfig::new()
            .with_day(ClockTime::hm(8, 0), ClockTime::hm(10, 0))
            .with_period_minutes(60)
            .with_break(ClockTime::hm(9, 0), ClockTime::hm(9, 0));
        let monday = &weekly_periods(&config)[&Weekday::Monday];
        assert_eq!(monday.len(), 2);
    }

    #[test]
    fn test_barrier_wider_than_day_terminates() {
        // Lunch swallows the whole day; the pass cap must still hold.
        let config = ScheduleConfig::new()
            .with_day(ClockTime::hm(8, 0), ClockTime::hm(15, 0))
            .with_lunch(ClockTime::hm(7, 0), ClockTime::hm(16, 0));
        let grid = weekly_periods(&config);
        assert!(grid[&Weekday::Monday].is_empty());
    }

    #[test]
    fn test_class_slots_flatten_in_week_order() {
        let class = ClassUnit::new("C1").with_schedule(
            ScheduleConfig::new()
                .with_day(ClockTime::hm(8, 0), ClockTime::hm(10, 0))
                .with_period_minutes(60),
        );
        let slots = class_slots(&class);
        assert_eq!(slots.len(), 10); // 2 per day x 5 days
        assert_eq!(slots[0].day, Weekday::Monday);
        assert_eq!(slots[9].day, Weekday::Friday);
        assert_eq!(slots[0].start, ClockTime::hm(8, 0));
    }
}
