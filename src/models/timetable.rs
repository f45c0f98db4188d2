//! Timetable (solution) model.
//!
//! A timetable is a complete set of bookings: each entry places one
//! subject, taught by one teacher, in one room, into one of a class's
//! weekly slots. Query helpers and clash detection support both the
//! orchestration layer and invariant checks in tests.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::time::{ClockTime, Weekday};

/// A bookable time window generated from a class's schedule configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Day of the school week.
    pub day: Weekday,
    /// Period start.
    pub start: ClockTime,
    /// Period end.
    pub end: ClockTime,
}

impl Slot {
    /// Creates a new slot.
    pub fn new(day: Weekday, start: ClockTime, end: ClockTime) -> Self {
        Self { day, start, end }
    }
}

/// A committed (class, slot, subject, teacher, room) booking.
///
/// Field set matches the persisted timetable row: the store writes these
/// verbatim on a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Class receiving the lesson.
    pub class_id: String,
    /// Subject taught.
    pub subject_id: String,
    /// Teacher assigned.
    pub teacher_id: String,
    /// Room label (e.g., "Room 3").
    pub room: String,
    /// Day of the week.
    pub day: Weekday,
    /// Period start.
    pub start: ClockTime,
    /// Period end.
    pub end: ClockTime,
}

/// A double-booking found in a timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clash {
    /// What kind of entity is double-booked.
    pub kind: ClashKind,
    /// Offending entity ID (teacher, room, or class).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of double-bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClashKind {
    /// Same teacher booked twice at one (day, start).
    Teacher,
    /// Same room booked twice at one (day, start).
    Room,
    /// Same class booked twice at one (day, start).
    Class,
}

/// A complete weekly timetable (solution container).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timetable {
    /// All committed bookings.
    pub entries: Vec<Assignment>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a booking.
    pub fn add_entry(&mut self, entry: Assignment) {
        self.entries.push(entry);
    }

    /// Number of bookings.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// All bookings for a given class.
    pub fn entries_for_class(&self, class_id: &str) -> Vec<&Assignment> {
        self.entries
            .iter()
            .filter(|e| e.class_id == class_id)
            .collect()
    }

    /// All bookings for a given teacher.
    pub fn entries_for_teacher(&self, teacher_id: &str) -> Vec<&Assignment> {
        self.entries
            .iter()
            .filter(|e| e.teacher_id == teacher_id)
            .collect()
    }

    /// All bookings in a given room.
    pub fn entries_for_room(&self, room: &str) -> Vec<&Assignment> {
        self.entries.iter().filter(|e| e.room == room).collect()
    }

    /// Bookings of a subject for a class.
    pub fn subject_count(&self, class_id: &str, subject_id: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.class_id == class_id && e.subject_id == subject_id)
            .count()
    }

    /// Detects every teacher, room, and class double-booking.
    ///
    /// A valid timetable returns an empty list: for each teacher, room,
    /// and class, every `(day, start)` pair appears at most once.
    pub fn clashes(&self) -> Vec<Clash> {
        let mut clashes = Vec::new();
        let mut teacher_seen: HashMap<(&str, Weekday, ClockTime), u32> = HashMap::new();
        let mut room_seen: HashMap<(&str, Weekday, ClockTime), u32> = HashMap::new();
        let mut class_seen: HashMap<(&str, Weekday, ClockTime), u32> = HashMap::new();

        for e in &self.entries {
            *teacher_seen
                .entry((e.teacher_id.as_str(), e.day, e.start))
                .or_insert(0) += 1;
            *room_seen.entry((e.room.as_str(), e.day, e.start)).or_insert(0) += 1;
            *class_seen
                .entry((e.class_id.as_str(), e.day, e.start))
                .or_insert(0) += 1;
        }

        for ((id, day, start), count) in teacher_seen {
            if count > 1 {
                clashes.push(Clash {
                    kind: ClashKind::Teacher,
                    entity_id: id.to_string(),
                    message: format!("Teacher '{id}' booked {count} times on {day} at {start}"),
                });
            }
        }
        for ((id, day, start), count) in room_seen {
            if count > 1 {
                clashes.push(Clash {
                    kind: ClashKind::Room,
                    entity_id: id.to_string(),
                    message: format!("Room '{id}' booked {count} times on {day} at {start}"),
                });
            }
        }
        for ((id, day, start), count) in class_seen {
            if count > 1 {
                clashes.push(Clash {
                    kind: ClashKind::Class,
                    entity_id: id.to_string(),
                    message: format!("Class '{id}' booked {count} times on {day} at {start}"),
                });
            }
        }

        clashes
    }

    /// Whether the timetable has no double-bookings.
    pub fn is_clash_free(&self) -> bool {
        self.clashes().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(class: &str, subject: &str, teacher: &str, room: &str, day: Weekday, h: u16) -> Assignment {
        Assignment {
            class_id: class.into(),
            subject_id: subject.into(),
            teacher_id: teacher.into(),
            room: room.into(),
            day,
            start: ClockTime::hm(h, 0),
            end: ClockTime::hm(h, 45),
        }
    }

    fn sample_timetable() -> Timetable {
        let mut t = Timetable::new();
        t.add_entry(entry("C1", "MATH", "T1", "Room 1", Weekday::Monday, 8));
        t.add_entry(entry("C1", "ENG", "T2", "Room 1", Weekday::Monday, 9));
        t.add_entry(entry("C2", "MATH", "T1", "Room 2", Weekday::Monday, 9));
        t
    }

    #[test]
    fn test_queries() {
        let t = sample_timetable();
        assert_eq!(t.entry_count(), 3);
        assert_eq!(t.entries_for_class("C1").len(), 2);
        assert_eq!(t.entries_for_teacher("T1").len(), 2);
        assert_eq!(t.entries_for_room("Room 1").len(), 2);
        assert_eq!(t.subject_count("C1", "MATH"), 1);
        assert_eq!(t.subject_count("C3", "MATH"), 0);
    }

    #[test]
    fn test_clash_free() {
        let t = sample_timetable();
        assert!(t.is_clash_free());
    }

    #[test]
    fn test_teacher_clash_detected() {
        let mut t = sample_timetable();
        // T1 already teaches C2 on Monday 09:00
        t.add_entry(entry("C3", "MATH", "T1", "Room 3", Weekday::Monday, 9));
        let clashes = t.clashes();
        assert!(clashes.iter().any(|c| c.kind == ClashKind::Teacher && c.entity_id == "T1"));
    }

    #[test]
    fn test_room_and_class_clash_detected() {
        let mut t = sample_timetable();
        // Room 1 and C1 both double-booked on Monday 08:00
        t.add_entry(entry("C1", "PHY", "T3", "Room 1", Weekday::Monday, 8));
        let clashes = t.clashes();
        assert!(clashes.iter().any(|c| c.kind == ClashKind::Room));
        assert!(clashes.iter().any(|c| c.kind == ClashKind::Class));
    }

    #[test]
    fn test_assignment_serde_shape() {
        let e = entry("C1", "MATH", "T1", "Room 1", Weekday::Monday, 8);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["day"], "Monday");
        assert_eq!(json["start"], "08:00");
        assert_eq!(json["end"], "08:45");
        let back: Assignment = serde_json::from_value(json).unwrap();
        assert_eq!(back, e);
    }
}
