//! Persistence seam.
//!
//! The solver is a library; the surrounding system owns the database.
//! [`TimetableStore`] is the narrow interface the orchestration layer
//! consumes: bulk reads of the tenant's entities up front, one atomic
//! replace of the timetable at the end. [`InMemoryStore`] is the
//! reference implementation used by tests.

use std::fmt;

use crate::models::{Assignment, ClassUnit, Subject, Teacher};

/// A persistence-layer failure surfaced to orchestration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    /// Human-readable description.
    pub message: String,
}

impl StoreError {
    /// Creates a store error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for StoreError {}

/// Read/write access to a school's timetabling entities.
///
/// All reads are scoped to one school (tenant). `replace_timetable`
/// must be atomic from the caller's perspective: a reader never sees a
/// cleared-but-not-rewritten timetable.
pub trait TimetableStore {
    /// Classes of a school, optionally filtered by academic year.
    fn classes(
        &self,
        school_id: &str,
        academic_year: Option<&str>,
    ) -> Result<Vec<ClassUnit>, StoreError>;

    /// Subjects of a school.
    fn subjects(&self, school_id: &str) -> Result<Vec<Subject>, StoreError>;

    /// Teachers of a school, with their eligibility sets.
    fn teachers(&self, school_id: &str) -> Result<Vec<Teacher>, StoreError>;

    /// Writes a freshly generated timetable.
    ///
    /// When `clear_existing` is set, prior entries for the school (and
    /// academic year, when given) are deleted in the same atomic
    /// operation before the new ones are written. When it is not set,
    /// old and new entries coexist.
    fn replace_timetable(
        &mut self,
        school_id: &str,
        academic_year: Option<&str>,
        clear_existing: bool,
        entries: &[Assignment],
    ) -> Result<(), StoreError>;
}

/// In-memory store, scoped per school.
///
/// Backs the test suites and serves as the reference for what the
/// trait's filtering and clearing semantics mean.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    classes: Vec<(String, ClassUnit)>,
    subjects: Vec<(String, Subject)>,
    teachers: Vec<(String, Teacher)>,
    saved: Vec<(String, Assignment)>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class under a school.
    pub fn add_class(&mut self, school_id: impl Into<String>, class: ClassUnit) {
        self.classes.push((school_id.into(), class));
    }

    /// Adds a subject under a school.
    pub fn add_subject(&mut self, school_id: impl Into<String>, subject: Subject) {
        self.subjects.push((school_id.into(), subject));
    }

    /// Adds a teacher under a school.
    pub fn add_teacher(&mut self, school_id: impl Into<String>, teacher: Teacher) {
        self.teachers.push((school_id.into(), teacher));
    }

    /// All stored timetable entries for a school.
    pub fn saved_entries(&self, school_id: &str) -> Vec<&Assignment> {
        self.saved
            .iter()
            .filter(|(s, _)| s == school_id)
            .map(|(_, e)| e)
            .collect()
    }

    /// Academic year of the class a stored entry belongs to.
    fn entry_year(&self, school_id: &str, entry: &Assignment) -> Option<String> {
        self.classes
            .iter()
            .find(|(s, c)| s == school_id && c.id == entry.class_id)
            .map(|(_, c)| c.academic_year.clone())
    }
}

impl TimetableStore for InMemoryStore {
    fn classes(
        &self,
        school_id: &str,
        academic_year: Option<&str>,
    ) -> Result<Vec<ClassUnit>, StoreError> {
        Ok(self
            .classes
            .iter()
            .filter(|(s, c)| {
                s == school_id && academic_year.is_none_or(|year| c.academic_year == year)
            })
            .map(|(_, c)| c.clone())
            .collect())
    }

    fn subjects(&self, school_id: &str) -> Result<Vec<Subject>, StoreError> {
        Ok(self
            .subjects
            .iter()
            .filter(|(s, _)| s == school_id)
            .map(|(_, subject)| subject.clone())
            .collect())
    }

    fn teachers(&self, school_id: &str) -> Result<Vec<Teacher>, StoreError> {
        Ok(self
            .teachers
            .iter()
            .filter(|(s, _)| s == school_id)
            .map(|(_, t)| t.clone())
            .collect())
    }

    fn replace_timetable(
        &mut self,
        school_id: &str,
        academic_year: Option<&str>,
        clear_existing: bool,
        entries: &[Assignment],
    ) -> Result<(), StoreError> {
        if clear_existing {
            let doomed: Vec<usize> = self
                .saved
                .iter()
                .enumerate()
                .filter(|(_, (s, e))| {
                    s == school_id
                        && academic_year.is_none_or(|year| {
                            self.entry_year(school_id, e).as_deref() == Some(year)
                        })
                })
                .map(|(i, _)| i)
                .collect();
            for i in doomed.into_iter().rev() {
                self.saved.remove(i);
            }
        }
        self.saved
            .extend(entries.iter().map(|e| (school_id.to_string(), e.clone())));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClockTime, Weekday};

    fn entry(class: &str) -> Assignment {
        Assignment {
            class_id: class.into(),
            subject_id: "MATH".into(),
            teacher_id: "T1".into(),
            room: "Room 1".into(),
            day: Weekday::Monday,
            start: ClockTime::hm(8, 0),
            end: ClockTime::hm(8, 45),
        }
    }

    fn seeded_store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        store.add_class(
            "school-1",
            ClassUnit::new("C1").with_academic_year("2025/2026"),
        );
        store.add_class(
            "school-1",
            ClassUnit::new("C2").with_academic_year("2024/2025"),
        );
        store.add_class("school-2", ClassUnit::new("C3"));
        store.add_subject("school-1", Subject::new("MATH"));
        store.add_teacher("school-1", Teacher::new("T1").with_subject("MATH"));
        store
    }

    #[test]
    fn test_reads_are_school_scoped() {
        let store = seeded_store();
        assert_eq!(store.classes("school-1", None).unwrap().len(), 2);
        assert_eq!(store.classes("school-2", None).unwrap().len(), 1);
        assert_eq!(store.subjects("school-2").unwrap().len(), 0);
        assert_eq!(store.teachers("school-1").unwrap().len(), 1);
    }

    #[test]
    fn test_class_year_filter() {
        let store = seeded_store();
        let classes = store.classes("school-1", Some("2025/2026")).unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].id, "C1");
    }

    #[test]
    fn test_replace_clears_only_requested_school() {
        let mut store = seeded_store();
        store
            .replace_timetable("school-1", None, false, &[entry("C1")])
            .unwrap();
        store
            .replace_timetable("school-2", None, false, &[entry("C3")])
            .unwrap();

        store
            .replace_timetable("school-1", None, true, &[entry("C2")])
            .unwrap();
        assert_eq!(store.saved_entries("school-1").len(), 1);
        assert_eq!(store.saved_entries("school-2").len(), 1);
    }

    #[test]
    fn test_replace_year_filtered_clear() {
        let mut store = seeded_store();
        store
            .replace_timetable("school-1", None, false, &[entry("C1"), entry("C2")])
            .unwrap();

        // Clearing only 2025/2026 removes C1's entry, keeps C2's
        store
            .replace_timetable("school-1", Some("2025/2026"), true, &[entry("C1")])
            .unwrap();
        let saved = store.saved_entries("school-1");
        assert_eq!(saved.len(), 2);
        assert!(saved.iter().any(|e| e.class_id == "C2"));
    }

    #[test]
    fn test_no_clear_coexists() {
        let mut store = seeded_store();
        store
            .replace_timetable("school-1", None, false, &[entry("C1")])
            .unwrap();
        store
            .replace_timetable("school-1", None, false, &[entry("C1")])
            .unwrap();
        assert_eq!(store.saved_entries("school-1").len(), 2);
    }
}
