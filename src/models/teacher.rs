//! Teacher model.
//!
//! Teachers carry a fixed eligibility set: the subjects they may be
//! assigned to teach. Eligibility is many-to-many and does not change
//! during a solver run.

use serde::{Deserialize, Serialize};

/// A teacher with a subject-eligibility set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// IDs of subjects this teacher is eligible to teach.
    pub subjects_taught: Vec<String>,
}

impl Teacher {
    /// Creates a new teacher with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subjects_taught: Vec::new(),
        }
    }

    /// Sets the teacher name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a subject this teacher can teach.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subjects_taught.push(subject_id.into());
        self
    }

    /// Replaces the full eligibility set.
    pub fn with_subjects(mut self, subject_ids: Vec<String>) -> Self {
        self.subjects_taught = subject_ids;
        self
    }

    /// Whether this teacher is eligible for a subject.
    pub fn can_teach(&self, subject_id: &str) -> bool {
        self.subjects_taught.iter().any(|s| s == subject_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_eligibility() {
        let t = Teacher::new("T1")
            .with_name("A. Banda")
            .with_subject("MATH")
            .with_subject("PHY");
        assert!(t.can_teach("MATH"));
        assert!(t.can_teach("PHY"));
        assert!(!t.can_teach("ENG"));
    }

    #[test]
    fn test_teacher_no_subjects() {
        let t = Teacher::new("T1");
        assert!(!t.can_teach("MATH"));
        assert!(t.subjects_taught.is_empty());
    }
}
