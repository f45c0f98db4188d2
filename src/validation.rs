//! Structural input validation.
//!
//! Checks the integrity of classes, subjects, teachers, and curriculum
//! before solving. Detects:
//! - Duplicate IDs
//! - Teacher eligibility referencing unknown subjects
//! - Curriculum referencing unknown classes or subjects
//! - Nonpositive weekly period counts
//!
//! Infeasibility is NOT a validation concern: an input can pass every
//! check here and still have no satisfying timetable.

use std::collections::HashSet;

use crate::models::{ClassUnit, Subject, Teacher};
use crate::solver::Curriculum;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A teacher's eligibility set names a subject that doesn't exist.
    UnknownSubjectReference,
    /// The curriculum names a class that doesn't exist.
    UnknownClassReference,
    /// A subject's weekly period requirement is zero.
    ZeroPeriodRequirement,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a timetable run.
///
/// Checks:
/// 1. No duplicate class IDs
/// 2. No duplicate subject IDs
/// 3. No duplicate teacher IDs
/// 4. Teacher eligibility sets reference existing subjects
/// 5. Curriculum class lists reference existing classes and subjects
/// 6. Every curriculum subject requires at least one weekly period
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    classes: &[ClassUnit],
    subjects: &[Subject],
    teachers: &[Teacher],
    curriculum: &Curriculum,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut class_ids = HashSet::new();
    for class in classes {
        if !class_ids.insert(class.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate class ID: {}", class.id),
            ));
        }
    }

    let mut subject_ids = HashSet::new();
    for subject in subjects {
        if !subject_ids.insert(subject.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate subject ID: {}", subject.id),
            ));
        }
    }

    let mut teacher_ids = HashSet::new();
    for teacher in teachers {
        if !teacher_ids.insert(teacher.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", teacher.id),
            ));
        }
        for subject_id in &teacher.subjects_taught {
            if !subject_ids.contains(subject_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSubjectReference,
                    format!(
                        "Teacher '{}' eligible for unknown subject '{}'",
                        teacher.id, subject_id
                    ),
                ));
            }
        }
    }

    for class in classes {
        for subject_id in curriculum.subjects_for_class(&class.id) {
            if !subject_ids.contains(subject_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSubjectReference,
                    format!(
                        "Curriculum for class '{}' names unknown subject '{}'",
                        class.id, subject_id
                    ),
                ));
            }
            if curriculum.required_periods(subject_id) == 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ZeroPeriodRequirement,
                    format!("Subject '{subject_id}' requires zero weekly periods"),
                ));
            }
        }
    }

    for class_id in curriculum.class_ids() {
        if !class_ids.contains(class_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownClassReference,
                format!("Curriculum names unknown class '{class_id}'"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
