//! Subject model.

use serde::{Deserialize, Serialize};

/// A taught subject.
///
/// The weekly period requirement lives in the
/// [`Curriculum`](crate::solver::Curriculum), not here — the same
/// subject may need different weekly counts under different curricula.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Human-readable name (e.g., "Mathematics").
    pub name: String,
    /// Short code (e.g., "MATH").
    pub code: String,
}

impl Subject {
    /// Creates a new subject with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            code: String::new(),
        }
    }

    /// Sets the subject name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the subject code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}
