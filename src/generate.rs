//! Timetable generation orchestration.
//!
//! Wires the persistence reads, period generation, CSP solve, and the
//! final atomic write into one operation per school. Every failure —
//! missing entities, invalid input, infeasibility, or a store fault —
//! is folded into the returned [`GenerationOutcome`]; nothing escapes
//! as a panic or raw error.

use log::{error, info, warn};
use rand::Rng;

use crate::models::Assignment;
use crate::solver::{
    Curriculum, SolveInput, SolverOptions, TimetableSolver, DEFAULT_WEEKLY_PERIODS,
};
use crate::store::TimetableStore;
use crate::validation;

/// Most subjects any class receives under the default uniform curriculum.
pub const DEFAULT_SUBJECTS_PER_CLASS: usize = 10;

/// Extra rooms synthesized beyond one per class.
const SPARE_ROOMS: usize = 4;

/// Parameters for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// School (tenant) identifier.
    pub school_id: String,
    /// Restrict to classes of one academic year.
    pub academic_year: Option<String>,
    /// Delete prior entries for the school/year before writing.
    pub clear_existing: bool,
    /// Curriculum override. `None` = uniform default (leading subjects,
    /// 4 periods each).
    pub curriculum: Option<Curriculum>,
    /// Solver tuning.
    pub options: SolverOptions,
}

impl GenerateRequest {
    /// Creates a request for a school.
    pub fn new(school_id: impl Into<String>) -> Self {
        Self {
            school_id: school_id.into(),
            academic_year: None,
            clear_existing: true,
            curriculum: None,
            options: SolverOptions::default(),
        }
    }

    /// Restricts the run to one academic year.
    pub fn with_academic_year(mut self, year: impl Into<String>) -> Self {
        self.academic_year = Some(year.into());
        self
    }

    /// Sets whether prior entries are cleared before writing.
    pub fn with_clear_existing(mut self, clear: bool) -> Self {
        self.clear_existing = clear;
        self
    }

    /// Overrides the default uniform curriculum.
    pub fn with_curriculum(mut self, curriculum: Curriculum) -> Self {
        self.curriculum = Some(curriculum);
        self
    }

    /// Sets solver options.
    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }
}

/// Three-part result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Whether a complete timetable was generated and stored.
    pub success: bool,
    /// Status message: entry count on success, failure reason otherwise.
    pub message: String,
    /// Stored entries. Empty on failure.
    pub assignments: Vec<Assignment>,
}

impl GenerationOutcome {
    fn success(message: impl Into<String>, assignments: Vec<Assignment>) -> Self {
        Self {
            success: true,
            message: message.into(),
            assignments,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            assignments: Vec::new(),
        }
    }
}

/// Generates and stores a school's weekly timetable.
///
/// Loads the school's classes (optionally year-filtered), subjects,
/// and teachers; builds per-class period grids; solves; and on success
/// writes the result through [`TimetableStore::replace_timetable`].
/// On any failure nothing is cleared and nothing is written.
///
/// Slot choice is randomized through `rng`; pass a seeded RNG for a
/// reproducible timetable.
pub fn generate_timetable<S: TimetableStore, R: Rng>(
    store: &mut S,
    request: &GenerateRequest,
    rng: &mut R,
) -> GenerationOutcome {
    let year = request.academic_year.as_deref();

    let classes = match store.classes(&request.school_id, year) {
        Ok(classes) => classes,
        Err(err) => return store_failure("load classes", &err),
    };
    let subjects = match store.subjects(&request.school_id) {
        Ok(subjects) => subjects,
        Err(err) => return store_failure("load subjects", &err),
    };
    let teachers = match store.teachers(&request.school_id) {
        Ok(teachers) => teachers,
        Err(err) => return store_failure("load teachers", &err),
    };

    if classes.is_empty() {
        return GenerationOutcome::failure("No classes found");
    }
    if teachers.is_empty() {
        return GenerationOutcome::failure("No teachers found");
    }
    if subjects.is_empty() {
        return GenerationOutcome::failure("No subjects found");
    }

    let curriculum = request.curriculum.clone().unwrap_or_else(|| {
        let class_ids: Vec<String> = classes.iter().map(|c| c.id.clone()).collect();
        let subject_ids: Vec<String> = subjects.iter().map(|s| s.id.clone()).collect();
        Curriculum::uniform(
            &class_ids,
            &subject_ids,
            DEFAULT_SUBJECTS_PER_CLASS,
            DEFAULT_WEEKLY_PERIODS,
        )
    });

    if let Err(errors) = validation::validate_input(&classes, &subjects, &teachers, &curriculum) {
        for e in &errors {
            warn!("invalid timetable input: {}", e.message);
        }
        // Surface the first problem; the log has the rest.
        let first = errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "Invalid input".to_string());
        return GenerationOutcome::failure(first);
    }

    let rooms: Vec<String> = (1..=classes.len() + SPARE_ROOMS)
        .map(|i| format!("Room {i}"))
        .collect();

    info!(
        "generating timetable for school '{}': {} classes, {} subjects, {} teachers, {} rooms",
        request.school_id,
        classes.len(),
        subjects.len(),
        teachers.len(),
        rooms.len()
    );

    let input = SolveInput::new(classes, teachers, rooms, curriculum);
    let mut solver = TimetableSolver::new(&input).with_options(request.options);

    let timetable = match solver.solve(rng) {
        Ok(timetable) => timetable,
        Err(err) => {
            info!(
                "timetable run failed for school '{}' after {} steps: {err}",
                request.school_id,
                solver.steps_used()
            );
            return GenerationOutcome::failure(err.to_string());
        }
    };

    if let Err(err) = store.replace_timetable(
        &request.school_id,
        year,
        request.clear_existing,
        &timetable.entries,
    ) {
        return store_failure("store generated timetable", &err);
    }

    let count = timetable.entry_count();
    info!(
        "stored {count} timetable entries for school '{}'",
        request.school_id
    );
    GenerationOutcome::success(
        format!("Successfully generated timetable with {count} entries"),
        timetable.entries,
    )
}

/// Folds a store fault into a generic failure outcome.
fn store_failure(action: &str, err: &crate::store::StoreError) -> GenerationOutcome {
    error!("failed to {action}: {err}");
    GenerationOutcome::failure(format!("Timetable generation failed: could not {action}"))
}
