//! CSP timetable solver.
//!
//! Backtracking search with an MRV (minimum-remaining-values) subject
//! ordering. For every class, each of its generated slots may receive
//! at most one (subject, teacher, room) booking; the hard constraints
//! are no teacher, room, or class double-booking, exact weekly period
//! counts per subject, and teacher-subject eligibility.
//!
//! # Search Order
//! Subjects are tried most-constrained-first (fewest remaining periods
//! needed); the teacher is the first eligible one in input order; the
//! room is the first free one in pool order. Slot order is shuffled
//! through the injected RNG before each trial loop, so repeated runs
//! spread lessons across rooms and times. A fixed seed reproduces the
//! exact timetable.
//!
//! # State
//! All working state (busy-sets, placed counts, committed entries) is
//! owned by the solver value. Nothing is shared; a solver instance is
//! independently testable and discarded after the run.

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{
    Assignment, ClassUnit, ClockTime, Slot, Teacher, Timetable, Weekday,
};
use crate::periods;

/// Default weekly period count for subjects without an explicit entry.
pub const DEFAULT_WEEKLY_PERIODS: u32 = 4;

/// Per-class subject lists and per-subject weekly period counts.
///
/// The curriculum is an explicit configuration input: callers may build
/// a uniform one (every class gets the same leading subjects) or supply
/// richer per-class lists without touching the solver.
#[derive(Debug, Clone, Default)]
pub struct Curriculum {
    subjects_per_class: HashMap<String, Vec<String>>,
    periods_per_subject: HashMap<String, u32>,
}

impl Curriculum {
    /// Creates an empty curriculum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the subject list for a class.
    pub fn with_class_subjects(
        mut self,
        class_id: impl Into<String>,
        subject_ids: Vec<String>,
    ) -> Self {
        self.subjects_per_class.insert(class_id.into(), subject_ids);
        self
    }

    /// Sets the weekly period count for a subject.
    pub fn with_weekly_periods(mut self, subject_id: impl Into<String>, periods: u32) -> Self {
        self.periods_per_subject.insert(subject_id.into(), periods);
        self
    }

    /// Builds a uniform curriculum: every class gets the leading
    /// `max_subjects` subject IDs, each requiring `periods` per week.
    pub fn uniform(
        class_ids: &[String],
        subject_ids: &[String],
        max_subjects: usize,
        periods: u32,
    ) -> Self {
        let leading: Vec<String> = subject_ids
            .iter()
            .take(max_subjects.min(subject_ids.len()))
            .cloned()
            .collect();
        let mut curriculum = Curriculum::new();
        for class_id in class_ids {
            curriculum
                .subjects_per_class
                .insert(class_id.clone(), leading.clone());
        }
        for subject_id in subject_ids {
            curriculum
                .periods_per_subject
                .insert(subject_id.clone(), periods);
        }
        curriculum
    }

    /// Subject IDs a class must be taught.
    pub fn subjects_for_class(&self, class_id: &str) -> &[String] {
        self.subjects_per_class
            .get(class_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Class IDs with an explicit subject list.
    pub fn class_ids(&self) -> impl Iterator<Item = &str> {
        self.subjects_per_class.keys().map(String::as_str)
    }

    /// Required weekly periods for a subject (defaults to 4).
    pub fn required_periods(&self, subject_id: &str) -> u32 {
        self.periods_per_subject
            .get(subject_id)
            .copied()
            .unwrap_or(DEFAULT_WEEKLY_PERIODS)
    }
}

/// The full in-memory problem handed to the solver.
#[derive(Debug, Clone)]
pub struct SolveInput {
    /// Classes to schedule, in processing order.
    pub classes: Vec<ClassUnit>,
    /// Teachers with eligibility sets, in selection order.
    pub teachers: Vec<Teacher>,
    /// Room pool, in selection order.
    pub rooms: Vec<String>,
    /// Subject lists and weekly period counts.
    pub curriculum: Curriculum,
    /// Generated weekly slot grid per class ID.
    pub class_slots: HashMap<String, Vec<Slot>>,
}

impl SolveInput {
    /// Builds an input, generating each class's slot grid from its
    /// schedule configuration.
    pub fn new(
        classes: Vec<ClassUnit>,
        teachers: Vec<Teacher>,
        rooms: Vec<String>,
        curriculum: Curriculum,
    ) -> Self {
        let class_slots = classes
            .iter()
            .map(|c| (c.id.clone(), periods::class_slots(c)))
            .collect();
        Self {
            classes,
            teachers,
            rooms,
            curriculum,
            class_slots,
        }
    }
}

/// Solver tuning knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverOptions {
    /// Ceiling on slot-trial steps across the whole run. `None` =
    /// unbounded, matching the reference behavior. When exhausted the
    /// current class is reported as infeasible instead of searching on.
    pub max_steps: Option<u64>,
}

impl SolverOptions {
    /// Creates default options (unbounded search).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the step budget.
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}

/// Lifecycle of one class's search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassStatus {
    /// Not yet attempted.
    Unsolved,
    /// Search in progress.
    Solving,
    /// Fully scheduled.
    Solved,
    /// No complete schedule exists (or search was cut short).
    Failed,
}

/// Why a class could not be scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A required subject has no eligible teacher — a configuration
    /// error, detected before any slot search for that subject.
    NoEligibleTeacher {
        class_name: String,
        subject_id: String,
    },
    /// The search space was exhausted without a complete schedule.
    Unschedulable { class_name: String },
    /// The configured step budget ran out mid-search.
    BudgetExhausted { class_name: String },
}

impl SolveError {
    /// Name of the class that failed.
    pub fn class_name(&self) -> &str {
        match self {
            SolveError::NoEligibleTeacher { class_name, .. }
            | SolveError::Unschedulable { class_name }
            | SolveError::BudgetExhausted { class_name } => class_name,
        }
    }
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::NoEligibleTeacher {
                class_name,
                subject_id,
            } => write!(
                f,
                "Could not generate timetable for {class_name}: no eligible teacher for subject '{subject_id}'"
            ),
            SolveError::Unschedulable { class_name } => {
                write!(f, "Could not generate timetable for {class_name}")
            }
            SolveError::BudgetExhausted { class_name } => write!(
                f,
                "Could not generate timetable for {class_name}: search budget exhausted"
            ),
        }
    }
}

impl std::error::Error for SolveError {}

/// Outcome of one recursion level.
enum Search {
    Solved,
    Exhausted,
    NoTeacher(String),
    Budget,
}

/// A committed lesson, keyed by (class, day, start) in the working map.
#[derive(Debug, Clone)]
struct PlacedLesson {
    subject_id: String,
    teacher_id: String,
    room: String,
    end: ClockTime,
}

type BusyKey = (Weekday, ClockTime);

/// Backtracking timetable solver.
///
/// Owns all working state for one run. Classes are processed
/// sequentially in input order; the run stops at the first class whose
/// search fails. Entries committed for classes solved before the
/// failure stay in the working timetable (see [`partial_timetable`])
/// until the caller decides whether to keep them.
///
/// [`partial_timetable`]: TimetableSolver::partial_timetable
pub struct TimetableSolver<'a> {
    input: &'a SolveInput,
    options: SolverOptions,
    teacher_busy: HashMap<String, HashSet<BusyKey>>,
    room_busy: HashMap<String, HashSet<BusyKey>>,
    class_busy: HashMap<String, HashSet<BusyKey>>,
    placed: HashMap<(String, String), u32>,
    entries: HashMap<(String, Weekday, ClockTime), PlacedLesson>,
    statuses: HashMap<String, ClassStatus>,
    steps: u64,
}

impl<'a> TimetableSolver<'a> {
    /// Creates a solver over the given input.
    pub fn new(input: &'a SolveInput) -> Self {
        Self {
            input,
            options: SolverOptions::default(),
            teacher_busy: HashMap::new(),
            room_busy: HashMap::new(),
            class_busy: HashMap::new(),
            placed: HashMap::new(),
            entries: HashMap::new(),
            statuses: HashMap::new(),
            steps: 0,
        }
    }

    /// Sets solver options.
    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Solves every class, returning the complete timetable or the
    /// first class failure.
    pub fn solve<R: Rng>(&mut self, rng: &mut R) -> Result<Timetable, SolveError> {
        let input = self.input;
        for class in &input.classes {
            let slot_count = input
                .class_slots
                .get(&class.id)
                .map(Vec::len)
                .unwrap_or(0);
            info!(
                "solving class '{}' ({} slots, {} subjects)",
                class.name,
                slot_count,
                input.curriculum.subjects_for_class(&class.id).len()
            );
            self.statuses
                .insert(class.id.clone(), ClassStatus::Solving);

            match self.search(&class.id, rng) {
                Search::Solved => {
                    self.statuses.insert(class.id.clone(), ClassStatus::Solved);
                }
                Search::Exhausted => {
                    self.statuses.insert(class.id.clone(), ClassStatus::Failed);
                    debug!("class '{}' exhausted its search space", class.name);
                    return Err(SolveError::Unschedulable {
                        class_name: class.name.clone(),
                    });
                }
                Search::NoTeacher(subject_id) => {
                    self.statuses.insert(class.id.clone(), ClassStatus::Failed);
                    return Err(SolveError::NoEligibleTeacher {
                        class_name: class.name.clone(),
                        subject_id,
                    });
                }
                Search::Budget => {
                    self.statuses.insert(class.id.clone(), ClassStatus::Failed);
                    return Err(SolveError::BudgetExhausted {
                        class_name: class.name.clone(),
                    });
                }
            }
        }
        Ok(self.partial_timetable())
    }

    /// Search status of a class.
    pub fn status(&self, class_id: &str) -> ClassStatus {
        self.statuses
            .get(class_id)
            .copied()
            .unwrap_or(ClassStatus::Unsolved)
    }

    /// Slot-trial steps consumed so far.
    pub fn steps_used(&self) -> u64 {
        self.steps
    }

    /// Snapshot of the working timetable, sorted by class, day, start.
    ///
    /// After a failed run this holds exactly the entries of classes
    /// solved before the failure; the failing class's trial bookings
    /// are fully retracted.
    pub fn partial_timetable(&self) -> Timetable {
        let mut timetable = Timetable::new();
        for ((class_id, day, start), lesson) in &self.entries {
            timetable.add_entry(Assignment {
                class_id: class_id.clone(),
                subject_id: lesson.subject_id.clone(),
                teacher_id: lesson.teacher_id.clone(),
                room: lesson.room.clone(),
                day: *day,
                start: *start,
                end: lesson.end,
            });
        }
        timetable
            .entries
            .sort_by(|a, b| (&a.class_id, a.day, a.start).cmp(&(&b.class_id, b.day, b.start)));
        timetable
    }

    /// One backtracking level for a class.
    fn search<R: Rng>(&mut self, class_id: &str, rng: &mut R) -> Search {
        let input = self.input;

        let needing = self.subjects_needing(class_id);
        if needing.is_empty() {
            return Search::Solved;
        }

        let mut slots = self.unassigned_slots(class_id);
        if slots.is_empty() {
            return Search::Exhausted;
        }

        // Most constrained subject first (fewest remaining periods).
        let subject_id = needing[0].0.clone();
        let Some(teacher_id) = input
            .teachers
            .iter()
            .find(|t| t.can_teach(&subject_id))
            .map(|t| t.id.clone())
        else {
            return Search::NoTeacher(subject_id);
        };

        // Randomized tie-breaking across equally viable slots.
        slots.shuffle(rng);

        for slot in slots {
            if let Some(max) = self.options.max_steps {
                if self.steps >= max {
                    return Search::Budget;
                }
            }
            self.steps += 1;

            let key = (slot.day, slot.start);
            if self
                .teacher_busy
                .get(&teacher_id)
                .is_some_and(|busy| busy.contains(&key))
            {
                continue;
            }
            let Some(room) = input
                .rooms
                .iter()
                .find(|room| {
                    !self
                        .room_busy
                        .get(room.as_str())
                        .is_some_and(|busy| busy.contains(&key))
                })
                .cloned()
            else {
                continue;
            };

            self.commit(class_id, &slot, &subject_id, &teacher_id, &room);

            match self.search(class_id, rng) {
                Search::Solved => return Search::Solved,
                Search::Exhausted => {
                    self.retract(class_id, &slot, &subject_id, &teacher_id, &room);
                }
                other => {
                    // Configuration error or budget: unwind fully.
                    self.retract(class_id, &slot, &subject_id, &teacher_id, &room);
                    return other;
                }
            }
        }

        Search::Exhausted
    }

    /// Subjects still short of their weekly count, ascending by
    /// remaining need. Ties keep curriculum order (stable sort).
    fn subjects_needing(&self, class_id: &str) -> Vec<(String, u32)> {
        let curriculum = &self.input.curriculum;
        let mut needing: Vec<(String, u32)> = curriculum
            .subjects_for_class(class_id)
            .iter()
            .filter_map(|subject_id| {
                let required = curriculum.required_periods(subject_id);
                let placed = self
                    .placed
                    .get(&(class_id.to_string(), subject_id.clone()))
                    .copied()
                    .unwrap_or(0);
                let remaining = required.saturating_sub(placed);
                (remaining > 0).then(|| (subject_id.clone(), remaining))
            })
            .collect();
        needing.sort_by_key(|&(_, remaining)| remaining);
        needing
    }

    /// The class's slots with no booking yet, in grid order.
    fn unassigned_slots(&self, class_id: &str) -> Vec<Slot> {
        let busy = self.class_busy.get(class_id);
        self.input
            .class_slots
            .get(class_id)
            .map(|slots| {
                slots
                    .iter()
                    .filter(|slot| {
                        !busy.is_some_and(|b| b.contains(&(slot.day, slot.start)))
                    })
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn commit(&mut self, class_id: &str, slot: &Slot, subject_id: &str, teacher_id: &str, room: &str) {
        let key = (slot.day, slot.start);
        self.teacher_busy
            .entry(teacher_id.to_string())
            .or_default()
            .insert(key);
        self.room_busy.entry(room.to_string()).or_default().insert(key);
        self.class_busy
            .entry(class_id.to_string())
            .or_default()
            .insert(key);
        *self
            .placed
            .entry((class_id.to_string(), subject_id.to_string()))
            .or_insert(0) += 1;
        self.entries.insert(
            (class_id.to_string(), slot.day, slot.start),
            PlacedLesson {
                subject_id: subject_id.to_string(),
                teacher_id: teacher_id.to_string(),
                room: room.to_string(),
                end: slot.end,
            },
        );
    }

    fn retract(&mut self, class_id: &str, slot: &Slot, subject_id: &str, teacher_id: &str, room: &str) {
        let key = (slot.day, slot.start);
        if let Some(busy) = self.teacher_busy.get_mut(teacher_id) {
            busy.remove(&key);
        }
        if let Some(busy) = self.room_busy.get_mut(room) {
            busy.remove(&key);
        }
        if let Some(busy) = self.class_busy.get_mut(class_id) {
            busy.remove(&key);
        }
        if let Some(count) = self
            .placed
            .get_mut(&(class_id.to_string(), subject_id.to_string()))
        {
            *count = count.saturating_sub(1);
        }
        self.entries.remove(&(class_id.to_string(), slot.day, slot.start));
    }
}
