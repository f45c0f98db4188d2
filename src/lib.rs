//! Weekly school timetable generation.
//!
//! Assigns (subject, teacher, room, time-slot) tuples to every class of
//! a school such that no teacher, room, or class is double-booked, each
//! subject receives its required weekly period count, and teacher-subject
//! eligibility is respected.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ClassUnit`, `Subject`, `Teacher`,
//!   `Slot`, `Assignment`, `Timetable`, clock-time primitives
//! - **`periods`**: Converts a class's schedule configuration into its
//!   weekly grid of bookable slots
//! - **`solver`**: Backtracking CSP search with MRV subject ordering
//!   and randomized slot tie-breaking
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling
//!   subject/class references)
//! - **`store`**: Persistence seam (`TimetableStore`) and the in-memory
//!   reference implementation
//! - **`generate`**: Orchestration — load, solve, atomically store
//!
//! # Example
//!
//! ```
//! use classtime::generate::{generate_timetable, GenerateRequest};
//! use classtime::models::{ClassUnit, ClockTime, ScheduleConfig, Subject, Teacher};
//! use classtime::store::InMemoryStore;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let mut store = InMemoryStore::new();
//! store.add_class(
//!     "school-1",
//!     ClassUnit::new("C1").with_name("Grade 1A").with_schedule(
//!         ScheduleConfig::new()
//!             .with_day(ClockTime::hm(8, 0), ClockTime::hm(14, 0))
//!             .with_period_minutes(45),
//!     ),
//! );
//! store.add_subject("school-1", Subject::new("MATH").with_name("Mathematics"));
//! store.add_teacher("school-1", Teacher::new("T1").with_subject("MATH"));
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let outcome = generate_timetable(&mut store, &GenerateRequest::new("school-1"), &mut rng);
//! assert!(outcome.success);
//! assert!(!outcome.assignments.is_empty());
//! ```
//!
//! # Determinism
//!
//! The solver shuffles slot order through an injected `rand::Rng`, so
//! repeated runs spread lessons differently across rooms and times while
//! always satisfying the hard constraints. A seeded RNG reproduces the
//! exact timetable; feasibility itself never depends on the seed order
//! alone for inputs with a unique feasible/infeasible answer.

pub mod generate;
pub mod models;
pub mod periods;
pub mod solver;
pub mod store;
pub mod validation;
