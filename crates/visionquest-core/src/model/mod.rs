//! Domain records captured by the input layer.
//!
//! Every numeric input is clamped to its widget range on construction.
//! Nothing here rejects a value; out-of-range input is pulled to the
//! nearest bound.

mod exercise;
mod measurement;
mod patient;
mod ratings;

pub use exercise::{ExerciseKind, ExerciseSettings, DEFAULT_TARGET_GLYPH};
pub use measurement::{ClinicalMeasurement, MAX_DISTANCE_CM, MIN_DISTANCE_CM};
pub use patient::{PatientCategory, PatientProfile, MAX_AGE, MIN_AGE};
pub use ratings::{
    Completion, Difficulty, PatientRatings, TherapistRatings, MAX_PATIENT_RATING,
    MAX_THERAPIST_RATING, MIN_PATIENT_RATING,
};
