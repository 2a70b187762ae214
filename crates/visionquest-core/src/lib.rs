//! # VisionQuest Core Library
//!
//! This library provides the core logic for VisionQuest, a recorder for
//! binocular vision training sessions (vergence, fusion and related
//! exercises). The CLI binary is a thin layer over it.
//!
//! ## Architecture
//!
//! - **Session**: a tick-driven exercise state machine plus a cancellable
//!   `tokio` interval driver that replaces blocking redraw loops
//! - **Scoring**: fixed-weight composite score from therapist ratings,
//!   patient ratings and post-exercise near points
//! - **Journal**: append-only, in-memory log of completed assessments
//! - **Stats / Export**: aggregates over the log, CSV and PDF reports
//! - **Storage**: TOML-based preferences only; session data is never persisted
//!
//! ## Key Components
//!
//! - [`SessionContext`]: per-user state passed to every handler
//! - [`ExerciseSession`]: Idle/Running countdown state machine
//! - [`score_breakdown`]: composite score calculator
//! - [`SessionLog`]: the assessment log
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod export;
pub mod journal;
pub mod model;
pub mod scoring;
pub mod session;
pub mod simulation;
pub mod stats;
pub mod storage;

pub use error::{ConfigError, CoreError, ExportError};
pub use events::Event;
pub use journal::{AssessmentInput, AssessmentRecord, SessionLog};
pub use model::{
    ClinicalMeasurement, Completion, Difficulty, ExerciseKind, ExerciseSettings, PatientCategory,
    PatientProfile, PatientRatings, TherapistRatings,
};
pub use scoring::{composite_score, score_breakdown, ScoreBreakdown, NPA_TARGET_CM, NPC_TARGET_CM};
pub use session::{
    run_countdown, stop_signal, target_frame, ExerciseSession, RunOutcome, SessionContext,
    SessionSettings, SessionState, StopHandle, TargetFrame, MIN_COUNTDOWN_UNITS,
};
pub use simulation::{AssessmentSimulator, QuickSession, SimulationConfig};
pub use stats::{LogSummary, MeasurementDelta};
pub use storage::Config;
