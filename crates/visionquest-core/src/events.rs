use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ExerciseKind;

/// Every exercise state change produces an Event.
/// A target renderer subscribes to them; nothing flows back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ExerciseSelected {
        exercise: ExerciseKind,
        at: DateTime<Utc>,
    },
    ExerciseStarted {
        exercise: ExerciseKind,
        countdown: u32,
        at: DateTime<Utc>,
    },
    ExerciseTicked {
        exercise: ExerciseKind,
        remaining: u32,
        at: DateTime<Utc>,
    },
    ExerciseCompleted {
        exercise: ExerciseKind,
        at: DateTime<Utc>,
    },
    ExerciseStopped {
        exercise: ExerciseKind,
        remaining: u32,
        at: DateTime<Utc>,
    },
    AssessmentSaved {
        exercise: ExerciseKind,
        composite: u8,
        log_len: usize,
        at: DateTime<Utc>,
    },
    LogCleared {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Exercise the event refers to, if any.
    pub fn exercise(&self) -> Option<ExerciseKind> {
        match self {
            Event::ExerciseSelected { exercise, .. }
            | Event::ExerciseStarted { exercise, .. }
            | Event::ExerciseTicked { exercise, .. }
            | Event::ExerciseCompleted { exercise, .. }
            | Event::ExerciseStopped { exercise, .. }
            | Event::AssessmentSaved { exercise, .. } => Some(*exercise),
            Event::LogCleared { .. } => None,
        }
    }
}
