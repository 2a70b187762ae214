//! Exercise session state machine.
//!
//! The session is tick-driven: it owns no clock and no thread. Something
//! outside (the interval driver in [`super::driver`]) calls `tick()` once per
//! countdown unit.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --tick (remaining > 0)--> Running
//!                 Running --tick reaches 0 | stop--> Idle
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::model::ExerciseKind;

/// Shortest countdown a session accepts. A zero-length countdown would
/// leave the session Running with nothing left to tick.
pub const MIN_COUNTDOWN_UNITS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Running,
}

/// Serializable view of the session for status output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub exercise: ExerciseKind,
    pub state: SessionState,
    pub remaining: u32,
    pub duration: u32,
    pub progress: f64,
    pub started_at: Option<DateTime<Utc>>,
}

/// One exercise slot: kind, countdown and running flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSession {
    exercise: ExerciseKind,
    state: SessionState,
    /// Countdown length applied on every start.
    duration: u32,
    remaining: u32,
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
}

impl ExerciseSession {
    /// Create an idle session for `exercise` with a countdown of `duration`
    /// units, raised to [`MIN_COUNTDOWN_UNITS`].
    pub fn new(exercise: ExerciseKind, duration: u32) -> Self {
        let duration = duration.max(MIN_COUNTDOWN_UNITS);
        Self {
            exercise,
            state: SessionState::Idle,
            duration,
            remaining: duration,
            started_at: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn exercise(&self) -> ExerciseKind {
        self.exercise
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// 0.0 .. 1.0 through the countdown.
    pub fn progress(&self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        1.0 - (self.remaining as f64 / self.duration as f64)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            exercise: self.exercise,
            state: self.state,
            remaining: self.remaining,
            duration: self.duration,
            progress: self.progress(),
            started_at: self.started_at,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start (or restart) the countdown for `exercise`.
    ///
    /// Always resets the countdown to the configured duration, even when the
    /// session is already running.
    pub fn start(&mut self, exercise: ExerciseKind) -> Event {
        self.exercise = exercise;
        self.state = SessionState::Running;
        self.remaining = self.duration;
        let at = Utc::now();
        self.started_at = Some(at);
        Event::ExerciseStarted {
            exercise,
            countdown: self.duration,
            at,
        }
    }

    /// Return to Idle regardless of the remaining countdown.
    ///
    /// Returns `None` when the session was not running.
    pub fn stop(&mut self) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        self.state = SessionState::Idle;
        Some(Event::ExerciseStopped {
            exercise: self.exercise,
            remaining: self.remaining,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one unit.
    ///
    /// Returns `ExerciseTicked` while time remains and `ExerciseCompleted` on
    /// the tick that reaches zero. Does nothing while idle.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = SessionState::Idle;
            return Some(Event::ExerciseCompleted {
                exercise: self.exercise,
                at: Utc::now(),
            });
        }
        Some(Event::ExerciseTicked {
            exercise: self.exercise,
            remaining: self.remaining,
            at: Utc::now(),
        })
    }

    /// Change the countdown length. Takes effect on the next start.
    pub fn set_duration(&mut self, duration: u32) {
        let duration = duration.max(MIN_COUNTDOWN_UNITS);
        self.duration = duration;
        if self.state == SessionState::Idle {
            self.remaining = duration;
        }
    }
}
