//! Exercise session: state machine, per-user context, tick driver and
//! target motion.

mod animation;
mod context;
mod driver;
mod engine;

pub use animation::{target_frame, TargetFrame};
pub use context::{SessionContext, SessionSettings};
pub use driver::{run_countdown, stop_signal, RunOutcome, StopHandle, StopSignal, TickReport};
pub use engine::{ExerciseSession, SessionSnapshot, SessionState, MIN_COUNTDOWN_UNITS};
