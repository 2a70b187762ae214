//! Interval driver for a running exercise.
//!
//! Replaces a sleep-and-redraw loop with a scheduled `tokio` interval. The
//! driver borrows the context mutably for the duration of the run and
//! returns once the exercise completes, is stopped, or was never running.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::events::Event;

use super::context::SessionContext;

/// How a countdown run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Countdown reached zero.
    Completed,
    /// Stopped through the [`StopHandle`]; carries the remaining units.
    Stopped { remaining: u32 },
    /// The session was not running when the driver started.
    NotRunning,
}

/// What the caller sees on every tick.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub event: Event,
    /// Time since the driver started, for target animation.
    pub elapsed: Duration,
}

/// Sender half of the stop signal.
#[derive(Debug, Clone)]
pub struct StopHandle(watch::Sender<bool>);

/// Receiver half of the stop signal.
#[derive(Debug)]
pub struct StopSignal(watch::Receiver<bool>);

impl StopHandle {
    /// Ask the driver to stop at its next wake-up.
    pub fn stop(&self) {
        // Err only when the driver is already gone, which is fine.
        let _ = self.0.send(true);
    }
}

pub fn stop_signal() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle(tx), StopSignal(rx))
}

/// Tick `ctx` once per `period` until the exercise completes or `stop` fires.
///
/// `on_tick` runs after every state change, including the final stop.
pub async fn run_countdown<F>(
    ctx: &mut SessionContext,
    period: Duration,
    stop: StopSignal,
    mut on_tick: F,
) -> RunOutcome
where
    F: FnMut(&TickReport, &SessionContext),
{
    if !ctx.session().is_running() {
        return RunOutcome::NotRunning;
    }

    let started = Instant::now();
    let mut interval = time::interval_at(started + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut stop = stop.0;
    let mut stop_open = true;

    loop {
        tokio::select! {
            biased;

            changed = stop.changed(), if stop_open => {
                match changed {
                    Ok(()) if *stop.borrow_and_update() => {
                        let remaining = ctx.session().remaining();
                        if let Some(event) = ctx.stop() {
                            let report = TickReport { event, elapsed: started.elapsed() };
                            on_tick(&report, ctx);
                        }
                        return RunOutcome::Stopped { remaining };
                    }
                    Ok(()) => {}
                    // Every handle dropped: nobody can stop us any more.
                    Err(_) => stop_open = false,
                }
            }

            _ = interval.tick() => {
                let Some(event) = ctx.tick() else {
                    return RunOutcome::NotRunning;
                };
                let completed = matches!(event, Event::ExerciseCompleted { .. });
                let report = TickReport { event, elapsed: started.elapsed() };
                on_tick(&report, ctx);
                if completed {
                    return RunOutcome::Completed;
                }
            }
        }
    }
}
