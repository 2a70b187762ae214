//! Visual target motion per exercise.
//!
//! Frames are pure functions of elapsed time, so a renderer recomputes them
//! on every scheduled tick. Distances are normalized: `1.0` is the full
//! travel the renderer allows.

use std::f64::consts::TAU;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::ExerciseKind;

const VERGENCE_PERIOD_SECS: f64 = 4.0;
const FUSION_PERIOD_SECS: f64 = 8.0;
const FUSION_AMPLITUDE: f64 = 0.5;
const JUMP_PERIOD_SECS: f64 = 2.0;
const PURSUIT_PERIOD_SECS: f64 = 6.0;
const ROCK_PERIOD_SECS: f64 = 3.0;
const ROCK_AMPLITUDE: f64 = 0.25;

/// Position of the target pair at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetFrame {
    /// Horizontal center, -1.0 ..= 1.0.
    pub x: f64,
    /// Vertical center, -1.0 ..= 1.0.
    pub y: f64,
    /// Distance between the left-eye and right-eye targets, -1.0 ..= 1.0.
    /// Negative values cross the targets (convergence demand).
    pub separation: f64,
    /// Target size multiplier.
    pub scale: f64,
}

impl TargetFrame {
    const CENTERED: TargetFrame = TargetFrame {
        x: 0.0,
        y: 0.0,
        separation: 0.0,
        scale: 1.0,
    };
}

/// Frame for `exercise` at `elapsed` since the exercise started.
pub fn target_frame(exercise: ExerciseKind, elapsed: Duration) -> TargetFrame {
    let t = elapsed.as_secs_f64();
    match exercise {
        ExerciseKind::Vergence => TargetFrame {
            separation: phase(t, VERGENCE_PERIOD_SECS).sin(),
            ..TargetFrame::CENTERED
        },
        ExerciseKind::Fusion => TargetFrame {
            separation: FUSION_AMPLITUDE * phase(t, FUSION_PERIOD_SECS).sin(),
            ..TargetFrame::CENTERED
        },
        ExerciseKind::JumpVergence => {
            // Square wave: near for the first half of each period, far for the second.
            let near = (t % JUMP_PERIOD_SECS) < JUMP_PERIOD_SECS / 2.0;
            TargetFrame {
                separation: if near { -1.0 } else { 1.0 },
                ..TargetFrame::CENTERED
            }
        }
        ExerciseKind::SmoothPursuit => {
            let p = phase(t, PURSUIT_PERIOD_SECS);
            TargetFrame {
                x: p.sin(),
                y: (2.0 * p).sin() / 2.0,
                ..TargetFrame::CENTERED
            }
        }
        ExerciseKind::AccommodativeRock => TargetFrame {
            scale: 1.0 + ROCK_AMPLITUDE * phase(t, ROCK_PERIOD_SECS).sin(),
            ..TargetFrame::CENTERED
        },
    }
}

fn phase(t: f64, period: f64) -> f64 {
    TAU * t / period
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn every_exercise_starts_centered() {
        for kind in ExerciseKind::ALL {
            let frame = target_frame(kind, Duration::ZERO);
            assert_eq!(frame.x, 0.0);
            assert_eq!(frame.y, 0.0);
            assert!((frame.scale - 1.0).abs() < 1e-9);
            if kind != ExerciseKind::JumpVergence {
                assert_eq!(frame.separation, 0.0);
            }
        }
    }

    #[test]
    fn vergence_peaks_at_quarter_period() {
        let frame = target_frame(ExerciseKind::Vergence, secs(1.0));
        assert!((frame.separation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn jump_vergence_alternates() {
        assert_eq!(target_frame(ExerciseKind::JumpVergence, secs(0.5)).separation, -1.0);
        assert_eq!(target_frame(ExerciseKind::JumpVergence, secs(1.5)).separation, 1.0);
        assert_eq!(target_frame(ExerciseKind::JumpVergence, secs(2.5)).separation, -1.0);
    }

    #[test]
    fn frames_stay_in_bounds() {
        for kind in ExerciseKind::ALL {
            for step in 0..200 {
                let f = target_frame(kind, secs(step as f64 * 0.137));
                assert!(f.x.abs() <= 1.0 && f.y.abs() <= 1.0 && f.separation.abs() <= 1.0);
                assert!(f.scale >= 1.0 - ROCK_AMPLITUDE - 1e-9);
                assert!(f.scale <= 1.0 + ROCK_AMPLITUDE + 1e-9);
            }
        }
    }
}
