use serde::{Deserialize, Serialize};

pub const MIN_DISTANCE_CM: f64 = 0.0;
pub const MAX_DISTANCE_CM: f64 = 50.0;

/// Near point of convergence and accommodation, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClinicalMeasurement {
    npc_cm: f64,
    npa_cm: f64,
}

impl ClinicalMeasurement {
    /// Both distances are clamped into `MIN_DISTANCE_CM..=MAX_DISTANCE_CM`.
    /// NaN collapses to the lower bound.
    pub fn new(npc_cm: f64, npa_cm: f64) -> Self {
        Self {
            npc_cm: clamp_distance(npc_cm),
            npa_cm: clamp_distance(npa_cm),
        }
    }

    pub fn npc_cm(&self) -> f64 {
        self.npc_cm
    }

    pub fn npa_cm(&self) -> f64 {
        self.npa_cm
    }
}

impl Default for ClinicalMeasurement {
    fn default() -> Self {
        Self::new(10.0, 8.0)
    }
}

fn clamp_distance(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_DISTANCE_CM;
    }
    value.clamp(MIN_DISTANCE_CM, MAX_DISTANCE_CM)
}
