//! Composite assessment score.
//!
//! ```text
//! therapist_avg = mean(six therapist ratings)
//! patient_avg   = (clarity + comfort) * 5          // 2..20 -> 10..100
//! npc_gain      = max(0, (10.0 - post_npc) * 5)
//! npa_gain      = max(0, (8.0  - post_npa) * 5)
//! composite     = therapist_avg*0.6 + patient_avg*0.3 + (npc_gain+npa_gain)*0.1
//! ```
//!
//! The calculator performs no validation of its own. Inputs arrive already
//! clamped by the model constructors.
//!
//! The clinical targets are fixed for every patient. Making them per-patient
//! would need a clinical basis that the current formula does not provide.

use serde::{Deserialize, Serialize};

use crate::model::{ClinicalMeasurement, PatientRatings, TherapistRatings};

/// Near point of convergence target, in centimeters.
pub const NPC_TARGET_CM: f64 = 10.0;
/// Near point of accommodation target, in centimeters.
pub const NPA_TARGET_CM: f64 = 8.0;

const THERAPIST_WEIGHT: f64 = 0.6;
const PATIENT_WEIGHT: f64 = 0.3;
const CLINICAL_WEIGHT: f64 = 0.1;
/// Points per centimeter below target, and per patient rating step.
const GAIN_PER_UNIT: f64 = 5.0;

/// Every intermediate term of one composite calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub therapist_avg: f64,
    pub patient_avg: f64,
    pub npc_gain: f64,
    pub npa_gain: f64,
    /// Weighted sum before rounding.
    pub raw: f64,
    /// Rounded percentage, half away from zero.
    pub composite: u8,
}

/// Compute the composite score with all intermediate terms.
pub fn score_breakdown(
    therapist: &TherapistRatings,
    patient: &PatientRatings,
    post: &ClinicalMeasurement,
) -> ScoreBreakdown {
    let therapist_avg = therapist.mean();
    let patient_avg = (patient.clarity as f64 + patient.comfort as f64) * GAIN_PER_UNIT;
    let npc_gain = ((NPC_TARGET_CM - post.npc_cm()) * GAIN_PER_UNIT).max(0.0);
    let npa_gain = ((NPA_TARGET_CM - post.npa_cm()) * GAIN_PER_UNIT).max(0.0);

    let raw = therapist_avg * THERAPIST_WEIGHT
        + patient_avg * PATIENT_WEIGHT
        + (npc_gain + npa_gain) * CLINICAL_WEIGHT;

    ScoreBreakdown {
        therapist_avg,
        patient_avg,
        npc_gain,
        npa_gain,
        raw,
        composite: raw.round().clamp(0.0, 100.0) as u8,
    }
}

/// Rounded composite percentage.
pub fn composite_score(
    therapist: &TherapistRatings,
    patient: &PatientRatings,
    post: &ClinicalMeasurement,
) -> u8 {
    score_breakdown(therapist, patient, post).composite
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Completion, Difficulty};
    use proptest::prelude::*;

    fn ratings() -> (TherapistRatings, PatientRatings) {
        (
            TherapistRatings::from_values([75, 70, 85, 80, 78, 72]),
            PatientRatings::new(7, 6, Difficulty::Moderate, Completion::Completed),
        )
    }

    #[test]
    fn measurements_above_target_add_nothing() {
        let (t, p) = ratings();
        let b = score_breakdown(&t, &p, &ClinicalMeasurement::new(12.5, 15.5));
        assert!((b.therapist_avg - 76.67).abs() < 0.01);
        assert_eq!(b.patient_avg, 65.0);
        assert_eq!(b.npc_gain, 0.0);
        assert_eq!(b.npa_gain, 0.0);
        assert!((b.raw - 65.5).abs() < 1e-9);
        assert_eq!(b.composite, 66);
    }

    #[test]
    fn measurements_below_target_add_gain() {
        let (t, p) = ratings();
        let b = score_breakdown(&t, &p, &ClinicalMeasurement::new(8.0, 6.0));
        assert_eq!(b.npc_gain, 10.0);
        assert_eq!(b.npa_gain, 10.0);
        assert!((b.raw - 67.5).abs() < 1e-9);
        assert_eq!(b.composite, 68);
    }

    #[test]
    fn minimum_inputs_keep_patient_floor() {
        let t = TherapistRatings::from_values([0; 6]);
        let p = PatientRatings::new(1, 1, Difficulty::Hard, Completion::Abandoned);
        let post = ClinicalMeasurement::new(50.0, 50.0);
        assert_eq!(composite_score(&t, &p, &post), 3);
    }

    #[test]
    fn maximum_inputs_saturate_near_100() {
        let t = TherapistRatings::from_values([100; 6]);
        let p = PatientRatings::new(10, 10, Difficulty::Easy, Completion::Completed);
        let post = ClinicalMeasurement::new(0.0, 0.0);
        assert_eq!(composite_score(&t, &p, &post), 99);
    }

    proptest! {
        #[test]
        fn composite_stays_in_percentage_range(
            therapist in prop::array::uniform6(0u32..=100),
            clarity in 1u32..=10,
            comfort in 1u32..=10,
            npc in 0.0f64..=50.0,
            npa in 0.0f64..=50.0,
        ) {
            let t = TherapistRatings::from_values(therapist);
            let p = PatientRatings::new(clarity, comfort, Difficulty::Moderate, Completion::Completed);
            let b = score_breakdown(&t, &p, &ClinicalMeasurement::new(npc, npa));
            prop_assert!(b.raw >= 0.0 && b.raw <= 100.0);
            prop_assert!(b.composite <= 100);
        }
    }
}
