//! Seeded generation of demo assessments.
//!
//! Produces plausible rating and measurement inputs for demos and tests.
//! Only the inputs are random: every score still goes through the composite
//! formula.

use chrono::{DateTime, Duration, Utc};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::journal::{AssessmentInput, AssessmentRecord, SessionLog};
use crate::model::{
    ClinicalMeasurement, Completion, Difficulty, ExerciseKind, PatientProfile, PatientRatings,
    TherapistRatings, MAX_DISTANCE_CM,
};

/// Configuration for simulated assessments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
    /// Lowest therapist rating drawn
    pub therapist_floor: u32,
    /// Probability the patient abandons an exercise (0.0-1.0)
    pub abandon_probability: f64,
    /// Largest per-session NPC/NPA improvement in centimeters
    pub max_improvement_cm: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            therapist_floor: 55,
            abandon_probability: 0.1,
            max_improvement_cm: 3.0,
        }
    }
}

/// Short summary shown after a quick session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickSession {
    pub date: String,
    pub exercise: ExerciseKind,
    pub score: u8,
    /// Minutes.
    pub duration: u32,
}

pub struct AssessmentSimulator {
    config: SimulationConfig,
    rng: Mcg128Xsl64,
}

impl AssessmentSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(SimulationConfig {
            seed: Some(seed),
            ..SimulationConfig::default()
        })
    }

    /// Draw one set of inputs for `exercise`.
    pub fn input(
        &mut self,
        patient: &PatientProfile,
        exercise: ExerciseKind,
    ) -> AssessmentInput {
        let floor = self.config.therapist_floor.min(100);
        let mut therapist = [0u32; 6];
        for value in &mut therapist {
            *value = self.rng.gen_range(floor..=100);
        }

        let completion = if self.rng.gen_bool(unit_probability(self.config.abandon_probability)) {
            Completion::Abandoned
        } else if self.rng.gen_bool(0.2) {
            Completion::Partial
        } else {
            Completion::Completed
        };
        let difficulty = *[Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard]
            .choose(&mut self.rng)
            .unwrap_or(&Difficulty::Moderate);
        let patient_ratings = PatientRatings::new(
            self.rng.gen_range(4..=10),
            self.rng.gen_range(4..=10),
            difficulty,
            completion,
        );

        let pre_npc: f64 = self.rng.gen_range(8.0..16.0);
        let pre_npa: f64 = self.rng.gen_range(6.0..18.0);
        // f64::max drops NaN; the upper bound keeps gen_range finite.
        let max_gain = self.config.max_improvement_cm.max(0.0).min(MAX_DISTANCE_CM);
        let (npc_gain, npa_gain) = if max_gain > 0.0 {
            (self.rng.gen_range(0.0..=max_gain), self.rng.gen_range(0.0..=max_gain))
        } else {
            (0.0, 0.0)
        };

        AssessmentInput {
            patient: patient.clone(),
            exercise,
            therapist: TherapistRatings::from_values(therapist),
            patient_ratings,
            pre: ClinicalMeasurement::new(round1(pre_npc), round1(pre_npa)),
            post: ClinicalMeasurement::new(round1(pre_npc - npc_gain), round1(pre_npa - npa_gain)),
        }
    }

    /// Scored record for a random exercise, stamped at `at`.
    pub fn record_at(&mut self, patient: &PatientProfile, at: DateTime<Utc>) -> AssessmentRecord {
        let exercise = *ExerciseKind::ALL
            .choose(&mut self.rng)
            .unwrap_or(&ExerciseKind::Vergence);
        AssessmentRecord::assess_at(self.input(patient, exercise), at)
    }

    /// Fill a log with `count` records, one per day ending today.
    pub fn fill_log(&mut self, patient: &PatientProfile, count: usize) -> SessionLog {
        let mut log = SessionLog::new();
        let now = Utc::now();
        for i in 0..count {
            let days_ago = (count - 1 - i) as i64;
            log.append(self.record_at(patient, now - Duration::days(days_ago)));
        }
        tracing::debug!(count, "filled simulated session log");
        log
    }

    /// One-shot session summary for `exercise`.
    pub fn quick_session(&mut self, patient: &PatientProfile, exercise: ExerciseKind) -> QuickSession {
        let record = AssessmentRecord::assess(self.input(patient, exercise));
        QuickSession {
            date: record.recorded_at().format("%Y-%m-%d %H:%M").to_string(),
            exercise,
            score: record.composite(),
            duration: self.rng.gen_range(3..=10),
        }
    }
}

/// Clamp to 0.0..=1.0. NaN counts as never.
fn unit_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
