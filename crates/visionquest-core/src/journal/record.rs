use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::model::{
    ClinicalMeasurement, ExerciseKind, PatientProfile, PatientRatings, TherapistRatings,
};
use crate::scoring::composite_score;

/// Rating and measurement inputs at save time.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentInput {
    pub patient: PatientProfile,
    pub exercise: ExerciseKind,
    pub therapist: TherapistRatings,
    pub patient_ratings: PatientRatings,
    pub pre: ClinicalMeasurement,
    pub post: ClinicalMeasurement,
}

#[cfg(test)]
impl AssessmentInput {
    pub(crate) fn sample(exercise: ExerciseKind) -> Self {
        Self {
            patient: PatientProfile::default(),
            exercise,
            therapist: TherapistRatings::default(),
            patient_ratings: PatientRatings::default(),
            pre: ClinicalMeasurement::new(12.0, 10.0),
            post: ClinicalMeasurement::new(10.0, 9.0),
        }
    }
}

/// One completed session. Immutable once built.
///
/// The composite score is computed in [`AssessmentRecord::assess`] and there
/// is no way to set it directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentRecord {
    id: Uuid,
    recorded_at: DateTime<Utc>,
    patient: PatientProfile,
    exercise: ExerciseKind,
    therapist: TherapistRatings,
    patient_ratings: PatientRatings,
    pre: ClinicalMeasurement,
    post: ClinicalMeasurement,
    composite: u8,
}

impl AssessmentRecord {
    /// Score `input` and stamp it with the current time.
    pub fn assess(input: AssessmentInput) -> Self {
        Self::assess_at(input, Utc::now())
    }

    pub fn assess_at(input: AssessmentInput, recorded_at: DateTime<Utc>) -> Self {
        let composite = composite_score(&input.therapist, &input.patient_ratings, &input.post);
        Self {
            id: Uuid::new_v4(),
            recorded_at,
            patient: input.patient,
            exercise: input.exercise,
            therapist: input.therapist,
            patient_ratings: input.patient_ratings,
            pre: input.pre,
            post: input.post,
            composite,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn patient(&self) -> &PatientProfile {
        &self.patient
    }

    pub fn exercise(&self) -> ExerciseKind {
        self.exercise
    }

    pub fn therapist(&self) -> &TherapistRatings {
        &self.therapist
    }

    pub fn patient_ratings(&self) -> &PatientRatings {
        &self.patient_ratings
    }

    pub fn pre(&self) -> &ClinicalMeasurement {
        &self.pre
    }

    pub fn post(&self) -> &ClinicalMeasurement {
        &self.post
    }

    pub fn composite(&self) -> u8 {
        self.composite
    }
}
