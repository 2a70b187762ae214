use serde::{Deserialize, Serialize};

use crate::journal::SessionLog;
use crate::model::ExerciseKind;

/// Change in clinical measurements across the log: last post minus first pre.
///
/// Negative values mean the near point moved closer to the eyes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementDelta {
    pub npc_cm: f64,
    pub npa_cm: f64,
}

/// Everything the log table and the PDF report show below the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    pub count: usize,
    pub mean_score: Option<f64>,
    pub max_score: Option<u8>,
    pub most_frequent_exercise: Option<ExerciseKind>,
    pub measurement_delta: Option<MeasurementDelta>,
}

impl LogSummary {
    pub fn from_log(log: &SessionLog) -> Self {
        Self {
            count: log.len(),
            mean_score: mean_score(log),
            max_score: max_score(log),
            most_frequent_exercise: most_frequent_exercise(log),
            measurement_delta: measurement_delta(log),
        }
    }
}

/// Arithmetic mean of the composite scores.
pub fn mean_score(log: &SessionLog) -> Option<f64> {
    if log.is_empty() {
        return None;
    }
    let sum: u64 = log.iter().map(|r| r.composite() as u64).sum();
    Some(sum as f64 / log.len() as f64)
}

pub fn max_score(log: &SessionLog) -> Option<u8> {
    log.iter().map(|r| r.composite()).max()
}

/// Mode of the exercise kind. Ties go to the kind seen first.
pub fn most_frequent_exercise(log: &SessionLog) -> Option<ExerciseKind> {
    // First-seen order is the tie-breaker, so keep counts in a Vec.
    let mut counts: Vec<(ExerciseKind, usize)> = Vec::new();
    for record in log {
        match counts.iter_mut().find(|(kind, _)| *kind == record.exercise()) {
            Some((_, n)) => *n += 1,
            None => counts.push((record.exercise(), 1)),
        }
    }

    let mut best: Option<(ExerciseKind, usize)> = None;
    for (kind, n) in counts {
        if best.map_or(true, |(_, best_n)| n > best_n) {
            best = Some((kind, n));
        }
    }
    best.map(|(kind, _)| kind)
}

pub fn measurement_delta(log: &SessionLog) -> Option<MeasurementDelta> {
    let first = log.first()?;
    let last = log.last()?;
    Some(MeasurementDelta {
        npc_cm: last.post().npc_cm() - first.pre().npc_cm(),
        npa_cm: last.post().npa_cm() - first.pre().npa_cm(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{AssessmentInput, AssessmentRecord};
    use crate::model::{ClinicalMeasurement, TherapistRatings};

    fn record(kind: ExerciseKind, therapist: u32) -> AssessmentRecord {
        let mut input = AssessmentInput::sample(kind);
        input.therapist = TherapistRatings::from_values([therapist; 6]);
        AssessmentRecord::assess(input)
    }

    #[test]
    fn empty_log_has_no_aggregates() {
        let summary = LogSummary::from_log(&SessionLog::new());
        assert_eq!(summary.count, 0);
        assert!(summary.mean_score.is_none());
        assert!(summary.max_score.is_none());
        assert!(summary.most_frequent_exercise.is_none());
        assert!(summary.measurement_delta.is_none());
    }

    #[test]
    fn mean_and_max_match_direct_computation() {
        let mut log = SessionLog::new();
        for t in [40, 60, 90, 10] {
            log.append(record(ExerciseKind::Fusion, t));
        }
        let scores: Vec<u8> = log.iter().map(|r| r.composite()).collect();
        let expected_mean = scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64;
        assert_eq!(mean_score(&log), Some(expected_mean));
        assert_eq!(max_score(&log), scores.iter().copied().max());
    }

    #[test]
    fn mode_picks_most_frequent() {
        let mut log = SessionLog::new();
        log.append(record(ExerciseKind::Fusion, 50));
        for _ in 0..3 {
            log.append(record(ExerciseKind::Vergence, 50));
        }
        assert_eq!(most_frequent_exercise(&log), Some(ExerciseKind::Vergence));
    }

    #[test]
    fn mode_ties_go_to_first_seen() {
        let mut log = SessionLog::new();
        log.append(record(ExerciseKind::SmoothPursuit, 50));
        log.append(record(ExerciseKind::Fusion, 50));
        log.append(record(ExerciseKind::Fusion, 50));
        log.append(record(ExerciseKind::SmoothPursuit, 50));
        assert_eq!(most_frequent_exercise(&log), Some(ExerciseKind::SmoothPursuit));
    }

    #[test]
    fn delta_is_last_post_minus_first_pre() {
        let mut log = SessionLog::new();
        let mut first = AssessmentInput::sample(ExerciseKind::Vergence);
        first.pre = ClinicalMeasurement::new(15.0, 12.0);
        first.post = ClinicalMeasurement::new(13.0, 11.0);
        let mut last = AssessmentInput::sample(ExerciseKind::Vergence);
        last.pre = ClinicalMeasurement::new(11.0, 10.0);
        last.post = ClinicalMeasurement::new(9.5, 7.0);
        log.append(AssessmentRecord::assess(first));
        log.append(AssessmentRecord::assess(last));

        let delta = measurement_delta(&log).unwrap();
        assert!((delta.npc_cm - -5.5).abs() < 1e-9);
        assert!((delta.npa_cm - -5.0).abs() < 1e-9);
    }
}
