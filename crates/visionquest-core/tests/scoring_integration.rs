//! Integration tests for the composite score and the session log
//! aggregates built on top of it.

use visionquest_core::{
    score_breakdown, AssessmentSimulator, ClinicalMeasurement, Completion, Difficulty,
    ExerciseKind, LogSummary, PatientProfile, PatientRatings, SessionContext, TherapistRatings,
};

fn baseline_context() -> SessionContext {
    let mut ctx = SessionContext::default();
    ctx.set_patient(PatientProfile::with_age("Mia", 9));
    ctx.set_therapist_ratings(TherapistRatings::from_values([75, 70, 85, 80, 78, 72]));
    ctx.set_patient_ratings(PatientRatings::new(7, 6, Difficulty::Moderate, Completion::Completed));
    ctx
}

#[test]
fn worked_examples_match_published_scores() {
    let therapist = TherapistRatings::from_values([75, 70, 85, 80, 78, 72]);
    let patient = PatientRatings::new(7, 6, Difficulty::Moderate, Completion::Completed);

    let far = score_breakdown(&therapist, &patient, &ClinicalMeasurement::new(12.5, 15.5));
    assert_eq!(far.composite, 66);

    let near = score_breakdown(&therapist, &patient, &ClinicalMeasurement::new(8.0, 6.0));
    assert_eq!(near.npc_gain, 10.0);
    assert_eq!(near.npa_gain, 10.0);
    assert_eq!(near.composite, 68);
}

#[test]
fn out_of_range_inputs_are_clamped_before_scoring() {
    let therapist = TherapistRatings::from_values([250; 6]);
    let patient = PatientRatings::new(99, 99, Difficulty::Easy, Completion::Completed);
    let post = ClinicalMeasurement::new(-10.0, -10.0);
    let b = score_breakdown(&therapist, &patient, &post);
    assert_eq!(b.therapist_avg, 100.0);
    assert_eq!(b.patient_avg, 100.0);
    assert_eq!(b.composite, 99);
}

#[test]
fn full_session_workflow_builds_summary() {
    let mut ctx = baseline_context();

    // Three vergence sessions with steadily improving near points, one fusion.
    let posts = [(12.5, 15.5), (10.0, 9.0), (8.0, 6.0)];
    ctx.set_pre(ClinicalMeasurement::new(14.0, 17.0));
    for (npc, npa) in posts {
        ctx.start(ExerciseKind::Vergence);
        while ctx.tick().is_some() {}
        ctx.set_post(ClinicalMeasurement::new(npc, npa));
        ctx.save_assessment();
        ctx.set_pre(ClinicalMeasurement::new(npc, npa));
    }
    ctx.select(ExerciseKind::Fusion);
    ctx.save_assessment();

    let summary = ctx.summary();
    assert_eq!(summary.count, 4);
    assert_eq!(summary.most_frequent_exercise, Some(ExerciseKind::Vergence));
    assert_eq!(summary.max_score, Some(68));

    let scores: Vec<f64> = ctx.log().iter().map(|r| r.composite() as f64).collect();
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    assert_eq!(summary.mean_score, Some(mean));

    let delta = summary.measurement_delta.unwrap();
    assert!((delta.npc_cm - (8.0 - 14.0)).abs() < 1e-9);
    assert!((delta.npa_cm - (6.0 - 17.0)).abs() < 1e-9);
}

#[test]
fn simulated_logs_aggregate_consistently() {
    let patient = PatientProfile::default();
    let mut sim = AssessmentSimulator::with_seed(2024);
    let log = sim.fill_log(&patient, 40);
    let summary = LogSummary::from_log(&log);

    assert_eq!(summary.count, 40);
    let max = log.iter().map(|r| r.composite()).max();
    assert_eq!(summary.max_score, max);
    let mean = summary.mean_score.unwrap();
    assert!(mean >= 0.0 && mean <= 100.0);
}
