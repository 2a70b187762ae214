//! Per-user session context.
//!
//! Holds the one current exercise slot, the form inputs and the append-only
//! log. Handlers receive it explicitly; there is no global state.

use std::time::Duration;

use chrono::Utc;

use crate::events::Event;
use crate::journal::{AssessmentInput, AssessmentRecord, SessionLog};
use crate::model::{
    ClinicalMeasurement, ExerciseKind, ExerciseSettings, PatientProfile, PatientRatings,
    TherapistRatings,
};
use crate::stats::LogSummary;
use crate::storage::TargetsConfig;

use super::engine::ExerciseSession;

/// Runtime knobs taken from the configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub countdown_units: u32,
    pub tick_interval: Duration,
    pub targets: TargetsConfig,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            countdown_units: 10,
            tick_interval: Duration::from_secs(1),
            targets: TargetsConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    settings: SessionSettings,
    patient: PatientProfile,
    pre: ClinicalMeasurement,
    post: ClinicalMeasurement,
    therapist: TherapistRatings,
    patient_ratings: PatientRatings,
    session: ExerciseSession,
    log: SessionLog,
}

impl SessionContext {
    /// Fresh context with Vergence selected and an empty log.
    pub fn new(settings: SessionSettings, patient: PatientProfile) -> Self {
        let session = ExerciseSession::new(ExerciseKind::Vergence, settings.countdown_units);
        Self {
            settings,
            patient,
            pre: ClinicalMeasurement::default(),
            post: ClinicalMeasurement::default(),
            therapist: TherapistRatings::default(),
            patient_ratings: PatientRatings::default(),
            session,
            log: SessionLog::new(),
        }
    }

    // ── Form inputs ──────────────────────────────────────────────────

    pub fn patient(&self) -> &PatientProfile {
        &self.patient
    }

    pub fn set_patient(&mut self, patient: PatientProfile) {
        self.patient = patient;
    }

    pub fn pre(&self) -> &ClinicalMeasurement {
        &self.pre
    }

    pub fn set_pre(&mut self, measurement: ClinicalMeasurement) {
        self.pre = measurement;
    }

    pub fn post(&self) -> &ClinicalMeasurement {
        &self.post
    }

    pub fn set_post(&mut self, measurement: ClinicalMeasurement) {
        self.post = measurement;
    }

    pub fn therapist_ratings(&self) -> &TherapistRatings {
        &self.therapist
    }

    pub fn set_therapist_ratings(&mut self, ratings: TherapistRatings) {
        self.therapist = ratings;
    }

    pub fn patient_ratings(&self) -> &PatientRatings {
        &self.patient_ratings
    }

    pub fn set_patient_ratings(&mut self, ratings: PatientRatings) {
        self.patient_ratings = ratings;
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    // ── Exercise ─────────────────────────────────────────────────────

    pub fn session(&self) -> &ExerciseSession {
        &self.session
    }

    /// Selected exercise and its target glyphs.
    pub fn exercise_settings(&self) -> ExerciseSettings {
        let kind = self.session.exercise();
        ExerciseSettings::new(kind, self.settings.targets.for_kind(kind).to_vec())
    }

    /// Select an exercise, replacing the slot with a fresh idle session.
    ///
    /// Ignored while an exercise is running.
    pub fn select(&mut self, exercise: ExerciseKind) -> Option<Event> {
        if self.session.is_running() {
            tracing::debug!(%exercise, "selection ignored while running");
            return None;
        }
        self.session = ExerciseSession::new(exercise, self.settings.countdown_units);
        Some(Event::ExerciseSelected {
            exercise,
            at: Utc::now(),
        })
    }

    pub fn start(&mut self, exercise: ExerciseKind) -> Event {
        self.session.set_duration(self.settings.countdown_units);
        let event = self.session.start(exercise);
        tracing::info!(%exercise, countdown = self.session.duration(), "exercise started");
        event
    }

    pub fn stop(&mut self) -> Option<Event> {
        let event = self.session.stop();
        if event.is_some() {
            tracing::info!(remaining = self.session.remaining(), "exercise stopped");
        }
        event
    }

    pub fn tick(&mut self) -> Option<Event> {
        let event = self.session.tick();
        if let Some(Event::ExerciseCompleted { exercise, .. }) = &event {
            tracing::info!(%exercise, "exercise completed");
        }
        event
    }

    // ── Log ──────────────────────────────────────────────────────────

    /// Score the current inputs and append the result to the log.
    pub fn save_assessment(&mut self) -> Event {
        let record = AssessmentRecord::assess(AssessmentInput {
            patient: self.patient.clone(),
            exercise: self.session.exercise(),
            therapist: self.therapist,
            patient_ratings: self.patient_ratings,
            pre: self.pre,
            post: self.post,
        });
        let exercise = record.exercise();
        let composite = record.composite();
        let log_len = self.log.append(record);
        tracing::info!(%exercise, composite, log_len, "assessment saved");
        Event::AssessmentSaved {
            exercise,
            composite,
            log_len,
            at: Utc::now(),
        }
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn summary(&self) -> LogSummary {
        LogSummary::from_log(&self.log)
    }

    pub fn clear_log(&mut self) -> Event {
        let dropped = self.log.len();
        self.log.clear();
        tracing::info!(dropped, "session log cleared");
        Event::LogCleared { at: Utc::now() }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(SessionSettings::default(), PatientProfile::default())
    }
}
