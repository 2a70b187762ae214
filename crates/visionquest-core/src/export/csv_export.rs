use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ExportError;
use crate::journal::{AssessmentRecord, SessionLog};

/// One flat CSV row. Field names become the header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow {
    pub id: String,
    pub recorded_at: String,
    pub patient_name: String,
    pub patient_age: u8,
    pub patient_category: &'static str,
    pub exercise: &'static str,
    pub fixation_stability: u8,
    pub fusion_range: u8,
    pub convergence_quality: u8,
    pub accommodation_facility: u8,
    pub binocular_coordination: u8,
    pub attention: u8,
    pub clarity: u8,
    pub comfort: u8,
    pub difficulty: &'static str,
    pub completion: &'static str,
    pub pre_npc_cm: f64,
    pub pre_npa_cm: f64,
    pub post_npc_cm: f64,
    pub post_npa_cm: f64,
    pub composite_score: u8,
}

impl From<&AssessmentRecord> for CsvRow {
    fn from(r: &AssessmentRecord) -> Self {
        let t = r.therapist();
        let p = r.patient_ratings();
        Self {
            id: r.id().to_string(),
            recorded_at: r.recorded_at().to_rfc3339(),
            patient_name: r.patient().name.clone(),
            patient_age: r.patient().age(),
            patient_category: r.patient().category.as_str(),
            exercise: r.exercise().key(),
            fixation_stability: t.fixation_stability,
            fusion_range: t.fusion_range,
            convergence_quality: t.convergence_quality,
            accommodation_facility: t.accommodation_facility,
            binocular_coordination: t.binocular_coordination,
            attention: t.attention,
            clarity: p.clarity,
            comfort: p.comfort,
            difficulty: p.difficulty.as_str(),
            completion: p.completion.as_str(),
            pre_npc_cm: r.pre().npc_cm(),
            pre_npa_cm: r.pre().npa_cm(),
            post_npc_cm: r.post().npc_cm(),
            post_npa_cm: r.post().npa_cm(),
            composite_score: r.composite(),
        }
    }
}

/// Write the log as CSV. Returns `false` without writing anything when the
/// log is empty.
pub fn write_csv<W: Write>(log: &SessionLog, writer: W) -> Result<bool, ExportError> {
    if log.is_empty() {
        return Ok(false);
    }
    let mut wtr = csv::Writer::from_writer(writer);
    for record in log {
        wtr.serialize(CsvRow::from(record))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(true)
}

/// Export the log to `path`. `Ok(None)` when the log is empty.
pub fn export_csv(log: &SessionLog, path: &Path) -> Result<Option<PathBuf>, ExportError> {
    let mut buf = Vec::new();
    if !write_csv(log, &mut buf)? {
        tracing::debug!("csv export skipped: empty log");
        return Ok(None);
    }
    super::write_file(path, &buf)?;
    tracing::info!(path = %path.display(), rows = log.len(), "csv exported");
    Ok(Some(path.to_path_buf()))
}
