//! Append-only session log.
//!
//! Records live for the lifetime of the process. The only mutation besides
//! appending is a full clear.

mod record;

pub use record::{AssessmentRecord, AssessmentInput};

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SessionLog {
    records: Vec<AssessmentRecord>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed assessment. Returns the new length.
    pub fn append(&mut self, record: AssessmentRecord) -> usize {
        self.records.push(record);
        self.records.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[AssessmentRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssessmentRecord> {
        self.records.iter()
    }

    pub fn first(&self) -> Option<&AssessmentRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&AssessmentRecord> {
        self.records.last()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<'a> IntoIterator for &'a SessionLog {
    type Item = &'a AssessmentRecord;
    type IntoIter = std::slice::Iter<'a, AssessmentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExerciseKind;

    #[test]
    fn append_preserves_order() {
        let mut log = SessionLog::new();
        assert!(log.is_empty());
        for kind in [ExerciseKind::Fusion, ExerciseKind::Vergence, ExerciseKind::SmoothPursuit] {
            log.append(AssessmentRecord::assess(AssessmentInput::sample(kind)));
        }
        assert_eq!(log.len(), 3);
        let kinds: Vec<_> = log.iter().map(|r| r.exercise()).collect();
        assert_eq!(
            kinds,
            vec![ExerciseKind::Fusion, ExerciseKind::Vergence, ExerciseKind::SmoothPursuit]
        );
        assert_eq!(log.first().map(|r| r.exercise()), Some(ExerciseKind::Fusion));
        assert_eq!(log.last().map(|r| r.exercise()), Some(ExerciseKind::SmoothPursuit));
    }

    #[test]
    fn clear_empties_log() {
        let mut log = SessionLog::new();
        log.append(AssessmentRecord::assess(AssessmentInput::sample(ExerciseKind::Vergence)));
        log.clear();
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }
}
