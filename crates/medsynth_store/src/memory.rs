//! In-process store with the same contract as the file store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use medsynth_core::documents::{sort_newest_first, sort_reports_newest_first};
use medsynth_core::{Comment, ConditionEvent, Patient, Report, VitalSample};
use medsynth_narrative::CommentDraft;
use medsynth_timeline::TimelineProjection;
use tokio::sync::Mutex;

use crate::error::{Result, StoreError};
use crate::manifest::RunManifest;
use crate::store::PatientStore;

#[derive(Default)]
struct Inner {
    patients: Option<Vec<Patient>>,
    vitals: HashMap<String, Vec<VitalSample>>,
    reports: HashMap<String, Vec<Report>>,
    timelines: HashMap<String, (Vec<ConditionEvent>, TimelineProjection)>,
    comments: HashMap<String, Vec<Comment>>,
    manifest: Option<RunManifest>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn missing(what: &str, patient_id: &str) -> StoreError {
    StoreError::NotFound(format!("{} for {}", what, patient_id))
}

#[async_trait]
impl PatientStore for MemoryStore {
    async fn save_patients(&self, patients: &[Patient]) -> Result<()> {
        self.inner.lock().await.patients = Some(patients.to_vec());
        Ok(())
    }

    async fn load_patients(&self) -> Result<Vec<Patient>> {
        self.inner
            .lock()
            .await
            .patients
            .clone()
            .ok_or_else(|| StoreError::NotFound("patients".into()))
    }

    async fn save_vitals(&self, patient_id: &str, samples: &[VitalSample]) -> Result<()> {
        let mut ordered = samples.to_vec();
        ordered.sort_by_key(|s| s.timestamp);
        self.inner.lock().await.vitals.insert(patient_id.to_string(), ordered);
        Ok(())
    }

    async fn load_vitals(&self, patient_id: &str) -> Result<Vec<VitalSample>> {
        self.inner
            .lock()
            .await
            .vitals
            .get(patient_id)
            .cloned()
            .ok_or_else(|| missing("vitals", patient_id))
    }

    async fn save_reports(&self, patient_id: &str, reports: &[Report]) -> Result<()> {
        let mut ordered = reports.to_vec();
        sort_reports_newest_first(&mut ordered);
        self.inner.lock().await.reports.insert(patient_id.to_string(), ordered);
        Ok(())
    }

    async fn load_reports(&self, patient_id: &str) -> Result<Vec<Report>> {
        self.inner
            .lock()
            .await
            .reports
            .get(patient_id)
            .cloned()
            .ok_or_else(|| missing("reports", patient_id))
    }

    async fn save_timeline(
        &self,
        patient_id: &str,
        events: &[ConditionEvent],
        projection: &TimelineProjection,
    ) -> Result<()> {
        self.inner
            .lock()
            .await
            .timelines
            .insert(patient_id.to_string(), (events.to_vec(), projection.clone()));
        Ok(())
    }

    async fn load_timeline(&self, patient_id: &str) -> Result<Vec<ConditionEvent>> {
        self.inner
            .lock()
            .await
            .timelines
            .get(patient_id)
            .map(|(events, _)| events.clone())
            .ok_or_else(|| missing("timeline", patient_id))
    }

    async fn load_projection(&self, patient_id: &str) -> Result<TimelineProjection> {
        self.inner
            .lock()
            .await
            .timelines
            .get(patient_id)
            .map(|(_, projection)| projection.clone())
            .ok_or_else(|| missing("timeline", patient_id))
    }

    async fn save_comments(&self, patient_id: &str, comments: &[Comment]) -> Result<()> {
        self.inner
            .lock()
            .await
            .comments
            .insert(patient_id.to_string(), comments.to_vec());
        Ok(())
    }

    async fn load_comments(&self, patient_id: &str) -> Result<Vec<Comment>> {
        let mut comments = self
            .inner
            .lock()
            .await
            .comments
            .get(patient_id)
            .cloned()
            .unwrap_or_default();
        sort_newest_first(&mut comments);
        Ok(comments)
    }

    async fn add_comment(&self, patient_id: &str, draft: CommentDraft, at: NaiveDateTime) -> Result<Comment> {
        let mut inner = self.inner.lock().await;
        let log = inner.comments.entry(patient_id.to_string()).or_default();
        let comment = draft.into_comment(patient_id, log.len() + 1, at)?;
        log.push(comment.clone());
        Ok(comment)
    }

    async fn save_manifest(&self, manifest: &RunManifest) -> Result<()> {
        self.inner.lock().await.manifest = Some(manifest.clone());
        Ok(())
    }

    async fn load_manifest(&self) -> Result<RunManifest> {
        self.inner
            .lock()
            .await
            .manifest
            .clone()
            .ok_or_else(|| StoreError::NotFound("manifest".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use medsynth_core::{Profession, Topic};

    #[tokio::test]
    async fn test_comment_log_appends_and_reads_newest_first() {
        let store = MemoryStore::new();
        let base = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
        for i in 0..3 {
            let draft = CommentDraft {
                author: "Dr. Smith".into(),
                profession: Profession::Doctor,
                topic: Topic::TestResults,
                text: format!("Note {}", i),
            };
            store
                .add_comment("P001", draft, base + chrono::Duration::minutes(i))
                .await
                .unwrap();
        }
        let ids: Vec<String> = store.load_comments("P001").await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["C003", "C002", "C001"]);
        assert!(store.load_comments("P404").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_artifacts_not_found() {
        let store = MemoryStore::new();
        assert!(store.load_patients().await.unwrap_err().is_not_found());
        assert!(store.load_reports("P001").await.unwrap_err().is_not_found());
        assert!(store.load_projection("P001").await.unwrap_err().is_not_found());
    }
}
