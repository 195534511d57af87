use async_trait::async_trait;
use chrono::NaiveDateTime;
use medsynth_core::{Comment, ConditionEvent, Patient, Report, VitalSample};
use medsynth_narrative::CommentDraft;
use medsynth_timeline::TimelineProjection;

use crate::error::Result;
use crate::manifest::RunManifest;

/// Storage contract for generated artifacts, keyed by patient id.
///
/// Loads of absent data return [`StoreError::NotFound`](crate::StoreError::NotFound);
/// the one exception is comments, where a missing log is simply empty.
#[async_trait]
pub trait PatientStore: Send + Sync {
    async fn save_patients(&self, patients: &[Patient]) -> Result<()>;
    async fn load_patients(&self) -> Result<Vec<Patient>>;

    async fn save_vitals(&self, patient_id: &str, samples: &[VitalSample]) -> Result<()>;
    /// Chronological.
    async fn load_vitals(&self, patient_id: &str) -> Result<Vec<VitalSample>>;

    async fn save_reports(&self, patient_id: &str, reports: &[Report]) -> Result<()>;
    /// Newest first.
    async fn load_reports(&self, patient_id: &str) -> Result<Vec<Report>>;

    async fn save_timeline(
        &self,
        patient_id: &str,
        events: &[ConditionEvent],
        projection: &TimelineProjection,
    ) -> Result<()>;
    async fn load_timeline(&self, patient_id: &str) -> Result<Vec<ConditionEvent>>;
    async fn load_projection(&self, patient_id: &str) -> Result<TimelineProjection>;

    /// Replace a patient's comment log.
    async fn save_comments(&self, patient_id: &str, comments: &[Comment]) -> Result<()>;
    /// Newest first. A patient without a log has no comments.
    async fn load_comments(&self, patient_id: &str) -> Result<Vec<Comment>>;
    /// Validate a draft, give it the next id and append it. Concurrent calls
    /// are serialized so no two comments share an id.
    async fn add_comment(&self, patient_id: &str, draft: CommentDraft, at: NaiveDateTime) -> Result<Comment>;

    async fn save_manifest(&self, manifest: &RunManifest) -> Result<()>;
    async fn load_manifest(&self) -> Result<RunManifest>;
}
