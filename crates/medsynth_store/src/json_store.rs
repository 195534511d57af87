//! JSON-file store under a data directory.

use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use medsynth_core::documents::{sort_newest_first, sort_reports_newest_first};
use medsynth_core::{Comment, ConditionEvent, Patient, Report, VitalSample};
use medsynth_narrative::CommentDraft;
use medsynth_timeline::TimelineProjection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{Result, StoreError};
use crate::layout::DataLayout;
use crate::legacy;
use crate::lockfile::{FileLock, LockPolicy};
use crate::manifest::RunManifest;
use crate::store::PatientStore;

pub struct JsonFileStore {
    layout: DataLayout,
    export_legacy_csv: bool,
    /// Serializes comment appends within this process; the marker file in
    /// [`DataLayout::comments_lock`] does the same across processes.
    comment_lock: Mutex<()>,
    lock_policy: LockPolicy,
}

impl JsonFileStore {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self {
            layout: DataLayout::new(root),
            export_legacy_csv: false,
            comment_lock: Mutex::new(()),
            lock_policy: LockPolicy::default(),
        }
    }

    pub fn with_lock_policy(mut self, policy: LockPolicy) -> Self {
        self.lock_policy = policy;
        self
    }

    /// Also write `patients.csv` whenever patients are saved.
    pub fn with_legacy_csv(mut self, enabled: bool) -> Self {
        self.export_legacy_csv = enabled;
        self
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// Read the flattened legacy table, decoding nested cells tolerantly.
    pub async fn load_legacy_patients(&self) -> Result<Vec<Patient>> {
        let path = self.layout.patients_csv();
        let bytes = read_bytes(&path).await?;
        legacy::decode_patients(&bytes)
    }

    async fn append_line(&self, path: &Path, line: &str) -> Result<()> {
        ensure_parent(path).await?;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok(())
    }
}

async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound(path.display().to_string())),
        Err(e) => Err(e.into()),
    }
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path).await?;
    let bytes = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = read_bytes(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Parse a JSONL comment log. Unreadable lines are skipped with a warning.
fn parse_comment_log(text: &str, path: &Path) -> Vec<Comment> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str::<Comment>(line) {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!("Skipping unreadable comment line in {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl PatientStore for JsonFileStore {
    async fn save_patients(&self, patients: &[Patient]) -> Result<()> {
        write_json(&self.layout.patients(), patients).await?;
        if self.export_legacy_csv {
            let bytes = legacy::encode_patients(patients)?;
            let path = self.layout.patients_csv();
            ensure_parent(&path).await?;
            tokio::fs::write(&path, bytes).await?;
        }
        tracing::debug!("Saved {} patients to {}", patients.len(), self.layout.root().display());
        Ok(())
    }

    async fn load_patients(&self) -> Result<Vec<Patient>> {
        match read_json::<Vec<Patient>>(&self.layout.patients()).await {
            Err(e) if e.is_not_found() => {
                // Older data directories only carry the flattened table.
                match self.load_legacy_patients().await {
                    Ok(patients) => {
                        tracing::info!("Loaded {} patients from legacy patients.csv", patients.len());
                        Ok(patients)
                    }
                    Err(legacy_err) if legacy_err.is_not_found() => Err(e),
                    Err(legacy_err) => Err(legacy_err),
                }
            }
            other => other,
        }
    }

    async fn save_vitals(&self, patient_id: &str, samples: &[VitalSample]) -> Result<()> {
        write_json(&self.layout.vitals(patient_id), samples).await
    }

    async fn load_vitals(&self, patient_id: &str) -> Result<Vec<VitalSample>> {
        let mut samples: Vec<VitalSample> = read_json(&self.layout.vitals(patient_id)).await?;
        samples.sort_by_key(|s| s.timestamp);
        Ok(samples)
    }

    async fn save_reports(&self, patient_id: &str, reports: &[Report]) -> Result<()> {
        let mut ordered = reports.to_vec();
        sort_reports_newest_first(&mut ordered);
        write_json(&self.layout.reports(patient_id), &ordered).await
    }

    async fn load_reports(&self, patient_id: &str) -> Result<Vec<Report>> {
        let mut reports: Vec<Report> = read_json(&self.layout.reports(patient_id)).await?;
        sort_reports_newest_first(&mut reports);
        Ok(reports)
    }

    async fn save_timeline(
        &self,
        patient_id: &str,
        events: &[ConditionEvent],
        projection: &TimelineProjection,
    ) -> Result<()> {
        write_json(&self.layout.condition_timeline(patient_id), events).await?;
        write_json(&self.layout.timeline(patient_id), projection).await
    }

    async fn load_timeline(&self, patient_id: &str) -> Result<Vec<ConditionEvent>> {
        read_json(&self.layout.condition_timeline(patient_id)).await
    }

    async fn load_projection(&self, patient_id: &str) -> Result<TimelineProjection> {
        read_json(&self.layout.timeline(patient_id)).await
    }

    async fn save_comments(&self, patient_id: &str, comments: &[Comment]) -> Result<()> {
        let _guard = self.comment_lock.lock().await;
        let _file_lock = FileLock::acquire(&self.layout.comments_lock(patient_id), self.lock_policy).await?;
        let mut ordered = comments.to_vec();
        sort_newest_first(&mut ordered);
        let mut text = String::new();
        for c in &ordered {
            text.push_str(&serde_json::to_string(c)?);
            text.push('\n');
        }
        let path = self.layout.comments(patient_id);
        ensure_parent(&path).await?;
        tokio::fs::write(&path, text).await?;
        Ok(())
    }

    async fn load_comments(&self, patient_id: &str) -> Result<Vec<Comment>> {
        let path = self.layout.comments(patient_id);
        let bytes = match read_bytes(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let mut comments = parse_comment_log(&String::from_utf8_lossy(&bytes), &path);
        sort_newest_first(&mut comments);
        Ok(comments)
    }

    async fn add_comment(&self, patient_id: &str, draft: CommentDraft, at: NaiveDateTime) -> Result<Comment> {
        draft.validate()?;
        let _guard = self.comment_lock.lock().await;
        let _file_lock = FileLock::acquire(&self.layout.comments_lock(patient_id), self.lock_policy).await?;
        let count = self.load_comments(patient_id).await?.len();
        let comment = draft.into_comment(patient_id, count + 1, at)?;
        let line = serde_json::to_string(&comment)?;
        self.append_line(&self.layout.comments(patient_id), &line).await?;
        tracing::info!("Added comment {} for {} by {}", comment.id, patient_id, comment.author);
        Ok(comment)
    }

    async fn save_manifest(&self, manifest: &RunManifest) -> Result<()> {
        write_json(&self.layout.manifest(), manifest).await
    }

    async fn load_manifest(&self) -> Result<RunManifest> {
        read_json(&self.layout.manifest()).await
    }
}
