//! Run manifest: enough to identify and replay a generation run.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: Uuid,
    /// Master seed; rerunning with it reproduces every artifact.
    pub seed: u64,
    pub generated_at: NaiveDateTime,
    pub patient_count: usize,
    /// Ids of patients with a full artifact set.
    pub detailed_patients: Vec<String>,
}

impl RunManifest {
    pub fn new(seed: u64, generated_at: NaiveDateTime, patient_count: usize, detailed_patients: Vec<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            seed,
            generated_at,
            patient_count,
            detailed_patients,
        }
    }
}
