//! File names under the data directory.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn patients(&self) -> PathBuf {
        self.root.join("patients.json")
    }

    pub fn patients_csv(&self) -> PathBuf {
        self.root.join("patients.csv")
    }

    pub fn manifest(&self) -> PathBuf {
        self.root.join("manifest.json")
    }

    pub fn vitals(&self, patient_id: &str) -> PathBuf {
        self.root.join(format!("vitals_{}.json", patient_id))
    }

    pub fn reports(&self, patient_id: &str) -> PathBuf {
        self.root.join(format!("reports_{}.json", patient_id))
    }

    pub fn condition_timeline(&self, patient_id: &str) -> PathBuf {
        self.root.join(format!("condition_timeline_{}.json", patient_id))
    }

    /// The visualization projection.
    pub fn timeline(&self, patient_id: &str) -> PathBuf {
        self.root.join(format!("timeline_{}.json", patient_id))
    }

    pub fn comments(&self, patient_id: &str) -> PathBuf {
        self.root.join(format!("comments_{}.jsonl", patient_id))
    }

    /// Marker file held while a comment is appended.
    pub fn comments_lock(&self, patient_id: &str) -> PathBuf {
        self.root.join(format!("comments_{}.jsonl.lock", patient_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        let layout = DataLayout::new("data");
        assert_eq!(layout.patients(), PathBuf::from("data/patients.json"));
        assert_eq!(layout.vitals("P001"), PathBuf::from("data/vitals_P001.json"));
        assert_eq!(layout.condition_timeline("P002"), PathBuf::from("data/condition_timeline_P002.json"));
        assert_eq!(layout.timeline("P002"), PathBuf::from("data/timeline_P002.json"));
        assert_eq!(layout.comments("P003"), PathBuf::from("data/comments_P003.jsonl"));
        assert_eq!(layout.comments_lock("P003"), PathBuf::from("data/comments_P003.jsonl.lock"));
    }
}
