//! Write a generated cohort through a store.

use medsynth_cohort::Cohort;

use crate::error::Result;
use crate::manifest::RunManifest;
use crate::store::PatientStore;

/// Persist every identity, every detailed artifact set and the run manifest.
pub async fn persist_cohort(store: &dyn PatientStore, cohort: &Cohort) -> Result<RunManifest> {
    store.save_patients(&cohort.patients).await?;

    for artifacts in &cohort.detailed {
        let id = artifacts.patient.id.as_str();
        store.save_vitals(id, &artifacts.vitals).await?;
        store.save_reports(id, &artifacts.reports).await?;
        store.save_timeline(id, &artifacts.timeline, &artifacts.projection).await?;
        store.save_comments(id, &artifacts.comments).await?;
        tracing::debug!("Persisted artifacts for {}", id);
    }

    let manifest = RunManifest::new(
        cohort.seed,
        cohort.generated_at,
        cohort.patients.len(),
        cohort.detailed.iter().map(|a| a.patient.id.clone()).collect(),
    );
    store.save_manifest(&manifest).await?;
    tracing::info!(
        "Persisted run {} ({} patients, seed {})",
        manifest.run_id,
        manifest.patient_count,
        manifest.seed
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use chrono::NaiveDate;
    use medsynth_cohort::{CohortGenerator, CohortPlan};

    #[tokio::test]
    async fn test_persist_then_load() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
        let plan = CohortPlan {
            seed: 5,
            patients: 4,
            detailed_patients: 2,
            vitals_days: 5,
            reports_per_patient: 3,
            comments_per_patient: 3,
        };
        let cohort = CohortGenerator::new(plan, now).generate().await.unwrap();
        let store = MemoryStore::new();
        let manifest = persist_cohort(&store, &cohort).await.unwrap();

        assert_eq!(manifest.seed, 5);
        assert_eq!(manifest.detailed_patients, vec!["P001", "P002"]);
        assert_eq!(store.load_patients().await.unwrap().len(), 4);
        assert_eq!(store.load_vitals("P002").await.unwrap().len(), 20);
        assert_eq!(store.load_comments("P001").await.unwrap(), cohort.detailed[0].comments);
        assert!(store.load_vitals("P003").await.unwrap_err().is_not_found());
        assert_eq!(store.load_manifest().await.unwrap(), manifest);
    }
}
