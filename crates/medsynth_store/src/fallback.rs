//! Generate-on-demand when upstream data is missing.
//!
//! A missing patient table seeds the demo patient with 30 days of vitals. A
//! patient without stored vitals gets a fresh series. Both are persisted so
//! later reads see the same data. Errors other than "not found" propagate.

use chrono::NaiveDateTime;
use medsynth_cohort::demo_patient;
use medsynth_core::{Patient, VitalSample};
use medsynth_vitals::VitalsGenerator;
use rand::Rng;

use crate::error::Result;
use crate::store::PatientStore;

/// Days of vitals generated on demand.
pub const FALLBACK_VITALS_DAYS: u32 = 30;

/// Stored patients, or the demo patient (persisted, with vitals) when none exist.
pub async fn ensure_patients<R: Rng + Send>(
    store: &dyn PatientStore,
    rng: &mut R,
    now: NaiveDateTime,
) -> Result<Vec<Patient>> {
    match store.load_patients().await {
        Ok(patients) if !patients.is_empty() => Ok(patients),
        Ok(_) => seed_demo(store, rng, now).await,
        Err(e) if e.is_not_found() => seed_demo(store, rng, now).await,
        Err(e) => Err(e),
    }
}

async fn seed_demo<R: Rng + Send>(store: &dyn PatientStore, rng: &mut R, now: NaiveDateTime) -> Result<Vec<Patient>> {
    tracing::warn!("No patient data found, seeding demo patient");
    let patient = demo_patient(now.date());
    store.save_patients(std::slice::from_ref(&patient)).await?;
    let vitals = VitalsGenerator::new().recent(rng, &patient.id, now.date(), FALLBACK_VITALS_DAYS);
    store.save_vitals(&patient.id, &vitals).await?;
    Ok(vec![patient])
}

/// Stored vitals for a patient, or a freshly generated (and persisted) series.
pub async fn vitals_or_generate<R: Rng + Send>(
    store: &dyn PatientStore,
    rng: &mut R,
    patient_id: &str,
    now: NaiveDateTime,
    days: u32,
) -> Result<Vec<VitalSample>> {
    match store.load_vitals(patient_id).await {
        Ok(samples) => Ok(samples),
        Err(e) if e.is_not_found() => {
            tracing::info!("No stored vitals for {}, generating {} days", patient_id, days);
            let samples = VitalsGenerator::new().recent(rng, patient_id, now.date(), days);
            store.save_vitals(patient_id, &samples).await?;
            Ok(samples)
        }
        Err(e) => Err(e),
    }
}
