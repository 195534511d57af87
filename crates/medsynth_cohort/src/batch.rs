//! Batch cohort generation across blocking workers.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use futures::future::join_all;
use medsynth_core::rng::{entropy_seed, seeded, worker_seed};
use medsynth_core::{Comment, ConditionEvent, GenerationConfig, Patient, Report, VitalSample};
use medsynth_narrative::{CommentSynthesizer, ReportSynthesizer};
use medsynth_timeline::{project, TimelineGenerator, TimelineProjection};
use medsynth_vitals::VitalsGenerator;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::identity::generate_identity;

/// A run's shape with the master seed already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortPlan {
    pub seed: u64,
    pub patients: usize,
    pub detailed_patients: usize,
    pub vitals_days: u32,
    pub reports_per_patient: usize,
    pub comments_per_patient: usize,
}

impl CohortPlan {
    /// Resolve a plan from config, drawing a master seed when none is set.
    pub fn from_config(cfg: &GenerationConfig) -> Self {
        let seed = cfg.seed.unwrap_or_else(entropy_seed);
        Self {
            seed,
            patients: cfg.patients,
            detailed_patients: cfg.detailed_patients.min(cfg.patients),
            vitals_days: cfg.vitals_days,
            reports_per_patient: cfg.reports_per_patient,
            comments_per_patient: cfg.comments_per_patient,
        }
    }
}

/// Everything generated for one detailed patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientArtifacts {
    pub patient: Patient,
    /// Chronological.
    pub vitals: Vec<VitalSample>,
    /// All conditions merged, sorted by date.
    pub timeline: Vec<ConditionEvent>,
    pub projection: TimelineProjection,
    /// Newest first.
    pub reports: Vec<Report>,
    /// Newest first.
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone)]
pub struct Cohort {
    pub seed: u64,
    pub generated_at: NaiveDateTime,
    /// Every identity, in id order.
    pub patients: Vec<Patient>,
    /// Artifact sets for the leading `detailed_patients`, in id order.
    pub detailed: Vec<PatientArtifacts>,
}

/// Derive every artifact for one patient from one random stream.
pub fn artifacts_for<R: Rng + ?Sized>(rng: &mut R, patient: Patient, plan: &CohortPlan, now: NaiveDateTime) -> PatientArtifacts {
    let today = now.date();
    let vitals = VitalsGenerator::new().recent(rng, &patient.id, today, plan.vitals_days);
    let timeline = TimelineGenerator::default().generate(rng, &patient, today);
    let projection = project(&timeline);
    let reports = ReportSynthesizer::default().generate(rng, &patient, plan.reports_per_patient, today);
    let comments = CommentSynthesizer::default().generate(rng, &patient.id, plan.comments_per_patient, now);
    PatientArtifacts {
        patient,
        vitals,
        timeline,
        projection,
        reports,
        comments,
    }
}

pub struct CohortGenerator {
    plan: CohortPlan,
    now: NaiveDateTime,
}

enum WorkerOutput {
    Identity(Patient),
    Detailed(Box<PatientArtifacts>),
}

impl CohortGenerator {
    pub fn new(plan: CohortPlan, now: NaiveDateTime) -> Self {
        Self { plan, now }
    }

    pub fn plan(&self) -> &CohortPlan {
        &self.plan
    }

    /// Generate the whole cohort. Each patient runs on its own blocking
    /// worker with its own stream, so results do not depend on scheduling.
    pub async fn generate(&self) -> Result<Cohort> {
        tracing::info!(
            "Generating cohort: {} patients ({} detailed), seed {}",
            self.plan.patients,
            self.plan.detailed_patients,
            self.plan.seed
        );

        let handles = (0..self.plan.patients).map(|i| {
            let plan = self.plan.clone();
            let now = self.now;
            tokio::task::spawn_blocking(move || {
                let mut rng = seeded(worker_seed(plan.seed, i as u64));
                let patient = generate_identity(&mut rng, i + 1, now.date());
                if i < plan.detailed_patients {
                    tracing::info!("Generating artifacts for {} - {}", patient.id, patient.full_name);
                    WorkerOutput::Detailed(Box::new(artifacts_for(&mut rng, patient, &plan, now)))
                } else {
                    WorkerOutput::Identity(patient)
                }
            })
        });

        let mut patients = Vec::with_capacity(self.plan.patients);
        let mut detailed = Vec::with_capacity(self.plan.detailed_patients);
        // join_all preserves input order, so ids stay ascending.
        for joined in join_all(handles).await {
            match joined.context("cohort worker panicked")? {
                WorkerOutput::Identity(p) => patients.push(p),
                WorkerOutput::Detailed(a) => {
                    patients.push(a.patient.clone());
                    detailed.push(*a);
                }
            }
        }

        tracing::info!("Cohort complete: {} patients, {} detailed", patients.len(), detailed.len());
        Ok(Cohort {
            seed: self.plan.seed,
            generated_at: self.now,
            patients,
            detailed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(10, 30, 0).unwrap()
    }

    fn plan(seed: u64) -> CohortPlan {
        CohortPlan {
            seed,
            patients: 6,
            detailed_patients: 2,
            vitals_days: 7,
            reports_per_patient: 3,
            comments_per_patient: 4,
        }
    }

    #[test]
    fn test_plan_from_config() {
        let cfg = GenerationConfig {
            seed: Some(9),
            patients: 3,
            detailed_patients: 10,
            ..GenerationConfig::default()
        };
        let plan = CohortPlan::from_config(&cfg);
        assert_eq!(plan.seed, 9);
        assert_eq!(plan.detailed_patients, 3);
    }

    #[tokio::test]
    async fn test_generate_shapes() {
        let cohort = CohortGenerator::new(plan(42), now()).generate().await.unwrap();
        assert_eq!(cohort.patients.len(), 6);
        assert_eq!(cohort.detailed.len(), 2);
        let ids: Vec<&str> = cohort.patients.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P001", "P002", "P003", "P004", "P005", "P006"]);
        for a in &cohort.detailed {
            assert_eq!(a.vitals.len(), 28);
            assert_eq!(a.reports.len(), 3);
            assert_eq!(a.comments.len(), 4);
            assert_eq!(a.projection.items.len(), a.timeline.len());
            assert!(a.vitals.iter().all(|v| v.patient_id == a.patient.id));
        }
        assert_eq!(cohort.detailed[0].patient, cohort.patients[0]);
    }

    #[tokio::test]
    async fn test_same_seed_same_cohort() {
        let a = CohortGenerator::new(plan(7), now()).generate().await.unwrap();
        let b = CohortGenerator::new(plan(7), now()).generate().await.unwrap();
        assert_eq!(a.patients, b.patients);
        assert_eq!(a.detailed, b.detailed);
    }

    #[tokio::test]
    async fn test_patient_stream_independent_of_cohort_size() {
        let small = CohortGenerator::new(plan(11), now()).generate().await.unwrap();
        let mut bigger = plan(11);
        bigger.patients = 12;
        let big = CohortGenerator::new(bigger, now()).generate().await.unwrap();
        assert_eq!(small.patients[..], big.patients[..6]);
    }
}
