//! # Cohorts
//!
//! Identity generation for synthetic patients and the batch pass that turns
//! each identity into its full artifact set: vitals, condition timeline,
//! reports and comments.
//!
//! Patients are independent. Each one is generated on its own blocking worker
//! from a stream derived from the run's master seed and the patient's index,
//! so a given seed always reproduces the same cohort regardless of scheduling.

pub mod batch;
pub mod identity;

pub use batch::{artifacts_for, Cohort, CohortGenerator, CohortPlan, PatientArtifacts};
pub use identity::{demo_patient, generate_identity, patient_id};
