//! Phrase tables for reports and comments.

use medsynth_core::{ReportType, Topic};

// ============================================================================
// Reports
// ============================================================================

pub const FINDING_QUALIFIERS: [&str; 5] = ["elevated", "reduced", "abnormal", "concerning", "irregular"];
pub const FINDING_MEASURES: [&str; 5] = ["levels", "readings", "results", "values", "patterns"];
pub const NORMAL_FINDINGS: &str = "all results within normal ranges";

pub const SPECIALIST_FIRST_NAMES: [&str; 8] = [
    "John", "Robert", "William", "James", "Mary", "Patricia", "Jennifer", "Linda",
];
pub const SPECIALIST_LAST_NAMES: [&str; 8] = [
    "Smith", "Johnson", "Williams", "Jones", "Brown", "Davis", "Miller", "Wilson",
];

/// Which structured block a report body carries under DETAILED FINDINGS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    BloodTest,
    Cardiology,
    PhysicalExam,
    Generic,
}

impl BodyKind {
    pub fn for_type(report_type: ReportType) -> Self {
        match report_type {
            ReportType::BloodTest => BodyKind::BloodTest,
            ReportType::CardiologyConsultation => BodyKind::Cardiology,
            ReportType::AnnualPhysical => BodyKind::PhysicalExam,
            ReportType::EndocrinologyFollowUp
            | ReportType::RadiologyReport
            | ReportType::NeurologyAssessment
            | ReportType::DermatologyExamination
            | ReportType::OrthopedicEvaluation
            | ReportType::GastroenterologyProcedure
            | ReportType::OphthalmologyCheck => BodyKind::Generic,
        }
    }
}

/// A continuous lab measurement drawn uniformly and printed to one decimal.
pub struct LabRange {
    pub label: &'static str,
    pub low: f64,
    pub high: f64,
    pub unit: &'static str,
}

pub const BLOOD_PANEL: [LabRange; 7] = [
    LabRange { label: "Hemoglobin", low: 12.0, high: 17.0, unit: "g/dL" },
    LabRange { label: "White Blood Cell Count", low: 4.0, high: 11.0, unit: "x10^9/L" },
    LabRange { label: "Glucose", low: 70.0, high: 130.0, unit: "mg/dL" },
    LabRange { label: "Cholesterol (Total)", low: 150.0, high: 240.0, unit: "mg/dL" },
    LabRange { label: "HDL Cholesterol", low: 40.0, high: 80.0, unit: "mg/dL" },
    LabRange { label: "LDL Cholesterol", low: 70.0, high: 160.0, unit: "mg/dL" },
    LabRange { label: "Triglycerides", low: 50.0, high: 200.0, unit: "mg/dL" },
];
pub const PLATELETS: (u32, u32) = (150, 450);

pub const SYSTOLIC: (u32, u32) = (110, 150);
pub const DIASTOLIC: (u32, u32) = (70, 95);
pub const HEART_RATE: (u32, u32) = (60, 90);
pub const RESPIRATORY_RATE: (u32, u32) = (12, 20);
pub const TEMPERATURE: (f64, f64) = (36.5, 37.3);

pub const ECG_FINDINGS: [&str; 4] = [
    "Normal sinus rhythm",
    "Minor ST-T wave abnormalities",
    "Left ventricular hypertrophy",
    "Normal findings",
];
pub const ECHO_FINDINGS: [&str; 4] = [
    "Normal cardiac function",
    "Mild mitral regurgitation",
    "Mild left ventricular hypertrophy",
    "Normal ejection fraction",
];

pub const PATIENT_REPORTS: [&str; 4] = [
    "no complaints",
    "mild discomfort",
    "improvement in symptoms",
    "persistent symptoms",
];
pub const GENERIC_NOTES: [&str; 4] = [
    "No significant changes since last examination",
    "Improvement noted in condition",
    "Further monitoring recommended",
    "Medication adjustment may be necessary",
];

pub const PRIMARY_RECOMMENDATIONS: [&str; 5] = [
    "Continue current treatment plan",
    "Follow up in 3 months",
    "Follow up in 6 months",
    "Adjust medication as prescribed",
    "No further action needed at this time",
];
pub const SECONDARY_RECOMMENDATIONS: [&str; 4] = [
    "Maintain healthy diet and exercise",
    "Monitor symptoms and report any changes",
    "Complete prescribed diagnostic tests",
    "Consider consultation with specialist",
];

pub const AI_OUTLOOKS: [&str; 4] = ["stable", "improving", "concerning", "normal"];
pub const AI_SUBJECTS: [&str; 4] = ["indicators", "values", "parameters", "results"];
pub const AI_ACTIONS: [&str; 4] = [
    "No immediate action needed",
    "Continued monitoring advised",
    "Consider medication adjustment",
    "Follow-up recommended",
];

// ============================================================================
// Comments
// ============================================================================

pub const DOCTOR_SURNAMES: [&str; 8] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
];
pub const STAFF_FIRST_NAMES: [&str; 8] = [
    "John", "Sarah", "Michael", "Emily", "David", "Jessica", "Daniel", "Jennifer",
];
pub const STAFF_LAST_NAMES: [&str; 8] = [
    "Anderson", "Martinez", "Taylor", "Thomas", "Lee", "Patel", "White", "Harris",
];

const MEDICATION_ADJUSTMENT: [&str; 4] = [
    "Patient's medication dosage adjusted due to side effects.",
    "Prescribed new medication to better manage symptoms.",
    "Consider reducing dosage if improvement continues.",
    "Added supplemental medication to address secondary symptoms.",
];
const SYMPTOM_MANAGEMENT: [&str; 4] = [
    "Patient reports improvement in primary symptoms since last visit.",
    "New symptom reported, monitoring closely.",
    "Symptoms stable, continuing current management approach.",
    "Symptom intensity has decreased following intervention.",
];
const TREATMENT_PLAN: [&str; 4] = [
    "Updated treatment plan to include additional therapy sessions.",
    "Treatment plan remains effective, no changes needed at this time.",
    "Considering alternative treatment options if no improvement by next visit.",
    "Modified treatment approach based on latest research findings.",
];
const TEST_RESULTS: [&str; 4] = [
    "Recent lab results show improvement in key indicators.",
    "Test results require follow-up imaging to confirm diagnosis.",
    "All values within normal ranges, continue monitoring periodically.",
    "Slight elevation in certain markers, will retest in one month.",
];
const GENERAL: [&str; 4] = [
    "Patient doing well overall, maintain current approach.",
    "Discussed concerns about long-term prognosis with patient.",
    "Coordinating care with specialists for comprehensive management.",
    "Recommended lifestyle modifications to support treatment goals.",
];

/// Comment sentences for a topic. Topics without a dedicated set share the
/// general one.
pub fn comment_templates(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::MedicationAdjustment => &MEDICATION_ADJUSTMENT,
        Topic::SymptomManagement => &SYMPTOM_MANAGEMENT,
        Topic::TreatmentPlan => &TREATMENT_PLAN,
        Topic::TestResults => &TEST_RESULTS,
        Topic::FollowUpAppointment
        | Topic::RecoveryProgress
        | Topic::PatientConcerns
        | Topic::TherapyResponse
        | Topic::LifestyleModifications
        | Topic::CareCoordination => &GENERAL,
    }
}

pub const COMMENT_SUFFIXES: [&str; 5] = [
    "Recommend follow-up in 3 months.",
    "Consider additional diagnostic testing if symptoms persist.",
    "Suggested consultation with specialist.",
    "Advised to monitor and report any new symptoms immediately.",
    "Encouraged continued adherence to treatment regimen.",
];
