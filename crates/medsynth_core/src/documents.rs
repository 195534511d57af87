//! Narrative artifacts: medical reports and professional comments.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A label that matches none of an enum's variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Label table plumbing shared by the narrative enums: `ALL`, `label()`,
/// `Display` and a case-insensitive `FromStr`.
macro_rules! labelled {
    ($ty:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| UnknownLabel {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportSource {
    #[default]
    Hospital,
    Lab,
    Specialist,
    #[serde(rename = "Primary Care")]
    PrimaryCare,
}

labelled!(ReportSource, "report source", {
    Hospital => "Hospital",
    Lab => "Lab",
    Specialist => "Specialist",
    PrimaryCare => "Primary Care",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    #[default]
    #[serde(rename = "Annual Physical")]
    AnnualPhysical,
    #[serde(rename = "Blood Test")]
    BloodTest,
    #[serde(rename = "Cardiology Consultation")]
    CardiologyConsultation,
    #[serde(rename = "Endocrinology Follow-up")]
    EndocrinologyFollowUp,
    #[serde(rename = "Radiology Report")]
    RadiologyReport,
    #[serde(rename = "Neurology Assessment")]
    NeurologyAssessment,
    #[serde(rename = "Dermatology Examination")]
    DermatologyExamination,
    #[serde(rename = "Orthopedic Evaluation")]
    OrthopedicEvaluation,
    #[serde(rename = "Gastroenterology Procedure")]
    GastroenterologyProcedure,
    #[serde(rename = "Ophthalmology Check")]
    OphthalmologyCheck,
}

labelled!(ReportType, "report type", {
    AnnualPhysical => "Annual Physical",
    BloodTest => "Blood Test",
    CardiologyConsultation => "Cardiology Consultation",
    EndocrinologyFollowUp => "Endocrinology Follow-up",
    RadiologyReport => "Radiology Report",
    NeurologyAssessment => "Neurology Assessment",
    DermatologyExamination => "Dermatology Examination",
    OrthopedicEvaluation => "Orthopedic Evaluation",
    GastroenterologyProcedure => "Gastroenterology Procedure",
    OphthalmologyCheck => "Ophthalmology Check",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profession {
    #[default]
    Doctor,
    Nurse,
    Specialist,
    Pharmacist,
    #[serde(rename = "Physical Therapist")]
    PhysicalTherapist,
}

labelled!(Profession, "profession", {
    Doctor => "Doctor",
    Nurse => "Nurse",
    Specialist => "Specialist",
    Pharmacist => "Pharmacist",
    PhysicalTherapist => "Physical Therapist",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    #[default]
    #[serde(rename = "medication adjustment")]
    MedicationAdjustment,
    #[serde(rename = "symptom management")]
    SymptomManagement,
    #[serde(rename = "treatment plan")]
    TreatmentPlan,
    #[serde(rename = "test results")]
    TestResults,
    #[serde(rename = "follow-up appointment")]
    FollowUpAppointment,
    #[serde(rename = "recovery progress")]
    RecoveryProgress,
    #[serde(rename = "patient concerns")]
    PatientConcerns,
    #[serde(rename = "therapy response")]
    TherapyResponse,
    #[serde(rename = "lifestyle modifications")]
    LifestyleModifications,
    #[serde(rename = "care coordination")]
    CareCoordination,
}

labelled!(Topic, "topic", {
    MedicationAdjustment => "medication adjustment",
    SymptomManagement => "symptom management",
    TreatmentPlan => "treatment plan",
    TestResults => "test results",
    FollowUpAppointment => "follow-up appointment",
    RecoveryProgress => "recovery progress",
    PatientConcerns => "patient concerns",
    TherapyResponse => "therapy response",
    LifestyleModifications => "lifestyle modifications",
    CareCoordination => "care coordination",
});

/// A synthesized medical report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub patient_id: String,
    pub date: NaiveDate,
    pub source: ReportSource,
    pub report_type: ReportType,
    /// One-paragraph summary; only mentions terms of conditions on the patient.
    pub summary: String,
    pub content: String,
    /// Independent one-line "AI analysis"; not reconciled with `content`.
    pub ai_summary: String,
    pub specialist: String,
}

/// A professional's note on a patient. Comment logs are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub patient_id: String,
    pub timestamp: NaiveDateTime,
    pub author: String,
    pub profession: Profession,
    pub topic: Topic,
    pub text: String,
}

impl Comment {
    /// Comment id for position `n` (1-based) in a patient's log.
    pub fn id_for(n: usize) -> String {
        format!("C{:03}", n)
    }
}

/// Presentation order for comments: newest first, stable for equal stamps.
pub fn sort_newest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Presentation order for reports: newest first.
pub fn sort_reports_newest_first(reports: &mut [Report]) {
    reports.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse_case_insensitively() {
        assert_eq!("physical therapist".parse::<Profession>().unwrap(), Profession::PhysicalTherapist);
        assert_eq!("Medication Adjustment".parse::<Topic>().unwrap(), Topic::MedicationAdjustment);
        assert_eq!(" blood test ".parse::<ReportType>().unwrap(), ReportType::BloodTest);
        let err = "Surgeon".parse::<Profession>().unwrap_err();
        assert_eq!(err.kind, "profession");
    }

    #[test]
    fn test_serde_uses_labels() {
        for t in Topic::ALL {
            assert_eq!(serde_json::to_string(t).unwrap(), format!("\"{}\"", t.label()));
        }
        for r in ReportType::ALL {
            assert_eq!(serde_json::to_string(r).unwrap(), format!("\"{}\"", r.label()));
        }
        assert_eq!(serde_json::to_string(&ReportSource::PrimaryCare).unwrap(), "\"Primary Care\"");
    }

    #[test]
    fn test_comment_ids_are_padded() {
        assert_eq!(Comment::id_for(1), "C001");
        assert_eq!(Comment::id_for(42), "C042");
        assert_eq!(Comment::id_for(1234), "C1234");
    }

    #[test]
    fn test_sort_newest_first() {
        let at = |d: u32| {
            NaiveDate::from_ymd_opt(2024, 1, d)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        };
        let mk = |id: &str, d: u32| Comment {
            id: id.into(),
            patient_id: "P001".into(),
            timestamp: at(d),
            author: "Dr. Lee".into(),
            profession: Profession::Doctor,
            topic: Topic::TestResults,
            text: "ok".into(),
        };
        let mut cs = vec![mk("C001", 1), mk("C002", 9), mk("C003", 4)];
        sort_newest_first(&mut cs);
        let ids: Vec<_> = cs.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["C002", "C003", "C001"]);
    }
}
