//! Severity lattice, condition event types and the event record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered severity lattice: `Mild < Moderate < Severe`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    /// One step toward `Mild`; `Mild` stays.
    pub fn improved(self) -> Self {
        match self {
            Severity::Severe => Severity::Moderate,
            Severity::Moderate | Severity::Mild => Severity::Mild,
        }
    }

    /// One step toward `Severe`; `Severe` stays.
    pub fn worsened(self) -> Self {
        match self {
            Severity::Mild => Severity::Moderate,
            Severity::Moderate | Severity::Severe => Severity::Severe,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }

    /// Lowercase form used in style class names.
    pub fn slug(self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Diagnosis,
    #[default]
    #[serde(rename = "Follow-up")]
    FollowUp,
    #[serde(rename = "Medication Change")]
    MedicationChange,
    Treatment,
    #[serde(rename = "Flare-up")]
    FlareUp,
    Improvement,
    Hospitalization,
    #[serde(rename = "Specialist Consultation")]
    SpecialistConsultation,
}

impl EventType {
    /// Event types a chain may draw after its diagnosis.
    pub const FOLLOW_ON: [EventType; 7] = [
        EventType::FollowUp,
        EventType::MedicationChange,
        EventType::Treatment,
        EventType::FlareUp,
        EventType::Improvement,
        EventType::Hospitalization,
        EventType::SpecialistConsultation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EventType::Diagnosis => "Diagnosis",
            EventType::FollowUp => "Follow-up",
            EventType::MedicationChange => "Medication Change",
            EventType::Treatment => "Treatment",
            EventType::FlareUp => "Flare-up",
            EventType::Improvement => "Improvement",
            EventType::Hospitalization => "Hospitalization",
            EventType::SpecialistConsultation => "Specialist Consultation",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One step in a condition chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionEvent {
    pub patient_id: String,
    pub condition: String,
    pub date: NaiveDate,
    pub event_type: EventType,
    pub severity: Severity,
    pub description: String,
    pub provider: String,
}
