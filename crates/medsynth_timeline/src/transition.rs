//! Severity transition table.
//!
//! `next_severity(current, event_type, roll)` is the only place severity
//! changes. `roll` is a uniform draw in `[0, 1)`; only the damped rules
//! consult it, so passing a fixed roll makes every transition deterministic.

use medsynth_core::{EventType, Severity};

/// What an event does to the preceding severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Severity carries over unchanged.
    Hold,
    /// Improve one step when `roll < p`, otherwise hold.
    MaybeImprove(f64),
    /// Always one step toward `Severe`.
    Worsen,
    /// Always one step toward `Mild`.
    Improve,
    /// Jump straight to a fixed severity.
    Force(Severity),
}

/// Improvement probability after a medication change.
pub const MEDICATION_CHANGE_IMPROVEMENT: f64 = 0.3;
/// Improvement probability after a new treatment.
pub const TREATMENT_IMPROVEMENT: f64 = 0.4;

pub fn transition_for(event_type: EventType) -> Transition {
    match event_type {
        EventType::Diagnosis | EventType::FollowUp | EventType::SpecialistConsultation => Transition::Hold,
        EventType::MedicationChange => Transition::MaybeImprove(MEDICATION_CHANGE_IMPROVEMENT),
        EventType::Treatment => Transition::MaybeImprove(TREATMENT_IMPROVEMENT),
        EventType::FlareUp => Transition::Worsen,
        EventType::Improvement => Transition::Improve,
        EventType::Hospitalization => Transition::Force(Severity::Severe),
    }
}

pub fn next_severity(current: Severity, event_type: EventType, roll: f64) -> Severity {
    match transition_for(event_type) {
        Transition::Hold => current,
        Transition::MaybeImprove(p) if roll < p => current.improved(),
        Transition::MaybeImprove(_) => current,
        Transition::Worsen => current.worsened(),
        Transition::Improve => current.improved(),
        Transition::Force(s) => s,
    }
}
