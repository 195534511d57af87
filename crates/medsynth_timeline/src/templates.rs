//! Event description table and provider names.

use medsynth_core::EventType;

struct DescriptionTemplate {
    event_type: EventType,
    lead: &'static str,
    tail: &'static str,
}

const DESCRIPTIONS: [DescriptionTemplate; 8] = [
    DescriptionTemplate {
        event_type: EventType::Diagnosis,
        lead: "Initial diagnosis of ",
        tail: "",
    },
    DescriptionTemplate {
        event_type: EventType::FollowUp,
        lead: "Routine follow-up for ",
        tail: "",
    },
    DescriptionTemplate {
        event_type: EventType::MedicationChange,
        lead: "Adjusted medication regimen for ",
        tail: "",
    },
    DescriptionTemplate {
        event_type: EventType::Treatment,
        lead: "New treatment initiated for ",
        tail: "",
    },
    DescriptionTemplate {
        event_type: EventType::FlareUp,
        lead: "Experienced worsening of ",
        tail: " symptoms",
    },
    DescriptionTemplate {
        event_type: EventType::Improvement,
        lead: "Noted improvement in ",
        tail: "",
    },
    DescriptionTemplate {
        event_type: EventType::Hospitalization,
        lead: "Hospitalized due to complications from ",
        tail: "",
    },
    DescriptionTemplate {
        event_type: EventType::SpecialistConsultation,
        lead: "Consultation with specialist regarding ",
        tail: "",
    },
];

pub const PROVIDER_SURNAMES: [&str; 8] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
];

/// One-line description of an event on `condition`.
pub fn describe(event_type: EventType, condition: &str) -> String {
    match DESCRIPTIONS.iter().find(|t| t.event_type == event_type) {
        Some(t) => format!("{}{}{}", t.lead, condition, t.tail),
        None => format!("{}: {}", event_type, condition),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_event_type_has_a_template() {
        let mut all = vec![EventType::Diagnosis];
        all.extend(EventType::FOLLOW_ON);
        for et in all {
            let text = describe(et, "Asthma");
            assert!(text.contains("Asthma"));
            assert!(!text.starts_with(et.label()), "{} fell through to the fallback", et);
        }
    }

    #[test]
    fn test_flare_up_wording() {
        assert_eq!(
            describe(EventType::FlareUp, "COPD"),
            "Experienced worsening of COPD symptoms"
        );
        assert_eq!(describe(EventType::Diagnosis, "COPD"), "Initial diagnosis of COPD");
    }
}
