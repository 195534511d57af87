//! Per-condition event chains and the patient-level timeline.

use chrono::{Duration, NaiveDate};
use medsynth_core::rng::pick;
use medsynth_core::{ConditionEvent, EventType, Patient, Severity};
use rand::Rng;

use crate::templates::{describe, PROVIDER_SURNAMES};
use crate::transition::next_severity;

fn provider<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("Dr. {}", pick(rng, &PROVIDER_SURNAMES))
}

// ============================================================================
// Chain builder
// ============================================================================

/// Builds one condition chain. The first event is always the diagnosis and
/// later events never go back in time.
#[derive(Debug, Clone)]
pub struct ChainBuilder {
    patient_id: String,
    condition: String,
    events: Vec<ConditionEvent>,
}

impl ChainBuilder {
    pub fn diagnose(
        patient_id: &str,
        condition: &str,
        date: NaiveDate,
        severity: Severity,
        provider: String,
    ) -> Self {
        let diagnosis = ConditionEvent {
            patient_id: patient_id.to_string(),
            condition: condition.to_string(),
            date,
            event_type: EventType::Diagnosis,
            severity,
            description: describe(EventType::Diagnosis, condition),
            provider,
        };
        Self {
            patient_id: patient_id.to_string(),
            condition: condition.to_string(),
            events: vec![diagnosis],
        }
    }

    fn last(&self) -> &ConditionEvent {
        // `diagnose` seeds the chain, so it is never empty.
        &self.events[self.events.len() - 1]
    }

    pub fn last_date(&self) -> NaiveDate {
        self.last().date
    }

    pub fn current_severity(&self) -> Severity {
        self.last().severity
    }

    /// Append a follow-on event. `roll` feeds the damped transition rules.
    /// A date before the previous event is moved up to it.
    pub fn push(&mut self, date: NaiveDate, event_type: EventType, roll: f64, provider: String) -> &ConditionEvent {
        let date = date.max(self.last_date());
        let severity = next_severity(self.current_severity(), event_type, roll);
        self.events.push(ConditionEvent {
            patient_id: self.patient_id.clone(),
            condition: self.condition.clone(),
            date,
            event_type,
            severity,
            description: describe(event_type, &self.condition),
            provider,
        });
        self.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn finish(self) -> Vec<ConditionEvent> {
        self.events
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Chain generation parameters. Defaults: 3 to 10 year lookback, 2 to 8
/// follow-on attempts, 30 to 180 days between events.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineGenerator {
    pub lookback_days: (i64, i64),
    pub follow_on_events: (usize, usize),
    pub gap_days: (i64, i64),
}

impl Default for TimelineGenerator {
    fn default() -> Self {
        Self {
            lookback_days: (365 * 3, 365 * 10),
            follow_on_events: (2, 8),
            gap_days: (30, 180),
        }
    }
}

impl TimelineGenerator {
    /// Every condition on the patient gets a chain; all events are merged and
    /// sorted by date. A patient with no conditions has an empty timeline.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, patient: &Patient, now: NaiveDate) -> Vec<ConditionEvent> {
        let lookback = rng.gen_range(self.lookback_days.0..=self.lookback_days.1);
        let start = now - Duration::days(lookback);

        let mut events = Vec::new();
        for condition in &patient.conditions {
            let diagnosis = start + Duration::days(rng.gen_range(0..=lookback / 2));
            events.extend(self.chain(rng, &patient.id, condition, diagnosis, now));
        }
        // Stable sort keeps each chain's internal order on equal dates.
        events.sort_by_key(|e| e.date);

        tracing::debug!(
            "Generated {} condition events for {} ({} conditions)",
            events.len(),
            patient.id,
            patient.conditions.len()
        );
        events
    }

    /// One condition's chain, from its diagnosis to the last event not after `now`.
    pub fn chain<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        patient_id: &str,
        condition: &str,
        diagnosis: NaiveDate,
        now: NaiveDate,
    ) -> Vec<ConditionEvent> {
        let initial = pick(rng, &Severity::ALL);
        let mut chain = ChainBuilder::diagnose(patient_id, condition, diagnosis, initial, provider(rng));

        let attempts = rng.gen_range(self.follow_on_events.0..=self.follow_on_events.1);
        for _ in 0..attempts {
            let date = chain.last_date() + Duration::days(rng.gen_range(self.gap_days.0..=self.gap_days.1));
            if date > now {
                break;
            }
            let event_type = pick(rng, &EventType::FOLLOW_ON);
            let roll: f64 = rng.gen();
            chain.push(date, event_type, roll, provider(rng));
        }
        chain.finish()
    }
}

/// Split a timeline into per-condition chains, ordered by each condition's
/// first appearance. Events keep their relative order within a condition.
pub fn by_condition(events: &[ConditionEvent]) -> Vec<(String, Vec<ConditionEvent>)> {
    let mut groups: Vec<(String, Vec<ConditionEvent>)> = Vec::new();
    for event in events {
        match groups.iter_mut().find(|(name, _)| *name == event.condition) {
            Some((_, chain)) => chain.push(event.clone()),
            None => groups.push((event.condition.clone(), vec![event.clone()])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use medsynth_core::rng::seeded;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn patient(conditions: &[&str]) -> Patient {
        Patient {
            id: "P001".into(),
            conditions: conditions.iter().map(|c| c.to_string()).collect(),
            ..Patient::default()
        }
    }

    #[test]
    fn test_five_hospitalizations_all_severe() {
        for initial in Severity::ALL {
            let start = today() - Duration::days(1000);
            let mut chain = ChainBuilder::diagnose("P001", "Asthma", start, initial, "Dr. Smith".into());
            for i in 1..=5 {
                chain.push(start + Duration::days(30 * i), EventType::Hospitalization, 0.0, "Dr. Jones".into());
            }
            let severities: Vec<Severity> = chain.finish()[1..].iter().map(|e| e.severity).collect();
            assert_eq!(severities, vec![Severity::Severe; 5]);
        }
    }

    #[test]
    fn test_push_never_goes_back_in_time() {
        let start = today();
        let mut chain = ChainBuilder::diagnose("P001", "COPD", start, Severity::Mild, "Dr. Smith".into());
        let e = chain.push(start - Duration::days(10), EventType::FollowUp, 0.5, "Dr. Smith".into());
        assert_eq!(e.date, start);
    }

    #[test]
    fn test_chains_start_with_diagnosis_and_stay_ordered() {
        let gen = TimelineGenerator::default();
        let p = patient(&["Hypertension", "Asthma", "Depression"]);
        for seed in 0..50 {
            let events = gen.generate(&mut seeded(seed), &p, today());
            for pair in events.windows(2) {
                assert!(pair[0].date <= pair[1].date);
            }
            for (condition, chain) in by_condition(&events) {
                assert_eq!(chain[0].event_type, EventType::Diagnosis, "{}", condition);
                assert!(chain[1..].iter().all(|e| e.event_type != EventType::Diagnosis));
                assert!(chain.len() <= 9);
                for pair in chain.windows(2) {
                    assert!(pair[0].date <= pair[1].date);
                }
            }
            assert!(events.iter().all(|e| e.date <= today()));
        }
    }

    #[test]
    fn test_every_condition_gets_a_chain() {
        let p = patient(&["Hypertension", "Diabetes Type 2"]);
        let events = TimelineGenerator::default().generate(&mut seeded(3), &p, today());
        let names: Vec<String> = by_condition(&events).into_iter().map(|(c, _)| c).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Hypertension".to_string()));
        assert!(names.contains(&"Diabetes Type 2".to_string()));
    }

    #[test]
    fn test_no_conditions_no_events() {
        let events = TimelineGenerator::default().generate(&mut seeded(4), &patient(&[]), today());
        assert!(events.is_empty());
    }

    #[test]
    fn test_diagnosis_inside_lookback() {
        let gen = TimelineGenerator::default();
        let p = patient(&["Arthritis"]);
        for seed in 0..100 {
            let events = gen.generate(&mut seeded(seed), &p, today());
            let diagnosis = events[0].date;
            assert!(diagnosis >= today() - Duration::days(365 * 10));
            assert!(diagnosis <= today() - Duration::days(365 * 3 / 2));
            assert!(events[0].provider.starts_with("Dr. "));
        }
    }
}
