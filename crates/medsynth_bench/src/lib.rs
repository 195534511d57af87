//! medsynth_bench — long-horizon pattern tests over the generators.
//!
//! Individual readings are noisy; these check the loose guarantees that only
//! show up in aggregate:
//! - post-meal glucose sits above the other sampling hours
//! - weekend heart rate sits above weekdays
//! - severity chains visit the whole lattice under random events
//! - identities cover the whole condition catalog

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use medsynth_core::rng::{seeded, worker_seed};
use medsynth_core::{EventType, Severity, VitalChannel, VitalSample};
use medsynth_timeline::next_severity;
use medsynth_vitals::VitalsGenerator;
use rand::Rng;

/// `days` of historical vitals from `start` for `patients` independent patients.
pub fn simulate_vitals(seed: u64, patients: usize, start: NaiveDate, days: u32) -> Vec<VitalSample> {
    let generator = VitalsGenerator::new();
    (0..patients)
        .flat_map(|i| {
            let mut rng = seeded(worker_seed(seed, i as u64));
            generator.series(&mut rng, &format!("B{:03}", i), start, days)
        })
        .collect()
}

/// Mean of `channel` over the samples matching `keep`.
pub fn mean_where<F>(samples: &[VitalSample], channel: VitalChannel, keep: F) -> Option<f64>
where
    F: Fn(&VitalSample) -> bool,
{
    let (sum, n) = samples
        .iter()
        .filter(|s| keep(s))
        .fold((0.0, 0usize), |(sum, n), s| (sum + s.get(channel), n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub fn is_weekend(s: &VitalSample) -> bool {
    matches!(s.timestamp.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Walk one severity through `steps` uniformly drawn follow-on events and
/// count how many steps end in each state (`Mild`, `Moderate`, `Severe`).
pub fn severity_occupancy(seed: u64, start: Severity, steps: usize) -> [usize; 3] {
    let mut rng = seeded(seed);
    let mut current = start;
    let mut counts = [0usize; 3];
    for _ in 0..steps {
        let event = EventType::FOLLOW_ON[rng.gen_range(0..EventType::FOLLOW_ON.len())];
        current = next_severity(current, event, rng.gen());
        counts[current as usize] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use medsynth_cohort::generate_identity;
    use medsynth_core::vocabulary::condition_names;
    use medsynth_timeline::TimelineGenerator;
    use std::collections::HashSet;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Lunchtime readings carry a 10-30 mg/dL lift; averaged over a season it
    /// must clearly separate from the other hours.
    #[test]
    fn test_post_meal_glucose_lift() {
        let samples = simulate_vitals(1, 40, start(), 90);
        let lunch = mean_where(&samples, VitalChannel::Glucose, |s| s.timestamp.hour() == 12).unwrap();
        let other = mean_where(&samples, VitalChannel::Glucose, |s| s.timestamp.hour() != 12).unwrap();
        assert!(
            lunch > other + 10.0,
            "Post-meal glucose should sit well above other hours: {:.1} vs {:.1}",
            lunch,
            other
        );
    }

    /// Weekend heart rate gets a 0-5 bpm lift: small, but visible in aggregate.
    #[test]
    fn test_weekend_heart_rate_lift() {
        let samples = simulate_vitals(2, 50, start(), 182);
        let weekend = mean_where(&samples, VitalChannel::HeartRate, is_weekend).unwrap();
        let weekday = mean_where(&samples, VitalChannel::HeartRate, |s| !is_weekend(s)).unwrap();
        assert!(
            weekend > weekday + 1.0,
            "Weekend heart rate should exceed weekdays: {:.2} vs {:.2}",
            weekend,
            weekday
        );
    }

    /// Channels without a modifier show no weekend or meal effect.
    #[test]
    fn test_unmodified_channels_stay_flat() {
        let samples = simulate_vitals(3, 40, start(), 120);
        let weekend = mean_where(&samples, VitalChannel::Systolic, is_weekend).unwrap();
        let weekday = mean_where(&samples, VitalChannel::Systolic, |s| !is_weekend(s)).unwrap();
        assert!((weekend - weekday).abs() < 1.5, "{:.2} vs {:.2}", weekend, weekday);
    }

    /// A year of readings never leaves the clamp ranges.
    #[test]
    fn test_year_of_readings_in_bounds() {
        let samples = simulate_vitals(4, 10, start(), 366);
        assert_eq!(samples.len(), 10 * 366 * 4);
        assert!(samples.iter().all(VitalSample::within_bounds));
    }

    /// Under random follow-on events, no severity is absorbing: from any
    /// start, every level keeps being visited.
    #[test]
    fn test_severity_visits_whole_lattice() {
        for (seed, start) in Severity::ALL.into_iter().enumerate() {
            let counts = severity_occupancy(seed as u64, start, 20_000);
            for (level, n) in counts.iter().enumerate() {
                assert!(
                    *n > 1_000,
                    "Severity level {} visited only {} times from {:?}: {:?}",
                    level,
                    n,
                    start,
                    counts
                );
            }
        }
    }

    /// Timelines across many patients stay inside their lookback and never
    /// run past the generation date.
    #[test]
    fn test_timelines_stay_in_window() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let earliest = now - chrono::Duration::days(365 * 10);
        let generator = TimelineGenerator::default();
        let mut rng = seeded(5);
        for i in 1..=300 {
            let patient = generate_identity(&mut rng, i, now);
            let events = generator.generate(&mut rng, &patient, now);
            for e in &events {
                assert!(e.date <= now && e.date >= earliest, "{:?}", e);
                assert!(patient.conditions.contains(&e.condition));
            }
            let diagnoses = events.iter().filter(|e| e.event_type == EventType::Diagnosis).count();
            assert_eq!(diagnoses, patient.conditions.len());
        }
    }

    /// Enough identities cover every condition in the catalog.
    #[test]
    fn test_identities_cover_catalog() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut rng = seeded(6);
        let seen: HashSet<String> = (1..=500)
            .flat_map(|i| generate_identity(&mut rng, i, today).conditions)
            .collect();
        for name in condition_names() {
            assert!(seen.contains(name), "{} never drawn", name);
        }
    }
}
