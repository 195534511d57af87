//! Property-based tests for medsynth_vitals.
//!
//! Whatever the seed, start date or window length, a series has exactly four
//! readings per day, never leaves any channel's clamp range, and modifiers only
//! ever lift a value.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use medsynth_core::rng::seeded;
use medsynth_vitals::{live_sample, VitalBaseline, VitalsGenerator, SAMPLING_HOURS};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|offset| NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + Duration::days(offset))
}

// ============================================================================
// Historical series
// ============================================================================

proptest! {
    #[test]
    fn series_has_four_readings_per_day(seed in any::<u64>(), start in arb_date(), days in 0u32..45) {
        let mut rng = seeded(seed);
        let samples = VitalsGenerator::new().series(&mut rng, "P001", start, days);
        prop_assert_eq!(samples.len(), days as usize * SAMPLING_HOURS.len());
    }

    #[test]
    fn series_stays_within_bounds(seed in any::<u64>(), start in arb_date()) {
        let mut rng = seeded(seed);
        for s in VitalsGenerator::new().series(&mut rng, "P001", start, 10) {
            prop_assert!(s.within_bounds(), "{:?}", s);
        }
    }

    #[test]
    fn series_is_chronological(seed in any::<u64>(), start in arb_date()) {
        let mut rng = seeded(seed);
        let samples = VitalsGenerator::new().series(&mut rng, "P001", start, 5);
        for pair in samples.windows(2) {
            prop_assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }

    /// Same stream, same baseline: the modified reading is never lower than
    /// the unmodified one on any channel.
    #[test]
    fn modifiers_never_lower_a_reading(seed in any::<u64>(), start in arb_date(), hour_idx in 0usize..4) {
        let baseline = VitalBaseline::draw(&mut seeded(seed ^ 0xabcd));
        let at = start.and_hms_opt(SAMPLING_HOURS[hour_idx], 15, 0).unwrap();
        let plain = VitalsGenerator::with_modifiers(Vec::new())
            .sample_at(&mut seeded(seed), "P001", &baseline, at);
        let lifted = VitalsGenerator::new().sample_at(&mut seeded(seed), "P001", &baseline, at);
        prop_assert!(lifted.heart_rate >= plain.heart_rate);
        prop_assert!(lifted.glucose >= plain.glucose);
        prop_assert_eq!(lifted.blood_pressure_systolic, plain.blood_pressure_systolic);
        if !matches!(start.weekday(), Weekday::Sat | Weekday::Sun) {
            prop_assert_eq!(lifted.heart_rate, plain.heart_rate);
        }
    }

    #[test]
    fn thirty_days_gives_one_hundred_twenty(seed in any::<u64>()) {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let samples = VitalsGenerator::new().recent(&mut seeded(seed), "P003", today, 30);
        prop_assert_eq!(samples.len(), 120);
        prop_assert!(samples.iter().all(|s| s.timestamp.date() < today));
    }
}

// ============================================================================
// Live readings
// ============================================================================

proptest! {
    #[test]
    fn live_reading_within_bounds(seed in any::<u64>(), day in arb_date()) {
        let at = day.and_hms_opt(10, 0, 0).unwrap();
        let s = live_sample(&mut seeded(seed), "P001", at);
        prop_assert!(s.within_bounds(), "{:?}", s);
    }
}
