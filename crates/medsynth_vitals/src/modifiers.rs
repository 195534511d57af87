//! Situational modifiers: one-directional lifts tied to when a reading is taken.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use medsynth_core::VitalChannel;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Situation {
    /// Saturday or Sunday: more activity.
    Weekend,
    /// 12:00 to 14:59: after lunch.
    PostMeal,
}

impl Situation {
    pub fn applies(self, at: NaiveDateTime) -> bool {
        match self {
            Situation::Weekend => matches!(at.weekday(), Weekday::Sat | Weekday::Sun),
            Situation::PostMeal => (12..=14).contains(&at.hour()),
        }
    }
}

/// Lift `channel` by a whole number drawn from `lift` when `situation` applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SituationalModifier {
    pub situation: Situation,
    pub channel: VitalChannel,
    pub lift: (u32, u32),
}

pub const HISTORICAL_MODIFIERS: [SituationalModifier; 2] = [
    SituationalModifier {
        situation: Situation::Weekend,
        channel: VitalChannel::HeartRate,
        lift: (0, 5),
    },
    SituationalModifier {
        situation: Situation::PostMeal,
        channel: VitalChannel::Glucose,
        lift: (10, 30),
    },
];

/// Per-channel offsets for a reading taken at `at`. Offsets are never negative.
pub(crate) fn offsets<R: Rng + ?Sized>(
    rng: &mut R,
    at: NaiveDateTime,
    modifiers: &[SituationalModifier],
) -> [f64; 7] {
    let mut out = [0.0; 7];
    for m in modifiers.iter().filter(|m| m.situation.applies(at)) {
        let (lo, hi) = (m.lift.0.min(m.lift.1), m.lift.0.max(m.lift.1));
        out[m.channel.index()] += rng.gen_range(lo..=hi) as f64;
    }
    out
}
