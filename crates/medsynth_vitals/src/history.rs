//! Multi-day vital series for one patient.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use medsynth_core::{VitalChannel, VitalSample};
use rand::Rng;

use crate::baseline::VitalBaseline;
use crate::modifiers::{offsets, SituationalModifier, HISTORICAL_MODIFIERS};

/// Hours of the day at which readings are taken.
pub const SAMPLING_HOURS: [u32; 4] = [8, 12, 16, 20];

#[derive(Debug, Clone)]
pub struct VitalsGenerator {
    modifiers: Vec<SituationalModifier>,
}

impl Default for VitalsGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl VitalsGenerator {
    /// Generator with the weekend and post-meal modifiers.
    pub fn new() -> Self {
        Self {
            modifiers: HISTORICAL_MODIFIERS.to_vec(),
        }
    }

    /// Generator with a custom modifier set (empty for a flat series).
    pub fn with_modifiers(modifiers: Vec<SituationalModifier>) -> Self {
        Self { modifiers }
    }

    pub fn modifiers(&self) -> &[SituationalModifier] {
        &self.modifiers
    }

    /// `days` days of readings ending the day before `today`, with a freshly
    /// drawn baseline.
    pub fn recent<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        patient_id: &str,
        today: NaiveDate,
        days: u32,
    ) -> Vec<VitalSample> {
        let start = today - Duration::days(i64::from(days));
        self.series(rng, patient_id, start, days)
    }

    /// `days` days of readings starting at `start`, with a freshly drawn baseline.
    pub fn series<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        patient_id: &str,
        start: NaiveDate,
        days: u32,
    ) -> Vec<VitalSample> {
        let baseline = VitalBaseline::draw(rng);
        self.series_with_baseline(rng, patient_id, &baseline, start, days)
    }

    /// `days * 4` readings around a fixed baseline, oldest first.
    pub fn series_with_baseline<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        patient_id: &str,
        baseline: &VitalBaseline,
        start: NaiveDate,
        days: u32,
    ) -> Vec<VitalSample> {
        let mut samples = Vec::with_capacity(days as usize * SAMPLING_HOURS.len());
        for day in 0..days {
            let date = start + Duration::days(i64::from(day));
            for hour in SAMPLING_HOURS {
                let minute = rng.gen_range(0..=59);
                let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
                let at = NaiveDateTime::new(date, time);
                samples.push(self.sample_at(rng, patient_id, baseline, at));
            }
        }
        tracing::debug!("Generated {} vital samples for {}", samples.len(), patient_id);
        samples
    }

    /// One reading at `at`. All channel noise is drawn before any modifier, so
    /// the same random stream gives the same unmodified draws whatever the
    /// modifier set.
    pub fn sample_at<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        patient_id: &str,
        baseline: &VitalBaseline,
        at: NaiveDateTime,
    ) -> VitalSample {
        let mut raw = [0.0; 7];
        for channel in VitalChannel::ALL {
            let walk = channel.spec().historical_walk();
            raw[channel.index()] = walk.perturb(rng, baseline.get(channel));
        }

        let lift = offsets(rng, at, &self.modifiers);

        let mut settled = [0.0; 7];
        for channel in VitalChannel::ALL {
            let i = channel.index();
            settled[i] = channel.spec().historical_walk().settle(raw[i] + lift[i]);
        }
        VitalSample::from_channels(patient_id, at, settled)
    }
}
