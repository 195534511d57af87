//! Per-patient baseline: the patient's "normal" for each channel.

use medsynth_core::walk::round_tenths;
use medsynth_core::{Resolution, VitalChannel};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One baseline value per channel, indexed by [`VitalChannel::index`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalBaseline {
    values: [f64; 7],
}

impl VitalBaseline {
    /// Draw a baseline uniformly from each channel's baseline range.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut values = [0.0; 7];
        for channel in VitalChannel::ALL {
            let spec = channel.spec();
            let (lo, hi) = spec.baseline;
            values[channel.index()] = match spec.resolution {
                Resolution::Whole => rng.gen_range(lo as i64..=hi as i64) as f64,
                Resolution::Tenths => round_tenths(rng.gen_range(lo..=hi)),
            };
        }
        Self { values }
    }

    pub fn get(&self, channel: VitalChannel) -> f64 {
        self.values[channel.index()]
    }

    /// Pin one channel to a fixed value.
    pub fn with(mut self, channel: VitalChannel, value: f64) -> Self {
        self.values[channel.index()] = value;
        self
    }
}
