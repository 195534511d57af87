//! Bounded random walk: one noisy draw around a fixed baseline.
//!
//! sample = clamp(round(baseline + noise(spread) + offset), min, max)
//!
//! The walk carries no state of its own. The caller holds the baseline, so a
//! per-patient "normal" is simply a baseline reused across many draws.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Hard `[min, max]` range a channel may never leave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp into range. NaN collapses to `min`.
    #[inline]
    pub fn clamp(&self, v: f64) -> f64 {
        if v.is_nan() {
            return self.min;
        }
        v.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Granularity of a channel's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Integer-valued; noise is drawn as an integer in `[-spread, spread]`.
    Whole,
    /// Continuous; noise is uniform in `[-spread, spread]`, result kept to one decimal.
    Tenths,
}

impl Resolution {
    #[inline]
    pub fn round(self, v: f64) -> f64 {
        match self {
            Resolution::Whole => v.round(),
            Resolution::Tenths => round_tenths(v),
        }
    }
}

#[inline]
pub fn round_tenths(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// One channel's walk parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedWalk {
    /// Symmetric perturbation half-width.
    pub spread: f64,
    pub bounds: Bounds,
    pub resolution: Resolution,
}

impl BoundedWalk {
    pub const fn new(spread: f64, bounds: Bounds, resolution: Resolution) -> Self {
        Self {
            spread,
            bounds,
            resolution,
        }
    }

    /// Unclamped `baseline + noise`.
    pub fn perturb<R: Rng + ?Sized>(&self, rng: &mut R, baseline: f64) -> f64 {
        let spread = self.spread.abs();
        match self.resolution {
            Resolution::Whole => {
                let s = spread.round() as i64;
                baseline.round() + rng.gen_range(-s..=s) as f64
            }
            Resolution::Tenths => {
                if spread == 0.0 {
                    baseline
                } else {
                    baseline + rng.gen_range(-spread..=spread)
                }
            }
        }
    }

    /// Round to the channel's resolution, then clamp. Clamping last keeps the
    /// result inside `bounds` even when rounding would nudge it across.
    pub fn settle(&self, raw: f64) -> f64 {
        self.bounds.clamp(self.resolution.round(raw))
    }

    /// One draw around `baseline`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, baseline: f64) -> f64 {
        let raw = self.perturb(rng, baseline);
        self.settle(raw)
    }

    /// One draw around `baseline` with a one-directional situational offset
    /// added before the final clamp.
    pub fn sample_with_offset<R: Rng + ?Sized>(&self, rng: &mut R, baseline: f64, offset: f64) -> f64 {
        let raw = self.perturb(rng, baseline) + offset;
        self.settle(raw)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    const HEART: BoundedWalk = BoundedWalk::new(10.0, Bounds::new(40.0, 120.0), Resolution::Whole);
    const TEMP: BoundedWalk = BoundedWalk::new(0.4, Bounds::new(35.5, 38.0), Resolution::Tenths);

    #[test]
    fn test_whole_samples_are_integers_within_spread() {
        let mut rng = seeded(1);
        for _ in 0..500 {
            let v = HEART.sample(&mut rng, 75.0);
            assert_eq!(v, v.round());
            assert!((65.0..=85.0).contains(&v), "got {}", v);
        }
    }

    #[test]
    fn test_tenths_samples_have_one_decimal() {
        let mut rng = seeded(2);
        for _ in 0..500 {
            let v = TEMP.sample(&mut rng, 36.9);
            assert!((v * 10.0 - (v * 10.0).round()).abs() < 1e-9, "got {}", v);
            assert!(TEMP.bounds.contains(v));
        }
    }

    #[test]
    fn test_out_of_range_baseline_is_clamped() {
        let mut rng = seeded(3);
        assert_eq!(HEART.sample(&mut rng, 500.0), 120.0);
        assert_eq!(HEART.sample(&mut rng, -500.0), 40.0);
        assert_eq!(TEMP.sample(&mut rng, 10.0), 35.5);
    }

    #[test]
    fn test_offset_is_applied_before_clamp() {
        let mut a = seeded(4);
        let mut b = seeded(4);
        let plain = HEART.sample(&mut a, 118.0);
        let lifted = HEART.sample_with_offset(&mut b, 118.0, 5.0);
        assert!(lifted >= plain);
        assert!(lifted <= 120.0);
    }

    #[test]
    fn test_zero_spread_returns_baseline() {
        let walk = BoundedWalk::new(0.0, Bounds::new(0.0, 10.0), Resolution::Tenths);
        let mut rng = seeded(5);
        assert_eq!(walk.sample(&mut rng, 4.25), 4.3);
    }

    #[test]
    fn test_nan_collapses_to_min() {
        assert_eq!(Bounds::new(1.0, 2.0).clamp(f64::NAN), 1.0);
    }
}
