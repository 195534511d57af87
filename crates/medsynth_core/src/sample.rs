//! Vital-sign samples and the per-channel walk parameters.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::walk::{BoundedWalk, Bounds, Resolution};

/// One reading of all seven channels. Every channel lies inside its
/// [`ChannelSpec::bounds`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSample {
    pub patient_id: String,
    pub timestamp: NaiveDateTime,
    pub heart_rate: u32,
    pub blood_pressure_systolic: u32,
    pub blood_pressure_diastolic: u32,
    pub temperature: f64,
    pub respiratory_rate: u32,
    pub oxygen_saturation: u32,
    pub glucose: u32,
}

impl VitalSample {
    pub fn get(&self, channel: VitalChannel) -> f64 {
        match channel {
            VitalChannel::HeartRate => self.heart_rate as f64,
            VitalChannel::Systolic => self.blood_pressure_systolic as f64,
            VitalChannel::Diastolic => self.blood_pressure_diastolic as f64,
            VitalChannel::Temperature => self.temperature,
            VitalChannel::RespiratoryRate => self.respiratory_rate as f64,
            VitalChannel::OxygenSaturation => self.oxygen_saturation as f64,
            VitalChannel::Glucose => self.glucose as f64,
        }
    }

    /// Assemble a sample from settled channel values in [`VitalChannel::ALL`] order.
    pub fn from_channels(patient_id: &str, timestamp: NaiveDateTime, values: [f64; 7]) -> Self {
        let whole = |v: f64| v.max(0.0).round() as u32;
        Self {
            patient_id: patient_id.to_string(),
            timestamp,
            heart_rate: whole(values[0]),
            blood_pressure_systolic: whole(values[1]),
            blood_pressure_diastolic: whole(values[2]),
            temperature: values[3],
            respiratory_rate: whole(values[4]),
            oxygen_saturation: whole(values[5]),
            glucose: whole(values[6]),
        }
    }

    pub fn status(&self, channel: VitalChannel) -> VitalStatus {
        channel.status(self.get(channel))
    }

    /// Combined pressure status: the worse of systolic and diastolic.
    pub fn blood_pressure_status(&self) -> VitalStatus {
        self.status(VitalChannel::Systolic)
            .max(self.status(VitalChannel::Diastolic))
    }

    /// Worst status across all channels.
    pub fn worst_status(&self) -> VitalStatus {
        VitalChannel::ALL
            .iter()
            .map(|c| self.status(*c))
            .max()
            .unwrap_or(VitalStatus::Normal)
    }

    /// True when every channel sits inside its clamp range.
    pub fn within_bounds(&self) -> bool {
        VitalChannel::ALL
            .iter()
            .all(|c| c.spec().bounds.contains(self.get(*c)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalChannel {
    HeartRate,
    Systolic,
    Diastolic,
    Temperature,
    RespiratoryRate,
    OxygenSaturation,
    Glucose,
}

impl VitalChannel {
    pub const ALL: [VitalChannel; 7] = [
        VitalChannel::HeartRate,
        VitalChannel::Systolic,
        VitalChannel::Diastolic,
        VitalChannel::Temperature,
        VitalChannel::RespiratoryRate,
        VitalChannel::OxygenSaturation,
        VitalChannel::Glucose,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn unit(self) -> &'static str {
        match self {
            VitalChannel::HeartRate => "bpm",
            VitalChannel::Systolic | VitalChannel::Diastolic => "mmHg",
            VitalChannel::Temperature => "°C",
            VitalChannel::RespiratoryRate => "breaths/min",
            VitalChannel::OxygenSaturation => "%",
            VitalChannel::Glucose => "mg/dL",
        }
    }

    pub fn spec(self) -> ChannelSpec {
        use Resolution::{Tenths, Whole};
        match self {
            VitalChannel::HeartRate => ChannelSpec::new((65.0, 85.0), 10.0, 5.0, (40.0, 120.0), Whole),
            VitalChannel::Systolic => ChannelSpec::new((110.0, 140.0), 15.0, 8.0, (90.0, 180.0), Whole),
            VitalChannel::Diastolic => ChannelSpec::new((70.0, 90.0), 10.0, 5.0, (50.0, 110.0), Whole),
            VitalChannel::Temperature => ChannelSpec::new((36.5, 37.3), 0.4, 0.2, (35.5, 38.0), Tenths),
            VitalChannel::RespiratoryRate => ChannelSpec::new((12.0, 18.0), 3.0, 2.0, (10.0, 25.0), Whole),
            VitalChannel::OxygenSaturation => ChannelSpec::new((94.0, 99.0), 3.0, 2.0, (88.0, 100.0), Whole),
            VitalChannel::Glucose => ChannelSpec::new((80.0, 120.0), 20.0, 10.0, (60.0, 200.0), Whole),
        }
    }
}

/// Alarm level of a single reading. Ordered so `max` picks the worse one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalStatus {
    Normal,
    Warning,
    Danger,
}

impl VitalStatus {
    pub fn label(self) -> &'static str {
        match self {
            VitalStatus::Normal => "normal",
            VitalStatus::Warning => "warning",
            VitalStatus::Danger => "danger",
        }
    }
}

impl fmt::Display for VitalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Open interval of acceptable values; anything strictly outside trips the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlarmBand {
    pub low: f64,
    pub high: f64,
}

impl AlarmBand {
    const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn breached(&self, value: f64) -> bool {
        value < self.low || value > self.high
    }
}

/// Warning and danger bands for one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlarmThresholds {
    pub warning: AlarmBand,
    pub danger: AlarmBand,
}

impl VitalChannel {
    pub fn thresholds(self) -> AlarmThresholds {
        let (warning, danger) = match self {
            VitalChannel::HeartRate => (AlarmBand::new(60.0, 100.0), AlarmBand::new(50.0, 120.0)),
            VitalChannel::Systolic => (AlarmBand::new(90.0, 130.0), AlarmBand::new(80.0, 180.0)),
            VitalChannel::Diastolic => (AlarmBand::new(60.0, 80.0), AlarmBand::new(50.0, 120.0)),
            VitalChannel::Temperature => (AlarmBand::new(36.0, 37.5), AlarmBand::new(35.5, 38.0)),
            VitalChannel::RespiratoryRate => (AlarmBand::new(12.0, 20.0), AlarmBand::new(10.0, 30.0)),
            VitalChannel::OxygenSaturation => (AlarmBand::new(95.0, f64::INFINITY), AlarmBand::new(90.0, f64::INFINITY)),
            VitalChannel::Glucose => (AlarmBand::new(70.0, 140.0), AlarmBand::new(55.0, 200.0)),
        };
        AlarmThresholds { warning, danger }
    }

    /// Classify one reading. NaN is treated as danger.
    pub fn status(self, value: f64) -> VitalStatus {
        let t = self.thresholds();
        if value.is_nan() || t.danger.breached(value) {
            VitalStatus::Danger
        } else if t.warning.breached(value) {
            VitalStatus::Warning
        } else {
            VitalStatus::Normal
        }
    }
}

impl fmt::Display for VitalChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VitalChannel::HeartRate => "heart_rate",
            VitalChannel::Systolic => "blood_pressure_systolic",
            VitalChannel::Diastolic => "blood_pressure_diastolic",
            VitalChannel::Temperature => "temperature",
            VitalChannel::RespiratoryRate => "respiratory_rate",
            VitalChannel::OxygenSaturation => "oxygen_saturation",
            VitalChannel::Glucose => "glucose",
        };
        f.write_str(name)
    }
}

/// Baseline range, noise widths and hard bounds for one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSpec {
    /// Range a patient's baseline is drawn from.
    pub baseline: (f64, f64),
    /// Noise half-width for historical series.
    pub historical_spread: f64,
    /// Narrower noise half-width for live readings.
    pub live_spread: f64,
    pub bounds: Bounds,
    pub resolution: Resolution,
}

impl ChannelSpec {
    const fn new(
        baseline: (f64, f64),
        historical_spread: f64,
        live_spread: f64,
        bounds: (f64, f64),
        resolution: Resolution,
    ) -> Self {
        Self {
            baseline,
            historical_spread,
            live_spread,
            bounds: Bounds::new(bounds.0, bounds.1),
            resolution,
        }
    }

    pub fn historical_walk(&self) -> BoundedWalk {
        BoundedWalk::new(self.historical_spread, self.bounds, self.resolution)
    }

    pub fn live_walk(&self) -> BoundedWalk {
        BoundedWalk::new(self.live_spread, self.bounds, self.resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_channel_order_matches_index() {
        for (i, c) in VitalChannel::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn test_baselines_sit_inside_bounds() {
        for c in VitalChannel::ALL {
            let spec = c.spec();
            assert!(spec.bounds.contains(spec.baseline.0), "{}", c);
            assert!(spec.bounds.contains(spec.baseline.1), "{}", c);
            assert!(spec.live_spread < spec.historical_spread, "{}", c);
        }
    }

    #[test]
    fn test_from_channels_roundtrips_get() {
        let s = VitalSample::from_channels("P001", ts(), [72.0, 120.0, 80.0, 36.8, 14.0, 97.0, 101.0]);
        assert_eq!(s.get(VitalChannel::HeartRate), 72.0);
        assert_eq!(s.get(VitalChannel::Temperature), 36.8);
        assert_eq!(s.get(VitalChannel::Glucose), 101.0);
        assert!(s.within_bounds());
    }

    #[test]
    fn test_heart_rate_status_boundaries() {
        let hr = VitalChannel::HeartRate;
        assert_eq!(hr.status(60.0), VitalStatus::Normal);
        assert_eq!(hr.status(100.0), VitalStatus::Normal);
        assert_eq!(hr.status(59.0), VitalStatus::Warning);
        assert_eq!(hr.status(101.0), VitalStatus::Warning);
        assert_eq!(hr.status(50.0), VitalStatus::Warning);
        assert_eq!(hr.status(120.0), VitalStatus::Warning);
        assert_eq!(hr.status(49.0), VitalStatus::Danger);
        assert_eq!(hr.status(121.0), VitalStatus::Danger);
    }

    #[test]
    fn test_oxygen_has_no_upper_alarm() {
        let o2 = VitalChannel::OxygenSaturation;
        assert_eq!(o2.status(100.0), VitalStatus::Normal);
        assert_eq!(o2.status(95.0), VitalStatus::Normal);
        assert_eq!(o2.status(94.0), VitalStatus::Warning);
        assert_eq!(o2.status(90.0), VitalStatus::Warning);
        assert_eq!(o2.status(89.0), VitalStatus::Danger);
    }

    #[test]
    fn test_temperature_status_boundaries() {
        let t = VitalChannel::Temperature;
        assert_eq!(t.status(36.0), VitalStatus::Normal);
        assert_eq!(t.status(37.5), VitalStatus::Normal);
        assert_eq!(t.status(35.9), VitalStatus::Warning);
        assert_eq!(t.status(37.6), VitalStatus::Warning);
        assert_eq!(t.status(35.5), VitalStatus::Warning);
        assert_eq!(t.status(38.0), VitalStatus::Warning);
        assert_eq!(t.status(35.4), VitalStatus::Danger);
        assert_eq!(t.status(38.1), VitalStatus::Danger);
        assert_eq!(t.status(f64::NAN), VitalStatus::Danger);
    }

    #[test]
    fn test_respiratory_and_glucose_boundaries() {
        let rr = VitalChannel::RespiratoryRate;
        assert_eq!(rr.status(12.0), VitalStatus::Normal);
        assert_eq!(rr.status(20.0), VitalStatus::Normal);
        assert_eq!(rr.status(11.0), VitalStatus::Warning);
        assert_eq!(rr.status(30.0), VitalStatus::Warning);
        assert_eq!(rr.status(9.0), VitalStatus::Danger);
        assert_eq!(rr.status(31.0), VitalStatus::Danger);

        let glu = VitalChannel::Glucose;
        assert_eq!(glu.status(70.0), VitalStatus::Normal);
        assert_eq!(glu.status(140.0), VitalStatus::Normal);
        assert_eq!(glu.status(69.0), VitalStatus::Warning);
        assert_eq!(glu.status(200.0), VitalStatus::Warning);
        assert_eq!(glu.status(54.0), VitalStatus::Danger);
        assert_eq!(glu.status(201.0), VitalStatus::Danger);
    }

    #[test]
    fn test_blood_pressure_takes_worse_channel() {
        let sys = VitalChannel::Systolic;
        assert_eq!(sys.status(90.0), VitalStatus::Normal);
        assert_eq!(sys.status(130.0), VitalStatus::Normal);
        assert_eq!(sys.status(131.0), VitalStatus::Warning);
        assert_eq!(sys.status(80.0), VitalStatus::Warning);
        assert_eq!(sys.status(79.0), VitalStatus::Danger);
        assert_eq!(sys.status(181.0), VitalStatus::Danger);

        let dia = VitalChannel::Diastolic;
        assert_eq!(dia.status(60.0), VitalStatus::Normal);
        assert_eq!(dia.status(80.0), VitalStatus::Normal);
        assert_eq!(dia.status(81.0), VitalStatus::Warning);
        assert_eq!(dia.status(49.0), VitalStatus::Danger);

        let s = VitalSample::from_channels("P001", ts(), [72.0, 120.0, 85.0, 36.8, 14.0, 97.0, 101.0]);
        assert_eq!(s.status(VitalChannel::Systolic), VitalStatus::Normal);
        assert_eq!(s.blood_pressure_status(), VitalStatus::Warning);
        assert_eq!(s.worst_status(), VitalStatus::Warning);
    }

    #[test]
    fn test_calm_sample_is_normal() {
        let s = VitalSample::from_channels("P001", ts(), [72.0, 120.0, 78.0, 36.8, 14.0, 97.0, 101.0]);
        assert_eq!(s.worst_status(), VitalStatus::Normal);
        assert_eq!(format!("{:<7}|", VitalStatus::Danger), "danger |");
    }

    #[test]
    fn test_out_of_bounds_detected() {
        let s = VitalSample::from_channels("P001", ts(), [130.0, 120.0, 80.0, 36.8, 14.0, 97.0, 101.0]);
        assert!(!s.within_bounds());
    }
}
