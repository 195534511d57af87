//! # Vital signs
//!
//! Historical series and live readings for the seven vital channels.
//!
//! ## Historical series
//!
//! One [`VitalBaseline`] is drawn per patient and held for the whole series.
//! Each day gets four readings (08:00, 12:00, 16:00, 20:00), each an
//! independent bounded-walk draw around that baseline. Situational modifiers
//! (weekend activity, post-meal glucose) only ever lift a channel, and are
//! applied before the final clamp.
//!
//! ## Live readings
//!
//! A live reading draws a fresh baseline and uses the narrower live noise
//! band. Readings are independent of each other and of any stored series.
//! Modifiers are not applied on this path.

mod baseline;
mod history;
mod live;
mod modifiers;

pub use baseline::VitalBaseline;
pub use history::{VitalsGenerator, SAMPLING_HOURS};
pub use live::{live_sample, LiveFeed, LiveFeedConfig, LiveHandle, LiveWindow};
pub use modifiers::{Situation, SituationalModifier, HISTORICAL_MODIFIERS};
