//! # medsynth core
//!
//! Record shapes shared by every generator, the condition vocabulary they all
//! draw from, and the bounded random walk used for every numeric channel.
//!
//! Generators never own a random source. Every operation takes an explicit
//! `&mut R where R: Rng + ?Sized`, so a seeded [`rng::seeded`] generator makes
//! a whole run reproducible.

pub mod config;
pub mod documents;
pub mod events;
pub mod literal;
pub mod patient;
pub mod rng;
pub mod sample;
pub mod vocabulary;
pub mod walk;

pub use config::{GenerationConfig, LiveConfig, MedsynthConfig, StorageConfig};
pub use documents::{Comment, Profession, Report, ReportSource, ReportType, Topic, UnknownLabel};
pub use events::{ConditionEvent, EventType, Severity};
pub use patient::{EmergencyContact, Gender, Insurance, Patient, Physician};
pub use sample::{AlarmBand, AlarmThresholds, ChannelSpec, VitalChannel, VitalSample, VitalStatus};
pub use walk::{BoundedWalk, Bounds, Resolution};
