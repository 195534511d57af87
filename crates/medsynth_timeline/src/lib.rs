//! # Condition timelines
//!
//! Every condition on a patient gets its own event chain: a `Diagnosis` at a
//! random point in a 3 to 10 year lookback, followed by up to eight follow-on
//! events spaced 30 to 180 days apart. The chain stops at the first date past
//! "now".
//!
//! Severity moves only through [`next_severity`], a small table keyed by
//! event type. Chains for all conditions are merged and sorted by date for
//! storage, and [`project`] turns them into the `{items, groups}` shape a
//! timeline widget consumes.

mod chain;
mod projection;
mod templates;
mod transition;

pub use chain::{by_condition, ChainBuilder, TimelineGenerator};
pub use projection::{project, severity_background, TimelineGroup, TimelineItem, TimelineProjection};
pub use templates::{describe, PROVIDER_SURNAMES};
pub use transition::{next_severity, transition_for, Transition};
