//! # Narrative synthesis
//!
//! Reports and professional comments whose wording is drawn from explicit
//! tables keyed by report type, body kind and comment topic. Control flow
//! only picks a row; every phrase lives in [`templates`].
//!
//! A report summary mentions a condition's terms only when the patient has
//! that condition. With nothing to say it falls back to
//! `Routine <report type> performed`.

pub mod comments;
pub mod reports;
pub mod templates;

pub use comments::{CommentDraft, CommentSynthesizer, DraftError};
pub use reports::ReportSynthesizer;
pub use templates::BodyKind;
