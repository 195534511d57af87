//! # Storage
//!
//! Persistence for generated artifacts behind the [`PatientStore`] trait:
//!
//! - [`JsonFileStore`]: one JSON file per artifact kind and patient under a
//!   data directory, comments as an append-only JSONL log, and an optional
//!   flattened `patients.csv` for older tooling. Comment appends hold a
//!   marker-file lock so separate processes never assign the same id.
//! - [`MemoryStore`]: the same contract held in process, for tests and
//!   one-shot runs.
//!
//! Missing data is never fatal to callers that go through [`fallback`]: they
//! get a freshly generated, self-consistent minimal set instead.

pub mod error;
pub mod fallback;
pub mod json_store;
pub mod layout;
pub mod legacy;
pub mod lockfile;
pub mod manifest;
pub mod memory;
pub mod persist;
pub mod store;

pub use error::{Result, StoreError};
pub use json_store::JsonFileStore;
pub use layout::DataLayout;
pub use lockfile::LockPolicy;
pub use manifest::RunManifest;
pub use memory::MemoryStore;
pub use store::PatientStore;
