//! Test helpers shared across the workspace.
//!
//! Provides store fakes that record calls and inject failures, and
//! `figment::Jail` plumbing for settings tests.

pub mod figment;
pub mod store;

pub use store::{Operation, RecordingStore, StoreCall};
