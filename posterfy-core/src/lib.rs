//! Core types for the Posterfy movie feed
//!
//! This crate defines the shared data structures used across the workspace:
//! the normalized movie record, the fixed platform and category vocabulary,
//! and the published feed snapshot.

pub mod movie;
pub mod platform;
pub mod snapshot;

pub use movie::MovieRecord;
pub use platform::{Category, Platform};
pub use snapshot::FeedSnapshot;
