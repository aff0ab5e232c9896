//! Headless testing helpers: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`Session`](crate::session::Session)
//! programmatically. Use [`depict_to_string`] and related helpers to capture
//! depicted output for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{depict_to_string, depict_with_stable_ids, outline_to_string, stable_ids};
