//! # Snapshot Testing Support
//!
//! Utilities for testing partitionings via snapshot assertions and invariant
//! checks.
//!
//! - **`normalize`**: converts a region list to a stable, serializable
//!   [`Snap`] (content type name, span and a text preview per region) for
//!   `insta` snapshots
//! - **`invariants`**: runtime checks that a region list covers its range
//!   without gaps or overlaps and never has two adjacent default regions

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{RegionSnap, Snap, normalize, preview};
