//! Shared types for the wormhole flythrough core.
//!
//! Everything here is plain data with no knowledge of paths, cameras or the
//! frame loop, so every other crate can depend on it.

mod random;
mod types;

pub use random::{RandomSource, SequenceSource, seeded_rng};
pub use types::{Color, ObjectId, Ray};
