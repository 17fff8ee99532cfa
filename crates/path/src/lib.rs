//! Curve Sampler: closed 3D paths sampled by a normalized parameter.
//!
//! # Invariants
//! - A path is immutable once built.
//! - `point_at(t) == point_at(t + 1)` for every `t` (closed loop).
//! - Construction rejects rings with fewer than 3 distinct points, coincident
//!   neighbours or all points on one line, any of which stalls the curve.

mod curve;
mod presets;

pub use curve::{ARC_LENGTH_DIVISIONS, Path, PathError};
pub use presets::wormhole_loop;
