//! Particle Burst Effects: short-lived particle groups spawned when an object
//! is destroyed.
//!
//! # Invariants
//! - Bursts never share particle state.
//! - A burst reports completion exactly once, then stops changing.
//! - Invalid burst parameters are rejected, never clamped.

mod burst;
mod effects;

pub use burst::{BurstConfig, BurstEffect, BurstError, BurstId, BurstStatus, Particle};
pub use effects::EffectSet;
