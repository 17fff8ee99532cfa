//! Frame Driver: owns the scene and advances it once per display refresh.
//!
//! # Invariants
//! - Within a tick the camera is updated before the renderer sees the frame.
//! - Input actions are applied between ticks, never during one.
//! - Scene state lives in an explicit `Scene` value; there are no globals.

mod config;
mod driver;
mod scene;
mod summary;
mod timer;

pub use config::{ConfigError, SceneConfig};
pub use driver::{
    FixedStepScheduler, FrameDriver, FrameReport, FrameScheduler, PacedScheduler, tick,
};
pub use scene::{Scene, populate};
pub use summary::SceneSummary;
pub use timer::FrameTimer;

use wormhole_camera::{CameraError, RigError};
use wormhole_fx::BurstError;
use wormhole_input::InteractionError;
use wormhole_kernel::RegistryError;

/// Errors surfaced by scene construction, ticking and input handling.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Rig(#[from] RigError),
    #[error("invalid projection: {0}")]
    Projection(CameraError),
    #[error(transparent)]
    Burst(#[from] BurstError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Interaction(#[from] InteractionError),
}
