use glam::Vec3;
use serde::{Deserialize, Serialize};
use wormhole_path::{Path, PathError};

use crate::camera::CameraState;

/// Errors from building or advancing a [`CameraRig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RigError {
    #[error("malformed camera path: {0}")]
    Path(#[from] PathError),
    #[error("loop duration must be positive and finite, got {0} ms")]
    InvalidLoopDuration(f64),
    #[error("look-ahead must lie in (0, 1), got {0}")]
    InvalidLookAhead(f32),
    #[error("speed must be positive and finite, got {0}")]
    InvalidSpeed(f64),
    #[error("frame delta must be non-negative and finite, got {0} ms")]
    InvalidDelta(f64),
}

/// Timing and orientation constants for the rig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Time for one full lap, in scaled milliseconds.
    pub loop_duration_ms: f64,
    /// How far ahead on the loop (normalized) the camera looks.
    pub look_ahead: f32,
    /// Multiplier applied to every frame delta before it accumulates.
    pub speed: f64,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            loop_duration_ms: 10_000.0,
            look_ahead: 0.03,
            speed: 1.0,
        }
    }
}

impl RigConfig {
    pub fn validate(&self) -> Result<(), RigError> {
        if !(self.loop_duration_ms > 0.0 && self.loop_duration_ms.is_finite()) {
            return Err(RigError::InvalidLoopDuration(self.loop_duration_ms));
        }
        if !(self.look_ahead > 0.0 && self.look_ahead < 1.0) {
            return Err(RigError::InvalidLookAhead(self.look_ahead));
        }
        if !(self.speed > 0.0 && self.speed.is_finite()) {
            return Err(RigError::InvalidSpeed(self.speed));
        }
        Ok(())
    }
}

/// Flies a camera around a closed path at constant arc-length speed.
///
/// State is a single accumulated time; position and look target are derived
/// from it on every tick.
#[derive(Debug, Clone)]
pub struct CameraRig {
    path: Path,
    config: RigConfig,
    elapsed_ms: f64,
    state: CameraState,
}

impl CameraRig {
    pub fn new(path: Path, config: RigConfig) -> Result<Self, RigError> {
        config.validate()?;
        let mut rig = Self {
            path,
            config,
            elapsed_ms: 0.0,
            state: CameraState::default(),
        };
        rig.place();
        Ok(rig)
    }

    /// Build the path and the rig in one step.
    pub fn from_points(points: Vec<Vec3>, config: RigConfig) -> Result<Self, RigError> {
        Self::new(Path::new(points)?, config)
    }

    /// Advance by `dt_ms` and reposition the camera.
    pub fn tick(&mut self, dt_ms: f64) -> Result<&CameraState, RigError> {
        if !(dt_ms >= 0.0 && dt_ms.is_finite()) {
            return Err(RigError::InvalidDelta(dt_ms));
        }
        self.elapsed_ms += dt_ms * self.config.speed;
        self.place();
        tracing::trace!(
            elapsed_ms = self.elapsed_ms,
            progress = self.progress(),
            "camera rig advanced"
        );
        Ok(&self.state)
    }

    /// Normalized position on the loop, in `[0, 1)`.
    pub fn progress(&self) -> f32 {
        let p = (self.elapsed_ms / self.config.loop_duration_ms).rem_euclid(1.0);
        if p >= 1.0 { 0.0 } else { p as f32 }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    fn place(&mut self) {
        let p = self.progress();
        self.state = CameraState {
            position: self.path.point_at(p),
            target: self.path.look_ahead_at(p, self.config.look_ahead),
        };
    }
}
