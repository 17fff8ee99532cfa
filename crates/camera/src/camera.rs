use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use wormhole_common::Ray;

/// Below this the eye and target are considered the same point.
const MIN_LOOK_DISTANCE: f32 = 1e-6;

/// Errors from building view/projection matrices or picking rays.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("camera position and look target coincide at {0}")]
    DegenerateView(Vec3),
    #[error("invalid projection: {0}")]
    InvalidProjection(&'static str),
    #[error("pointer ({x}, {y}) is outside normalized device coordinates")]
    NdcOutOfRange { x: f32, y: f32 },
}

/// Where the camera is and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
        }
    }
}

impl CameraState {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Unit view direction.
    pub fn forward(&self) -> Result<Vec3, CameraError> {
        let look = self.target - self.position;
        if !look.is_finite() || look.length() < MIN_LOOK_DISTANCE {
            return Err(CameraError::DegenerateView(self.position));
        }
        Ok(look.normalize())
    }

    /// Right-handed view matrix. Falls back to +Z as the up vector when
    /// looking straight up or down.
    pub fn view_matrix(&self) -> Result<Mat4, CameraError> {
        let forward = self.forward()?;
        let up = if forward.dot(Vec3::Y).abs() > 0.999 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        Ok(Mat4::look_at_rh(self.position, self.target, up))
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    pub fn validate(&self) -> Result<(), CameraError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(CameraError::InvalidProjection("fov must be in (0, 180) degrees"));
        }
        if !(self.aspect > 0.0 && self.aspect.is_finite()) {
            return Err(CameraError::InvalidProjection("aspect must be positive"));
        }
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(CameraError::InvalidProjection("require 0 < near < far"));
        }
        Ok(())
    }

    pub fn matrix(&self) -> Result<Mat4, CameraError> {
        self.validate()?;
        Ok(Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        ))
    }
}

/// A camera as seen by picking and rendering: state plus projection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub state: CameraState,
    pub projection: Projection,
}

impl Camera {
    pub fn new(state: CameraState, projection: Projection) -> Self {
        Self { state, projection }
    }

    pub fn view_projection(&self) -> Result<Mat4, CameraError> {
        Ok(self.projection.matrix()? * self.state.view_matrix()?)
    }

    /// World-space ray from the eye through a pointer at normalized device
    /// coordinates (`x` right, `y` up, both in `[-1, 1]`).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Result<Ray, CameraError> {
        if !ndc.is_finite() || ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
            return Err(CameraError::NdcOutOfRange { x: ndc.x, y: ndc.y });
        }

        let inverse = self.view_projection()?.inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));

        Ray::new(self.state.position, far - near)
            .ok_or(CameraError::DegenerateView(self.state.position))
    }
}
