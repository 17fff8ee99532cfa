//! Camera Rig: places and orients the camera along a closed path each frame.
//!
//! # Invariants
//! - The rig is the only writer of its `CameraState`.
//! - Progress along the loop is a pure function of accumulated time.
//! - A camera whose view cannot be built reports an error instead of producing NaN rays.

mod camera;
mod rig;

pub use camera::{Camera, CameraError, CameraState, Projection};
pub use rig::{CameraRig, RigConfig, RigError};
