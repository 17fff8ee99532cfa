//! Rendering Adapter: the seam to the external rendering collaborator.
//!
//! # Invariants
//! - Renderers see a read-only `FrameView` and cannot mutate scene state.
//! - The frame view is built after the camera update for that tick.

mod renderer;

pub use renderer::{DebugTextRenderer, FrameView, NullRenderer, Renderer};
