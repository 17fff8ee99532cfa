use std::fmt::Write;
use wormhole_camera::Camera;
use wormhole_fx::EffectSet;
use wormhole_kernel::Registry;

/// Everything a renderer may look at for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    /// Frames rendered before this one.
    pub frame: u64,
    /// Normalized position of the camera on its loop.
    pub progress: f32,
    pub camera: &'a Camera,
    pub objects: &'a Registry,
    pub effects: &'a EffectSet,
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a frame view and produces output. It never mutates the
/// scene; scene truth is owned by the frame driver.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&mut self, view: &FrameView<'_>) -> Self::Output;
}

/// Discards every frame. Used for headless soak runs.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    type Output = ();

    fn render(&mut self, _view: &FrameView<'_>) {}
}

/// Produces a human-readable description of each frame.
///
/// Stand-in for a GPU backend in the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    list_objects: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also print one line per live object.
    pub fn with_objects(mut self, list_objects: bool) -> Self {
        self.list_objects = list_objects;
        self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, view: &FrameView<'_>) -> String {
        let mut out = String::new();
        let eye = view.camera.state.position;
        let target = view.camera.state.target;

        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "=== Frame {} (progress={:.3}) ===",
            view.frame, view.progress
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0}",
            eye.x,
            eye.y,
            eye.z,
            target.x,
            target.y,
            target.z,
            view.camera.projection.fov_degrees
        );
        let _ = writeln!(out, "Objects: {}", view.objects.len());
        let _ = writeln!(
            out,
            "Bursts: {} ({} particles)",
            view.effects.len(),
            view.effects.particle_count()
        );

        for burst in view.effects.iter() {
            let o = burst.origin();
            let _ = writeln!(
                out,
                "  {} origin=({:.2}, {:.2}, {:.2}) frames={} peak={:.4}",
                burst.id(),
                o.x,
                o.y,
                o.z,
                burst.frames(),
                burst.peak_speed()
            );
        }

        if self.list_objects {
            for object in view.objects.iter() {
                let p = object.position;
                let c = object.color;
                let _ = writeln!(
                    out,
                    "  {} pos=({:.2}, {:.2}, {:.2}) rgb=({:.2}, {:.2}, {:.2})",
                    object.id, p.x, p.y, p.z, c.r, c.g, c.b
                );
            }
        }

        out
    }
}
