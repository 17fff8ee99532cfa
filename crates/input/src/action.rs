use glam::Vec2;

/// A high-level input action produced by the host (window, browser, CLI).
///
/// The interaction handler consumes actions, never raw input events, so any
/// host can drive the same scene logic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Click at pixel coordinates (origin top-left, `y` down) inside a
    /// viewport of the given size.
    ClickPixels {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Click at normalized device coordinates (`x` right, `y` up, `[-1, 1]`).
    ClickNdc(Vec2),
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("viewport must have positive size, got {width}x{height}")]
pub struct ViewportError {
    pub width: f32,
    pub height: f32,
}

impl Action {
    /// Pointer position in normalized device coordinates, if this action is
    /// a pointer action.
    pub fn pointer_ndc(&self) -> Result<Option<Vec2>, ViewportError> {
        match *self {
            Action::ClickPixels {
                x,
                y,
                width,
                height,
            } => pixels_to_ndc(x, y, width, height).map(Some),
            Action::ClickNdc(ndc) => Ok(Some(ndc)),
            Action::Noop => Ok(None),
        }
    }
}

/// Convert a pixel position to normalized device coordinates, flipping `y`.
pub fn pixels_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Result<Vec2, ViewportError> {
    if !(width > 0.0 && height > 0.0) {
        return Err(ViewportError { width, height });
    }
    Ok(Vec2::new(x / width * 2.0 - 1.0, -(y / height * 2.0 - 1.0)))
}
