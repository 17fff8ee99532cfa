use glam::Vec2;
use wormhole_camera::{Camera, CameraError};
use wormhole_common::RandomSource;
use wormhole_fx::{BurstError, BurstId, EffectSet};
use wormhole_kernel::{InteractiveObject, Registry};

use crate::action::{Action, ViewportError};

/// What a click did to the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// The ray passed through no object. Nothing changed.
    Miss,
    /// `object` was removed from the registry and `burst` spawned in its place.
    Exploded {
        object: InteractiveObject,
        burst: BurstId,
        distance: f32,
    },
}

/// Internal failures while handling a click. A miss is not one of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InteractionError {
    #[error("cannot build pick ray: {0}")]
    Camera(#[from] CameraError),
    #[error("cannot spawn burst: {0}")]
    Burst(#[from] BurstError),
    #[error(transparent)]
    Viewport(#[from] ViewportError),
}

/// Maps pointer clicks to object picks and explosions.
#[derive(Debug, Clone, Default)]
pub struct InteractionHandler {
    clicks: u64,
    hits: u64,
}

impl InteractionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an input action. Returns `None` for non-pointer actions.
    pub fn handle(
        &mut self,
        action: &Action,
        camera: &Camera,
        registry: &mut Registry,
        effects: &mut EffectSet,
        rng: &mut impl RandomSource,
    ) -> Result<Option<ClickOutcome>, InteractionError> {
        match action.pointer_ndc()? {
            Some(ndc) => self.click(ndc, camera, registry, effects, rng).map(Some),
            None => Ok(None),
        }
    }

    /// Pick the nearest object under `ndc`; on a hit, remove it and spawn a
    /// burst with its position and color.
    ///
    /// The burst is built before the object is removed, so an error leaves
    /// the registry and effect set untouched.
    pub fn click(
        &mut self,
        ndc: Vec2,
        camera: &Camera,
        registry: &mut Registry,
        effects: &mut EffectSet,
        rng: &mut impl RandomSource,
    ) -> Result<ClickOutcome, InteractionError> {
        let ray = camera.ray_from_ndc(ndc)?;
        self.clicks += 1;

        let Some(hit) = registry.pick(&ray) else {
            tracing::debug!(x = ndc.x, y = ndc.y, "click missed");
            return Ok(ClickOutcome::Miss);
        };
        let Some(&object) = registry.get(hit.id) else {
            return Ok(ClickOutcome::Miss);
        };

        let burst = effects.prepare(object.position, object.color, rng)?;
        registry.remove(object.id);
        let burst = effects.insert(burst);
        self.hits += 1;

        tracing::debug!(
            object = %object.id,
            %burst,
            distance = hit.distance,
            "click exploded object"
        );
        Ok(ClickOutcome::Exploded {
            object,
            burst,
            distance: hit.distance,
        })
    }

    /// Pointer clicks handled so far, hits and misses alike.
    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }
}
