use rand::SeedableRng;
use rand::rngs::StdRng;
use wormhole_camera::{Camera, CameraRig, Projection};
use wormhole_common::{Color, ObjectId, RandomSource, seeded_rng};
use wormhole_fx::EffectSet;
use wormhole_input::{Action, ClickOutcome, InteractionHandler};
use wormhole_kernel::{Registry, RegistryError};
use wormhole_path::{Path, wormhole_loop};

use crate::DriverError;
use crate::config::SceneConfig;

/// All mutable state of a running flythrough, owned in one place and passed
/// explicitly to the frame tick and the interaction handler.
#[derive(Debug)]
pub struct Scene<R = StdRng> {
    pub rig: CameraRig,
    pub projection: Projection,
    pub registry: Registry,
    pub effects: EffectSet,
    pub interaction: InteractionHandler,
    pub rng: R,
    pub(crate) frame: u64,
}

impl Scene<StdRng> {
    /// Build a scene, seeding the RNG from `config.seed` or from entropy.
    pub fn from_config(config: &SceneConfig) -> Result<Self, DriverError> {
        let rng = match config.seed {
            Some(seed) => seeded_rng(seed),
            None => StdRng::from_entropy(),
        };
        Self::build(config, rng)
    }
}

impl<R: RandomSource> Scene<R> {
    /// Build the path, rig and effect set, then scatter objects along the path.
    pub fn build(config: &SceneConfig, mut rng: R) -> Result<Self, DriverError> {
        config.validate()?;
        config.projection.validate().map_err(DriverError::Projection)?;

        let path = match &config.path {
            Some(points) => Path::from_arrays(points),
            None => Path::new(wormhole_loop()),
        }
        .map_err(wormhole_camera::RigError::from)?;

        let mut registry = Registry::new();
        populate(&mut registry, &path, config, &mut rng)?;
        let rig = CameraRig::new(path, config.rig)?;
        let effects = EffectSet::new(config.burst)?;

        tracing::info!(
            objects = registry.len(),
            path_length = rig.path().length(),
            "scene built"
        );

        Ok(Self {
            rig,
            projection: config.projection,
            registry,
            effects,
            interaction: InteractionHandler::new(),
            rng,
            frame: 0,
        })
    }

    /// The camera as of the last tick.
    pub fn camera(&self) -> Camera {
        Camera::new(*self.rig.state(), self.projection)
    }

    /// Frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Apply one input action between ticks.
    pub fn apply(&mut self, action: &Action) -> Result<Option<ClickOutcome>, DriverError> {
        let camera = self.camera();
        let outcome = self.interaction.handle(
            action,
            &camera,
            &mut self.registry,
            &mut self.effects,
            &mut self.rng,
        )?;
        Ok(outcome)
    }
}

/// Scatter `config.object_count` objects around the loop, one per evenly
/// spaced slot plus random jitter, with a random hue each.
pub fn populate(
    registry: &mut Registry,
    path: &Path,
    config: &SceneConfig,
    rng: &mut impl RandomSource,
) -> Result<Vec<ObjectId>, RegistryError> {
    let count = config.object_count;
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let color = Color::from_hsl(rng.next_unit(), 1.0, 0.5);
        let slot = i as f32 / count as f32 + rng.next_unit() * config.placement_jitter;
        let mut position = path.point_at(slot);
        position.x += rng.next_centered(config.placement_spread);
        position.z += rng.next_centered(config.placement_spread);
        ids.push(registry.add(position, config.object_radius, color)?);
    }
    tracing::debug!(count, "objects placed along path");
    Ok(ids)
}
