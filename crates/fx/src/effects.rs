use glam::Vec3;
use wormhole_common::{Color, RandomSource};

use crate::burst::{BurstConfig, BurstEffect, BurstError, BurstId, BurstStatus};

/// The set of bursts currently being animated.
///
/// Bursts are kept in spawn order and dropped on the step they come to rest.
#[derive(Debug, Clone)]
pub struct EffectSet {
    config: BurstConfig,
    active: Vec<BurstEffect>,
    next_id: u64,
    completed_total: u64,
}

impl EffectSet {
    /// Create an empty set whose bursts all use `config`.
    pub fn new(config: BurstConfig) -> Result<Self, BurstError> {
        config.validate()?;
        Ok(Self {
            config,
            active: Vec::new(),
            next_id: 0,
            completed_total: 0,
        })
    }

    pub fn config(&self) -> &BurstConfig {
        &self.config
    }

    /// Build a burst without activating it. Pair with [`EffectSet::insert`]
    /// when the caller must commit other state in between.
    pub fn prepare(
        &mut self,
        origin: Vec3,
        color: Color,
        rng: &mut impl RandomSource,
    ) -> Result<BurstEffect, BurstError> {
        let id = BurstId(self.next_id);
        let burst = BurstEffect::new(id, origin, color, &self.config, rng)?;
        self.next_id += 1;
        Ok(burst)
    }

    /// Start animating a prepared burst.
    pub fn insert(&mut self, burst: BurstEffect) -> BurstId {
        let id = burst.id();
        tracing::debug!(
            %id,
            origin = ?burst.origin(),
            particles = burst.particles().len(),
            "burst spawned"
        );
        self.active.push(burst);
        id
    }

    /// Build and activate a burst in one step.
    pub fn spawn(
        &mut self,
        origin: Vec3,
        color: Color,
        rng: &mut impl RandomSource,
    ) -> Result<BurstId, BurstError> {
        let burst = self.prepare(origin, color, rng)?;
        Ok(self.insert(burst))
    }

    /// Step every active burst once. Returns the ids that came to rest and
    /// were removed.
    pub fn step_all(&mut self) -> Vec<BurstId> {
        let mut completed = Vec::new();
        self.active.retain_mut(|burst| match burst.step() {
            BurstStatus::Active => true,
            BurstStatus::Completed | BurstStatus::Finished => {
                completed.push(burst.id());
                false
            }
        });

        for id in &completed {
            tracing::info!(%id, "burst finished");
        }
        self.completed_total += completed.len() as u64;
        completed
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BurstEffect> {
        self.active.iter()
    }

    pub fn get(&self, id: BurstId) -> Option<&BurstEffect> {
        self.active.iter().find(|b| b.id() == id)
    }

    /// Particles across all active bursts.
    pub fn particle_count(&self) -> usize {
        self.active.iter().map(|b| b.particles().len()).sum()
    }

    /// Bursts that have finished since this set was created.
    pub fn completed_total(&self) -> u64 {
        self.completed_total
    }
}

impl Default for EffectSet {
    fn default() -> Self {
        Self {
            config: BurstConfig::default(),
            active: Vec::new(),
            next_id: 0,
            completed_total: 0,
        }
    }
}
