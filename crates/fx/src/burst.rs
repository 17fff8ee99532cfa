use glam::Vec3;
use serde::{Deserialize, Serialize};
use wormhole_common::{Color, RandomSource};

/// Identifier for a burst within an [`EffectSet`](crate::EffectSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BurstId(pub u64);

impl std::fmt::Display for BurstId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "burst#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BurstError {
    #[error("a burst needs at least one particle")]
    ZeroParticles,
    #[error("velocity decay must lie in (0, 1), got {0}")]
    InvalidDecay(f32),
    #[error("max speed must be positive and finite, got {0}")]
    InvalidSpeed(f32),
    #[error("rest epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f32),
    #[error("burst origin {0} is not finite")]
    NonFiniteOrigin(Vec3),
}

/// Parameters shared by every burst spawned from one effect set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    pub particle_count: usize,
    /// Per-frame velocity multiplier.
    pub decay: f32,
    /// Each velocity component starts uniform in `[-max_speed / 2, max_speed / 2]`.
    pub max_speed: f32,
    /// The burst ends once every particle is slower than this.
    pub rest_epsilon: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            particle_count: 20,
            decay: 0.95,
            max_speed: 0.2,
            rest_epsilon: 0.01,
        }
    }
}

impl BurstConfig {
    pub fn validate(&self) -> Result<(), BurstError> {
        if self.particle_count == 0 {
            return Err(BurstError::ZeroParticles);
        }
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(BurstError::InvalidDecay(self.decay));
        }
        if !(self.max_speed > 0.0 && self.max_speed.is_finite()) {
            return Err(BurstError::InvalidSpeed(self.max_speed));
        }
        if !(self.rest_epsilon > 0.0 && self.rest_epsilon.is_finite()) {
            return Err(BurstError::InvalidEpsilon(self.rest_epsilon));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Outcome of one [`BurstEffect::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstStatus {
    /// Still moving.
    Active,
    /// Came to rest on this step. Returned exactly once per burst.
    Completed,
    /// Already at rest; the step did nothing.
    Finished,
}

/// A group of particles flying out from one point and slowing to a stop.
#[derive(Debug, Clone)]
pub struct BurstEffect {
    id: BurstId,
    origin: Vec3,
    color: Color,
    particles: Vec<Particle>,
    decay: f32,
    rest_epsilon: f32,
    frames: u32,
    finished: bool,
}

impl BurstEffect {
    pub fn new(
        id: BurstId,
        origin: Vec3,
        color: Color,
        config: &BurstConfig,
        rng: &mut impl RandomSource,
    ) -> Result<Self, BurstError> {
        config.validate()?;
        if !origin.is_finite() {
            return Err(BurstError::NonFiniteOrigin(origin));
        }

        let particles = (0..config.particle_count)
            .map(|_| Particle {
                position: origin,
                velocity: Vec3::new(
                    rng.next_centered(config.max_speed),
                    rng.next_centered(config.max_speed),
                    rng.next_centered(config.max_speed),
                ),
            })
            .collect();

        Ok(Self {
            id,
            origin,
            color,
            particles,
            decay: config.decay,
            rest_epsilon: config.rest_epsilon,
            frames: 0,
            finished: false,
        })
    }

    /// Integrate one frame: move every particle, then decay its velocity.
    pub fn step(&mut self) -> BurstStatus {
        if self.finished {
            return BurstStatus::Finished;
        }

        for p in &mut self.particles {
            p.position += p.velocity;
            p.velocity *= self.decay;
        }
        self.frames += 1;

        if self.peak_speed() < self.rest_epsilon {
            self.finished = true;
            BurstStatus::Completed
        } else {
            BurstStatus::Active
        }
    }

    /// Fastest particle speed right now.
    pub fn peak_speed(&self) -> f32 {
        self.particles
            .iter()
            .map(|p| p.velocity.length())
            .fold(0.0, f32::max)
    }

    pub fn id(&self) -> BurstId {
        self.id
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Frames integrated so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
