use serde::{Deserialize, Serialize};
use std::path::Path;
use wormhole_camera::{Projection, RigConfig};
use wormhole_fx::BurstConfig;

/// Errors from loading or validating a [`SceneConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Everything needed to build a scene. Every field has a default, so a
/// config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Interactive objects scattered along the path at startup.
    pub object_count: usize,
    /// Bounding radius of each object.
    pub object_radius: f32,
    /// Extra random offset (normalized path units) added to each object's
    /// slot along the loop.
    pub placement_jitter: f32,
    /// Full width of the random x/z offset from the path centerline.
    pub placement_spread: f32,
    /// Control points of the camera loop. `None` uses the built-in wormhole.
    pub path: Option<Vec<[f32; 3]>>,
    pub rig: RigConfig,
    pub burst: BurstConfig,
    pub projection: Projection,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            object_count: 55,
            object_radius: 0.0375,
            placement_jitter: 0.1,
            placement_spread: 0.4,
            path: None,
            rig: RigConfig::default(),
            burst: BurstConfig::default(),
            projection: Projection::default(),
        }
    }
}

impl SceneConfig {
    /// Load a config from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "scene config loaded");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks the placement fields. Rig, burst and projection settings are
    /// validated by the components that own them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.placement_jitter >= 0.0 && self.placement_jitter.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "placement_jitter",
                reason: "must be non-negative and finite",
            });
        }
        if !(self.placement_spread >= 0.0 && self.placement_spread.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "placement_spread",
                reason: "must be non-negative and finite",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_original_scene() {
        let c = SceneConfig::default();
        assert_eq!(c.object_count, 55);
        assert_eq!(c.rig.loop_duration_ms, 10_000.0);
        assert_eq!(c.burst.particle_count, 20);
        assert!(c.path.is_none());
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        let c = SceneConfig::from_yaml_str("{}").unwrap();
        assert_eq!(c, SceneConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let yaml = "seed: 7\nrig:\n  speed: 0.05\nburst:\n  particle_count: 8\n";
        let c = SceneConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.rig.speed, 0.05);
        assert_eq!(c.rig.look_ahead, 0.03);
        assert_eq!(c.burst.particle_count, 8);
        assert_eq!(c.burst.decay, 0.95);
    }

    #[test]
    fn yaml_round_trips() {
        let c = SceneConfig {
            seed: Some(3),
            path: Some(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            ..SceneConfig::default()
        };
        let back = SceneConfig::from_yaml_str(&c.to_yaml().unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn negative_spread_is_rejected() {
        let err = SceneConfig::from_yaml_str("placement_spread: -1.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "placement_spread",
                ..
            }
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "object_count: 3").unwrap();
        let c = SceneConfig::load(file.path()).unwrap();
        assert_eq!(c.object_count, 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SceneConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
