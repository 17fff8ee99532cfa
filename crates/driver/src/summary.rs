use serde::Serialize;
use wormhole_common::RandomSource;

use crate::scene::Scene;
use crate::timer::FrameTimer;

/// Read-only snapshot of a running scene, for logs, the CLI and `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub frame: u64,
    pub progress: f32,
    pub elapsed_ms: f64,
    pub objects: usize,
    pub active_bursts: usize,
    pub particles: usize,
    pub bursts_completed: u64,
    pub clicks: u64,
    pub hits: u64,
    /// Mean wall-clock frame time over the timer window, if one was supplied.
    pub avg_frame_us: Option<u64>,
}

impl SceneSummary {
    pub fn from_scene<R: RandomSource>(scene: &Scene<R>, timer: Option<&FrameTimer>) -> Self {
        Self {
            frame: scene.frame(),
            progress: scene.rig.progress(),
            elapsed_ms: scene.rig.elapsed_ms(),
            objects: scene.registry.len(),
            active_bursts: scene.effects.len(),
            particles: scene.effects.particle_count(),
            bursts_completed: scene.effects.completed_total(),
            clicks: scene.interaction.clicks(),
            hits: scene.interaction.hits(),
            avg_frame_us: timer
                .filter(|t| t.count() > 0)
                .map(|t| t.average().as_micros() as u64),
        }
    }
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: frame={} progress={:.3} objects={} bursts={} particles={} completed={} clicks={} hits={}",
            self.frame,
            self.progress,
            self.objects,
            self.active_bursts,
            self.particles,
            self.bursts_completed,
            self.clicks,
            self.hits
        )?;
        if let Some(us) = self.avg_frame_us {
            write!(f, " avg_frame={us}us")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use std::time::Duration;
    use wormhole_common::seeded_rng;

    fn scene() -> Scene {
        let config = SceneConfig {
            object_count: 4,
            ..SceneConfig::default()
        };
        Scene::build(&config, seeded_rng(1)).unwrap()
    }

    #[test]
    fn fresh_scene_summary() {
        let summary = SceneSummary::from_scene(&scene(), None);
        assert_eq!(summary.frame, 0);
        assert_eq!(summary.objects, 4);
        assert_eq!(summary.active_bursts, 0);
        assert_eq!(summary.clicks, 0);
        assert!(summary.avg_frame_us.is_none());
    }

    #[test]
    fn display_includes_counts() {
        let text = SceneSummary::from_scene(&scene(), None).to_string();
        assert!(text.contains("frame=0"));
        assert!(text.contains("objects=4"));
        assert!(!text.contains("avg_frame"));
    }

    #[test]
    fn timer_average_is_reported() {
        let mut timer = FrameTimer::new(4);
        timer.record(Duration::from_micros(100));
        timer.record(Duration::from_micros(300));
        let summary = SceneSummary::from_scene(&scene(), Some(&timer));
        assert_eq!(summary.avg_frame_us, Some(200));
        assert!(summary.to_string().contains("avg_frame=200us"));
    }

    #[test]
    fn empty_timer_is_omitted() {
        let timer = FrameTimer::new(4);
        let summary = SceneSummary::from_scene(&scene(), Some(&timer));
        assert!(summary.avg_frame_us.is_none());
    }
}
