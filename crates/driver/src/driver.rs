use rand::rngs::StdRng;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};
use wormhole_camera::CameraState;
use wormhole_common::RandomSource;
use wormhole_fx::BurstId;
use wormhole_input::{Action, ClickOutcome};
use wormhole_kernel::RegistryEvent;
use wormhole_render::{FrameView, Renderer};

use crate::DriverError;
use crate::scene::Scene;
use crate::summary::SceneSummary;
use crate::timer::FrameTimer;

/// What one tick changed.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Index of this frame, starting at 0.
    pub frame: u64,
    /// Camera progress on the loop after the tick.
    pub progress: f32,
    pub camera: CameraState,
    /// Bursts that came to rest this frame and were dropped.
    pub finished_bursts: Vec<BurstId>,
    /// Registry mutations since the previous tick, including those made by
    /// input actions applied in between.
    pub registry_events: Vec<RegistryEvent>,
}

/// Advance the scene by one display refresh: camera first, then every
/// active burst.
pub fn tick<R: RandomSource>(scene: &mut Scene<R>, dt_ms: f64) -> Result<FrameReport, DriverError> {
    let span = tracing::info_span!("frame_tick", frame = scene.frame);
    let _guard = span.enter();

    let camera = *scene.rig.tick(dt_ms)?;
    let finished_bursts = scene.effects.step_all();
    let registry_events = scene.registry.drain_events();

    let report = FrameReport {
        frame: scene.frame,
        progress: scene.rig.progress(),
        camera,
        finished_bursts,
        registry_events,
    };
    scene.frame += 1;

    tracing::trace!(
        progress = report.progress,
        bursts = scene.effects.len(),
        "frame ticked"
    );
    Ok(report)
}

/// Source of frame deltas. Returns `None` when the run should stop.
pub trait FrameScheduler {
    fn next_frame(&mut self) -> Option<f64>;
}

/// Emits a fixed delta a set number of times. Used headless and in tests.
#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    dt_ms: f64,
    remaining: u64,
}

impl FixedStepScheduler {
    pub fn new(dt_ms: f64, frames: u64) -> Self {
        Self {
            dt_ms,
            remaining: frames,
        }
    }

    /// Sixty frames per second.
    pub fn refresh_60hz(frames: u64) -> Self {
        Self::new(1000.0 / 60.0, frames)
    }
}

impl FrameScheduler for FixedStepScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.dt_ms)
    }
}

/// Sleeps to hold a target frame rate and reports measured wall-clock deltas.
#[derive(Debug, Clone)]
pub struct PacedScheduler {
    period: Duration,
    remaining: Option<u64>,
    last: Option<Instant>,
}

impl PacedScheduler {
    /// `frames = None` runs until the caller breaks out.
    pub fn new(target_fps: u32, frames: Option<u64>) -> Self {
        Self {
            period: Duration::from_secs(1) / target_fps.max(1),
            remaining: frames,
            last: None,
        }
    }
}

impl FrameScheduler for PacedScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }

        let Some(last) = self.last else {
            self.last = Some(Instant::now());
            return Some(self.period.as_secs_f64() * 1000.0);
        };
        let due = last + self.period;
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
        let now = Instant::now();
        self.last = Some(now);
        Some(now.duration_since(last).as_secs_f64() * 1000.0)
    }
}

/// Owns a scene and a renderer and runs the per-refresh loop.
pub struct FrameDriver<Rd: Renderer, R = StdRng> {
    scene: Scene<R>,
    renderer: Rd,
    timer: FrameTimer,
}

impl<Rd: Renderer, R: RandomSource> FrameDriver<Rd, R> {
    pub fn new(scene: Scene<R>, renderer: Rd) -> Self {
        Self {
            scene,
            renderer,
            timer: FrameTimer::default(),
        }
    }

    pub fn scene(&self) -> &Scene<R> {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene<R> {
        &mut self.scene
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn into_scene(self) -> Scene<R> {
        self.scene
    }

    /// Tick, then render what the tick produced.
    pub fn run_frame(&mut self, dt_ms: f64) -> Result<(FrameReport, Rd::Output), DriverError> {
        let started = Instant::now();
        let report = tick(&mut self.scene, dt_ms)?;

        let camera = self.scene.camera();
        let view = FrameView {
            frame: report.frame,
            progress: report.progress,
            camera: &camera,
            objects: &self.scene.registry,
            effects: &self.scene.effects,
        };
        let output = self.renderer.render(&view);

        self.timer.record(started.elapsed());
        Ok((report, output))
    }

    /// Run frames until the scheduler stops or `on_frame` breaks.
    /// Returns the number of frames run.
    pub fn run<S, F>(&mut self, scheduler: &mut S, mut on_frame: F) -> Result<u64, DriverError>
    where
        S: FrameScheduler,
        F: FnMut(&FrameReport, Rd::Output) -> ControlFlow<()>,
    {
        let mut frames = 0;
        while let Some(dt_ms) = scheduler.next_frame() {
            let (report, output) = self.run_frame(dt_ms)?;
            frames += 1;
            if on_frame(&report, output).is_break() {
                break;
            }
        }
        tracing::debug!(frames, "frame loop stopped");
        Ok(frames)
    }

    /// Apply an input action between ticks.
    pub fn dispatch(&mut self, action: &Action) -> Result<Option<ClickOutcome>, DriverError> {
        self.scene.apply(action)
    }

    pub fn summary(&self) -> SceneSummary {
        SceneSummary::from_scene(&self.scene, Some(&self.timer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use glam::Vec2;
    use wormhole_common::{Color, seeded_rng};
    use wormhole_render::{DebugTextRenderer, NullRenderer};

    fn empty_scene() -> Scene {
        let config = SceneConfig {
            object_count: 0,
            ..SceneConfig::default()
        };
        Scene::build(&config, seeded_rng(4)).unwrap()
    }

    /// Place an object just in front of the current camera.
    fn object_ahead(scene: &mut Scene) -> wormhole_common::ObjectId {
        let camera = scene.camera();
        let ahead = camera.state.position
            + (camera.state.target - camera.state.position).normalize() * 0.5;
        scene.registry.add(ahead, 0.1, Color::WHITE).unwrap()
    }

    #[test]
    fn tick_advances_camera_and_frame() {
        let mut scene = empty_scene();
        let before = *scene.rig.state();
        let report = tick(&mut scene, 1000.0).unwrap();

        assert_eq!(report.frame, 0);
        assert_eq!(scene.frame(), 1);
        assert!((report.progress - 0.1).abs() < 1e-6);
        assert_ne!(report.camera, before);
        assert_eq!(report.camera, *scene.rig.state());
    }

    #[test]
    fn invalid_delta_is_rejected() {
        let mut scene = empty_scene();
        assert!(matches!(
            tick(&mut scene, f64::NAN),
            Err(DriverError::Rig(_))
        ));
        assert_eq!(scene.frame(), 0);
    }

    #[test]
    fn miss_leaves_scene_unchanged() {
        let mut scene = empty_scene();
        let camera = scene.camera();
        let behind = camera.state.position
            - (camera.state.target - camera.state.position).normalize() * 2.0;
        scene.registry.add(behind, 0.1, Color::WHITE).unwrap();
        scene.registry.drain_events();

        let outcome = scene.apply(&Action::ClickNdc(Vec2::ZERO)).unwrap();
        assert_eq!(outcome, Some(ClickOutcome::Miss));
        assert_eq!(scene.registry.len(), 1);
        assert!(scene.effects.is_empty());
        assert!(scene.registry.events().is_empty());
    }

    #[test]
    fn explosion_runs_to_completion() {
        let mut scene = empty_scene();
        let id = object_ahead(&mut scene);
        scene.apply(&Action::ClickNdc(Vec2::ZERO)).unwrap();
        assert!(!scene.registry.contains(id));

        let first = tick(&mut scene, 16.0).unwrap();
        assert!(
            first
                .registry_events
                .iter()
                .any(|e| matches!(e, RegistryEvent::Removed(o) if o.id == id))
        );

        let mut finished = Vec::new();
        for _ in 0..500 {
            let report = tick(&mut scene, 16.0).unwrap();
            finished.extend(report.finished_bursts);
            if scene.effects.is_empty() {
                break;
            }
        }
        assert_eq!(finished.len(), 1);
        assert!(scene.effects.is_empty());
        assert_eq!(scene.effects.completed_total(), 1);
    }

    #[test]
    fn renderer_sees_the_ticked_camera() {
        let mut driver = FrameDriver::new(empty_scene(), DebugTextRenderer::new());
        let (report, text) = driver.run_frame(2500.0).unwrap();
        let eye = report.camera.position;
        let expected = format!("eye=({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z);
        assert!(text.contains(&expected), "{text}");
        assert!(text.contains("progress=0.250"));
        assert_eq!(driver.timer().count(), 1);
    }

    #[test]
    fn run_stops_with_scheduler() {
        let mut driver = FrameDriver::new(empty_scene(), NullRenderer);
        let mut scheduler = FixedStepScheduler::refresh_60hz(30);
        let frames = driver.run(&mut scheduler, |_, _| ControlFlow::Continue(())).unwrap();
        assert_eq!(frames, 30);
        assert_eq!(driver.scene().frame(), 30);
        assert!((driver.scene().rig.elapsed_ms() - 500.0).abs() < 1e-6);
    }

    #[test]
    fn run_stops_on_break() {
        let mut driver = FrameDriver::new(empty_scene(), NullRenderer);
        let mut scheduler = FixedStepScheduler::new(10.0, 100);
        let frames = driver
            .run(&mut scheduler, |report, _| {
                if report.frame == 4 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert_eq!(frames, 5);
    }

    #[test]
    fn dispatch_between_frames() {
        let mut driver = FrameDriver::new(empty_scene(), NullRenderer);
        driver.run_frame(16.0).unwrap();
        let id = object_ahead(driver.scene_mut());
        let outcome = driver.dispatch(&Action::ClickNdc(Vec2::ZERO)).unwrap();
        assert!(matches!(
            outcome,
            Some(ClickOutcome::Exploded { object, .. }) if object.id == id
        ));

        let summary = driver.summary();
        assert_eq!(summary.clicks, 1);
        assert_eq!(summary.hits, 1);
        assert_eq!(summary.active_bursts, 1);
        assert_eq!(summary.frame, 1);
    }

    #[test]
    fn noop_action_does_nothing() {
        let mut driver = FrameDriver::new(empty_scene(), NullRenderer);
        assert_eq!(driver.dispatch(&Action::Noop).unwrap(), None);
        assert_eq!(driver.summary().clicks, 0);
    }

    #[test]
    fn fixed_scheduler_counts_down() {
        let mut s = FixedStepScheduler::new(5.0, 2);
        assert_eq!(s.next_frame(), Some(5.0));
        assert_eq!(s.next_frame(), Some(5.0));
        assert_eq!(s.next_frame(), None);
    }

    #[test]
    fn paced_scheduler_reports_positive_deltas() {
        let mut s = PacedScheduler::new(1000, Some(3));
        let deltas: Vec<f64> = std::iter::from_fn(|| s.next_frame()).collect();
        assert_eq!(deltas.len(), 3);
        assert!(deltas.iter().all(|d| *d > 0.0));
    }
}
