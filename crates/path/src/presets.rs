use glam::Vec3;
use std::f32::consts::TAU;

const LOOP_CONTROL_POINTS: usize = 16;
const LOOP_RADIUS: f32 = 10.0;
const LOOP_WOBBLE: f32 = 2.5;
const LOOP_RISE: f32 = 2.0;

/// Control points for the default wormhole tube: a wobbling ring of radius
/// ~10 that rises and dips twice per lap.
pub fn wormhole_loop() -> Vec<Vec3> {
    (0..LOOP_CONTROL_POINTS)
        .map(|i| {
            let theta = TAU * i as f32 / LOOP_CONTROL_POINTS as f32;
            let r = LOOP_RADIUS + LOOP_WOBBLE * (3.0 * theta).sin();
            Vec3::new(r * theta.cos(), LOOP_RISE * (2.0 * theta).sin(), r * theta.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Path;

    #[test]
    fn wormhole_loop_builds() {
        let path = Path::new(wormhole_loop()).unwrap();
        assert_eq!(path.control_points().len(), LOOP_CONTROL_POINTS);
        assert!(path.length() > 2.0 * LOOP_RADIUS);
    }
}
