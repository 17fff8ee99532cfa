use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Unique identifier for an interactive object in the scene.
///
/// Ids are handed out in increasing order by the registry, so their `Ord`
/// matches insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "obj#{}", self.0)
    }
}

/// RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Color from a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Color from hue, saturation and lightness.
    ///
    /// Hue wraps around `[0, 1)`; saturation and lightness are clamped to `[0, 1]`.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::rgb(l, l, l);
        }

        let hi = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let lo = 2.0 * l - hi;

        Self::rgb(
            hue_to_channel(lo, hi, h + 1.0 / 3.0),
            hue_to_channel(lo, hi, h),
            hue_to_channel(lo, hi, h - 1.0 / 3.0),
        )
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Multiply every channel by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self::rgb(self.r * factor, self.g * factor, self.b * factor)
    }
}

fn hue_to_channel(lo: f32, hi: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        lo + (hi - lo) * 6.0 * t
    } else if t < 0.5 {
        hi
    } else if t < 2.0 / 3.0 {
        lo + (hi - lo) * 6.0 * (2.0 / 3.0 - t)
    } else {
        lo
    }
}

/// A half-line in world space. `direction` is always unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`. Returns `None` for a zero or
    /// non-finite direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray parameter of the first intersection with a sphere in front of the
    /// origin, or `None` if the sphere is missed or entirely behind.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let half_b = oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;

        let discriminant = half_b * half_b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let near = -half_b - sqrt_d;
        if near >= 0.0 {
            return Some(near);
        }
        // Origin inside the sphere: report the exit point.
        let far = -half_b + sqrt_d;
        (far >= 0.0).then_some(far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn object_id_orders_by_value() {
        assert!(ObjectId(1) < ObjectId(2));
        assert_eq!(ObjectId(7).to_string(), "obj#7");
    }

    #[test]
    fn hsl_primaries() {
        assert!(close(Color::from_hsl(0.0, 1.0, 0.5), Color::rgb(1.0, 0.0, 0.0)));
        assert!(close(Color::from_hsl(1.0 / 3.0, 1.0, 0.5), Color::rgb(0.0, 1.0, 0.0)));
        assert!(close(Color::from_hsl(2.0 / 3.0, 1.0, 0.5), Color::rgb(0.0, 0.0, 1.0)));
    }

    #[test]
    fn hsl_hue_wraps() {
        assert!(close(Color::from_hsl(1.25, 1.0, 0.5), Color::from_hsl(0.25, 1.0, 0.5)));
    }

    #[test]
    fn hsl_zero_saturation_is_grey() {
        assert!(close(Color::from_hsl(0.4, 0.0, 0.3), Color::rgb(0.3, 0.3, 0.3)));
    }

    #[test]
    fn hex_channels() {
        let c = Color::from_hex(0xff8000);
        assert!(close(c, Color::rgb(1.0, 128.0 / 255.0, 0.0)));
    }

    #[test]
    fn ray_rejects_zero_direction() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
        let r = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0)).unwrap();
        assert!((r.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ray_hits_sphere_in_front() {
        let r = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let t = r.intersect_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert!((r.at(t).z + 4.0).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_sphere_behind_or_aside() {
        let r = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        assert!(r.intersect_sphere(Vec3::new(0.0, 0.0, 5.0), 1.0).is_none());
        assert!(r.intersect_sphere(Vec3::new(3.0, 0.0, -5.0), 1.0).is_none());
    }

    #[test]
    fn ray_from_inside_sphere_reports_exit() {
        let r = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        let t = r.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }
}
