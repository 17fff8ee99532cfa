use glam::Vec3;

/// Number of chords used to approximate arc length at construction.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Segments shorter than this are treated as coincident control points.
const COINCIDENT_EPSILON: f32 = 1e-4;

/// Half-width of the parameter window used for finite-difference tangents.
const TANGENT_DELTA: f32 = 1e-4;

/// Errors from building a [`Path`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("a closed path needs at least 3 distinct control points, got {found}")]
    TooFewPoints { found: usize },
    #[error("control point {index} has a non-finite coordinate")]
    NonFinite { index: usize },
    #[error("control points {index} and {next} coincide")]
    CoincidentPoints { index: usize, next: usize },
    #[error("all control points lie on one line; a closed path would fold back on itself")]
    Collinear,
}

/// A closed centripetal Catmull-Rom curve through a ring of control points.
///
/// Public sampling is arc-length parameterized: `point_at(0.25)` sits a
/// quarter of the way around the loop by distance, regardless of how the
/// control points are spaced.
#[derive(Debug, Clone)]
pub struct Path {
    points: Vec<Vec3>,
    /// Cumulative chord lengths at `ARC_LENGTH_DIVISIONS + 1` evenly spaced
    /// curve parameters. `lengths[0] == 0`, last entry is the loop length.
    lengths: Vec<f32>,
}

impl Path {
    /// Build a closed path through `points`, rejecting degenerate input.
    pub fn new(points: Vec<Vec3>) -> Result<Self, PathError> {
        validate(&points)?;
        let lengths = cumulative_lengths(&points, ARC_LENGTH_DIVISIONS);
        let path = Self { points, lengths };
        tracing::debug!(
            control_points = path.points.len(),
            length = path.length(),
            "path built"
        );
        Ok(path)
    }

    /// Build a path from raw coordinate triples (e.g. loaded from config).
    pub fn from_arrays(points: &[[f32; 3]]) -> Result<Self, PathError> {
        Self::new(points.iter().copied().map(Vec3::from_array).collect())
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Total length of the loop.
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at normalized arc-length `t`, taken modulo 1.
    pub fn point_at(&self, t: f32) -> Vec3 {
        debug_assert!(t.is_finite(), "path parameter must be finite");
        let u = wrap_unit(t);
        curve_point(&self.points, self.arc_to_curve(u))
    }

    /// Point `delta` further along the loop than `t`, used as a look target.
    pub fn look_ahead_at(&self, t: f32, delta: f32) -> Vec3 {
        self.point_at(t + delta)
    }

    /// Unit tangent at `t`, pointing in the direction of travel.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let behind = self.point_at(t - TANGENT_DELTA);
        let ahead = self.point_at(t + TANGENT_DELTA);
        (ahead - behind).normalize_or_zero()
    }

    /// `divisions + 1` points evenly spaced by arc length. The last point
    /// repeats the first, closing the loop for line drawing.
    pub fn sample(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }

    /// Map a normalized arc length to the raw curve parameter.
    fn arc_to_curve(&self, u: f32) -> f32 {
        let segments = self.lengths.len() - 1;
        let target = u * self.length();

        let upper = self.lengths.partition_point(|&l| l <= target);
        let i = upper.saturating_sub(1).min(segments - 1);

        let before = self.lengths[i];
        let after = self.lengths[i + 1];
        let span = after - before;
        let fraction = if span > 0.0 {
            ((target - before) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        (i as f32 + fraction) / segments as f32
    }
}

fn wrap_unit(t: f32) -> f32 {
    let u = t.rem_euclid(1.0);
    // rem_euclid can round tiny negatives up to exactly 1.0
    if u >= 1.0 { 0.0 } else { u }
}

fn validate(points: &[Vec3]) -> Result<(), PathError> {
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(PathError::NonFinite { index });
    }

    let mut distinct: Vec<Vec3> = Vec::with_capacity(points.len());
    for p in points {
        if !distinct
            .iter()
            .any(|d| d.distance(*p) < COINCIDENT_EPSILON)
        {
            distinct.push(*p);
        }
    }
    if distinct.len() < 3 {
        return Err(PathError::TooFewPoints {
            found: distinct.len(),
        });
    }

    let n = points.len();
    for index in 0..n {
        let next = (index + 1) % n;
        if points[index].distance(points[next]) < COINCIDENT_EPSILON {
            return Err(PathError::CoincidentPoints { index, next });
        }
    }

    // A closed curve through collinear points stops dead where it turns back.
    let origin = distinct[0];
    let axis = (distinct[1] - origin).normalize();
    if distinct
        .iter()
        .all(|p| (*p - origin).cross(axis).length() < COINCIDENT_EPSILON)
    {
        return Err(PathError::Collinear);
    }
    Ok(())
}

fn cumulative_lengths(points: &[Vec3], divisions: usize) -> Vec<f32> {
    let mut lengths = Vec::with_capacity(divisions + 1);
    let mut last = curve_point(points, 0.0);
    let mut sum = 0.0;
    lengths.push(0.0);
    for i in 1..=divisions {
        let current = curve_point(points, i as f32 / divisions as f32);
        sum += current.distance(last);
        lengths.push(sum);
        last = current;
    }
    lengths
}

/// Evaluate the closed centripetal Catmull-Rom curve at raw parameter `t`.
fn curve_point(points: &[Vec3], t: f32) -> Vec3 {
    let n = points.len();
    let scaled = n as f32 * t;
    let whole = scaled.floor();
    let weight = scaled - whole;
    let i = (whole as i64).rem_euclid(n as i64) as usize;

    let p0 = points[(i + n - 1) % n];
    let p1 = points[i];
    let p2 = points[(i + 1) % n];
    let p3 = points[(i + 2) % n];

    let mut dt0 = p0.distance_squared(p1).powf(0.25);
    let mut dt1 = p1.distance_squared(p2).powf(0.25);
    let mut dt2 = p2.distance_squared(p3).powf(0.25);
    if dt1 < 1e-4 {
        dt1 = 1.0;
    }
    if dt0 < 1e-4 {
        dt0 = dt1;
    }
    if dt2 < 1e-4 {
        dt2 = dt1;
    }

    let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

    let c2 = -3.0 * p1 + 3.0 * p2 - 2.0 * m1 - m2;
    let c3 = 2.0 * p1 - 2.0 * p2 + m1 + m2;
    p1 + m1 * weight + c2 * weight * weight + c3 * weight * weight * weight
}
